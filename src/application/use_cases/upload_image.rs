use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::application::ports::{ImageUpload, ImageUploader, UpstreamError};

#[derive(Debug, Error)]
pub enum UploadImageError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Upload timeout")]
    Timeout,
    #[error("External server error: {0}")]
    Transport(String),
    #[error("External server error: {body}")]
    Upstream { status: u16, body: String },
}

impl From<UpstreamError> for UploadImageError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::Timeout(_) => UploadImageError::Timeout,
            UpstreamError::Status { status, body } => UploadImageError::Upstream { status, body },
            other => UploadImageError::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadImageRequest {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadImageResponse {
    /// The upload service's answer, returned verbatim.
    pub result: Value,
}

pub struct UploadImageUseCase {
    image_uploader: Arc<dyn ImageUploader>,
}

impl UploadImageUseCase {
    pub fn new(image_uploader: Arc<dyn ImageUploader>) -> Self {
        Self { image_uploader }
    }

    pub async fn execute(
        &self,
        request: UploadImageRequest,
    ) -> Result<UploadImageResponse, UploadImageError> {
        if request.data.is_empty() {
            return Err(UploadImageError::ValidationError(
                "Uploaded file is empty".to_string(),
            ));
        }

        tracing::info!(
            "Uploading image: {} ({} bytes)",
            request.file_name,
            request.data.len()
        );

        let result = self
            .image_uploader
            .upload(ImageUpload {
                file_name: request.file_name.clone(),
                content_type: request.content_type,
                data: request.data,
            })
            .await
            .inspect_err(|e| tracing::error!("Uploading {} failed: {}", request.file_name, e))?;

        tracing::info!("Successfully uploaded image: {}", request.file_name);
        Ok(UploadImageResponse { result })
    }
}

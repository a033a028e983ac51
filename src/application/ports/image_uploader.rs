use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::UpstreamError;

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Hands the file to the upload service and returns its JSON answer.
    async fn upload(&self, upload: ImageUpload) -> Result<Value, UpstreamError>;
}

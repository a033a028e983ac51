use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Error as ReqwestError,
    multipart::{Form, Part},
};
use serde_json::Value;

use super::{body_error, upstream_error};
use crate::application::ports::{ImageUpload, ImageUploader, UpstreamError};

/// Multipart part name the upload service reads files from.
const FILE_PART: &str = "files";

#[derive(Debug, Clone)]
pub struct HttpImageUploader {
    client: Client,
    service_url: String,
}

impl HttpImageUploader {
    pub fn new(service_url: String, timeout: Duration) -> Result<Self, ReqwestError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            service_url,
        })
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload(&self, upload: ImageUpload) -> Result<Value, UpstreamError> {
        let size = upload.data.len();
        let mut part = Part::bytes(upload.data).file_name(upload.file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| UpstreamError::Transport(format!("Invalid content type: {}", e)))?;
        }
        let form = Form::new().part(FILE_PART, part);

        tracing::info!("Uploading '{}' ({} bytes)", upload.file_name, size);
        let response = self
            .client
            .post(&self.service_url)
            .multipart(form)
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Upload service answered {}: {}", status, body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(body_error)
    }
}

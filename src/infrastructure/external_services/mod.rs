pub mod image_upload_client;
pub mod n8n_webhook_client;

pub use image_upload_client::HttpImageUploader;
pub use n8n_webhook_client::{N8nWebhookClient, WebhookEndpoints};

use crate::application::ports::UpstreamError;

fn upstream_error(error: reqwest::Error) -> UpstreamError {
    let timed_out = error.is_timeout();
    let message = error.without_url().to_string();
    if timed_out {
        UpstreamError::Timeout(message)
    } else {
        UpstreamError::Transport(message)
    }
}

/// Failure while reading a response body. A stalled body is still a timeout.
fn body_error(error: reqwest::Error) -> UpstreamError {
    let is_timeout = error.is_timeout();
    let message = error.without_url().to_string();
    if is_timeout {
        UpstreamError::Timeout(message)
    } else {
        UpstreamError::InvalidResponse(message)
    }
}

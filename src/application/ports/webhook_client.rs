use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure talking to an outbound HTTP collaborator.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("Upstream request timed out: {0}")]
    Timeout(String),
    #[error("Upstream request failed: {0}")]
    Transport(String),
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Upstream response could not be read: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookTarget {
    /// Receives new content requests from the webhook proxy.
    Intake,
    /// Receives completed feedback submissions.
    Feedback,
}

impl std::fmt::Display for WebhookTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookTarget::Intake => write!(f, "intake"),
            WebhookTarget::Feedback => write!(f, "feedback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebhookReply {
    pub status: u16,
    pub body: String,
}

impl WebhookReply {
    /// The body as JSON when it parses, otherwise as a JSON string.
    pub fn body_as_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Posts `payload` as JSON. Non-2xx answers are returned as
    /// [`UpstreamError::Status`].
    async fn send(&self, target: WebhookTarget, payload: &Value) -> Result<WebhookReply, UpstreamError>;
}

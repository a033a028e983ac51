use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde_json::Value;

use super::{body_error, upstream_error};
use crate::application::ports::{UpstreamError, WebhookClient, WebhookReply, WebhookTarget};

#[derive(Debug, Clone)]
pub struct WebhookEndpoints {
    pub intake_url: String,
    pub feedback_url: String,
}

impl WebhookEndpoints {
    fn url(&self, target: WebhookTarget) -> &str {
        match target {
            WebhookTarget::Intake => &self.intake_url,
            WebhookTarget::Feedback => &self.feedback_url,
        }
    }
}

/// Posts JSON payloads to the n8n webhooks. No retries.
#[derive(Debug, Clone)]
pub struct N8nWebhookClient {
    client: Client,
    endpoints: WebhookEndpoints,
}

impl N8nWebhookClient {
    pub fn new(endpoints: WebhookEndpoints, timeout: Duration) -> Result<Self, ReqwestError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }
}

#[async_trait]
impl WebhookClient for N8nWebhookClient {
    async fn send(
        &self,
        target: WebhookTarget,
        payload: &Value,
    ) -> Result<WebhookReply, UpstreamError> {
        let url = self.endpoints.url(target);
        tracing::info!("Forwarding payload to {} webhook", target);

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(body_error)?;

        if !status.is_success() {
            tracing::warn!("{} webhook answered {}: {}", target, status, body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("{} webhook answered {}", target, status);
        Ok(WebhookReply {
            status: status.as_u16(),
            body,
        })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::use_cases::proxy_webhook::ProxyWebhookResponse;
use crate::application::use_cases::submit_feedback_webhook::SubmitFeedbackWebhookResponse;

#[derive(Debug, Clone, Serialize)]
pub struct ProxyWebhookResponseDto {
    pub message: String,
    pub feedback_form_link: Option<String>,
    pub feedback_submission_id: Option<String>,
    pub social_media_post_id: Option<String>,
}

impl From<ProxyWebhookResponse> for ProxyWebhookResponseDto {
    fn from(response: ProxyWebhookResponse) -> Self {
        Self {
            message: response.message,
            feedback_form_link: response.feedback_form_link,
            feedback_submission_id: response.feedback_submission_id,
            social_media_post_id: response.social_media_post_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackWebhookDto {
    pub submission_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitFeedbackWebhookResponseDto {
    pub message: String,
    pub webhook_response: Value,
    pub status_code: u16,
}

impl From<SubmitFeedbackWebhookResponse> for SubmitFeedbackWebhookResponseDto {
    fn from(response: SubmitFeedbackWebhookResponse) -> Self {
        Self {
            message: response.message,
            webhook_response: response.webhook_response,
            status_code: response.status_code,
        }
    }
}

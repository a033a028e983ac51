use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::application::ports::{UpstreamError, WebhookClient, WebhookTarget};
use crate::application::services::text_cleaning::{PLACEHOLDER, clean_string_content};
use crate::domain::entities::{FeedbackSubmission, SocialMediaPost};
use crate::domain::repositories::{
    FeedbackRepository, FeedbackRepositoryError, PostRepository, PostRepositoryError,
};
use crate::domain::value_objects::FeedbackField;

pub const SUBMITTED_MESSAGE: &str = "Feedback data submitted to webhook successfully";

#[derive(Debug, Error)]
pub enum SubmitFeedbackWebhookError {
    #[error("submission_id is required")]
    MissingSubmissionId,
    #[error("Feedback submission not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Repository(String),
    #[error("Webhook timeout")]
    Timeout,
    #[error("Webhook error: {0}")]
    Transport(String),
    #[error("Webhook error: {body}")]
    Upstream { status: u16, body: String },
}

impl From<FeedbackRepositoryError> for SubmitFeedbackWebhookError {
    fn from(error: FeedbackRepositoryError) -> Self {
        SubmitFeedbackWebhookError::Repository(error.to_string())
    }
}

impl From<PostRepositoryError> for SubmitFeedbackWebhookError {
    fn from(error: PostRepositoryError) -> Self {
        SubmitFeedbackWebhookError::Repository(error.to_string())
    }
}

impl From<UpstreamError> for SubmitFeedbackWebhookError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::Timeout(_) => SubmitFeedbackWebhookError::Timeout,
            UpstreamError::Status { status, body } => {
                SubmitFeedbackWebhookError::Upstream { status, body }
            }
            other => SubmitFeedbackWebhookError::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitFeedbackWebhookRequest {
    pub submission_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitFeedbackWebhookResponse {
    pub message: String,
    pub webhook_response: Value,
    pub status_code: u16,
}

pub struct SubmitFeedbackWebhookUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
    post_repository: Arc<dyn PostRepository>,
    webhook_client: Arc<dyn WebhookClient>,
}

impl SubmitFeedbackWebhookUseCase {
    pub fn new(
        feedback_repository: Arc<dyn FeedbackRepository>,
        post_repository: Arc<dyn PostRepository>,
        webhook_client: Arc<dyn WebhookClient>,
    ) -> Self {
        Self {
            feedback_repository,
            post_repository,
            webhook_client,
        }
    }

    pub async fn execute(
        &self,
        request: SubmitFeedbackWebhookRequest,
    ) -> Result<SubmitFeedbackWebhookResponse, SubmitFeedbackWebhookError> {
        let submission_id = request
            .submission_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(SubmitFeedbackWebhookError::MissingSubmissionId)?;

        let submission = self
            .feedback_repository
            .find_by_submission_id(&submission_id)
            .await?
            .ok_or_else(|| SubmitFeedbackWebhookError::NotFound(submission_id.clone()))?;

        let post = self
            .post_repository
            .find_by_submission_id(&submission_id)
            .await?;
        match &post {
            Some(post) => tracing::info!("Found social media post with ID: {}", post.post_id()),
            None => tracing::warn!(
                "No social media post found for feedback submission ID: {}, image URLs will be null",
                submission_id
            ),
        }

        let payload = build_payload(&submission, post.as_ref());
        let reply = self
            .webhook_client
            .send(WebhookTarget::Feedback, &payload)
            .await
            .inspect_err(|e| tracing::error!("Submitting feedback data failed: {}", e))?;

        tracing::info!("Successfully submitted feedback data to webhook");
        Ok(SubmitFeedbackWebhookResponse {
            message: SUBMITTED_MESSAGE.to_string(),
            webhook_response: reply.body_as_json(),
            status_code: reply.status,
        })
    }
}

/// Placeholders become null and strings are cleaned; empty strings survive.
fn clean(value: Option<&str>) -> Value {
    match value {
        None | Some(PLACEHOLDER) => Value::Null,
        Some(v) => Value::String(clean_string_content(v)),
    }
}

fn raw(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

/// Flat document combining a submission with its linked post.
pub fn build_payload(submission: &FeedbackSubmission, post: Option<&SocialMediaPost>) -> Value {
    let details = post.map(|p| p.details().clone()).unwrap_or_default();
    let image_url = clean(post.and_then(|p| p.images().image_url.as_deref()));
    let uploaded_image_url = clean(post.and_then(|p| p.images().uploaded_image_url.as_deref()));

    let mut payload = Map::new();
    payload.insert("content_creator".into(), clean(details.content_creator.as_deref()));
    payload.insert("email".into(), raw(submission.email()));
    payload.insert("social_platforms".into(), clean(details.social_platform.as_deref()));
    payload.insert("custom_content".into(), clean(details.custom_content.as_deref()));
    payload.insert("ai_prompt".into(), clean(details.ai_prompt.as_deref()));
    payload.insert("excluded_llms".into(), clean(details.excluded_llms.as_deref()));
    payload.insert(
        "post_image_type".into(),
        clean(post.map(|p| p.post_image_type().as_str())),
    );
    payload.insert("image_url".into(), image_url.clone());
    payload.insert("uploaded_image_url".into(), uploaded_image_url.clone());
    payload.insert("ai_image_style".into(), clean(details.ai_image_style.as_deref()));
    payload.insert("ai_image_description".into(), clean(details.ai_image_description.as_deref()));
    payload.insert("status".into(), clean(post.map(|p| p.status().as_str())));

    payload.insert("n8n_execution_id".into(), raw(submission.n8n_execution_id()));
    payload.insert(
        "submission_id".into(),
        Value::String(submission.submission_id().to_string()),
    );

    for field in FeedbackField::ALL {
        match field {
            FeedbackField::N8nExecutionId
            | FeedbackField::Email
            | FeedbackField::ImageUrl
            | FeedbackField::UploadedImageUrl => continue,
            _ => {
                payload.insert(field.as_str().into(), clean(submission.field(field)));
            }
        }
    }

    payload.insert("feedback_image_url".into(), image_url);
    payload.insert("feedback_uploaded_image_url".into(), uploaded_image_url);
    payload.insert(
        "created_at".into(),
        submission
            .created_at()
            .map_or(Value::Null, |t| Value::String(t.to_rfc3339())),
    );
    payload.insert(
        "updated_at".into(),
        submission
            .updated_at()
            .map_or(Value::Null, |t| Value::String(t.to_rfc3339())),
    );

    let content = submission.content();
    payload.insert(
        "LinkedIn Image LLM".into(),
        Value::String(content.linkedin_image_llm.clone().unwrap_or_default()),
    );
    payload.insert(
        "Twitter Image LLM".into(),
        Value::String(content.twitter_image_llm.clone().unwrap_or_default()),
    );

    Value::Object(payload)
}

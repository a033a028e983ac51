use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{UpstreamError, WebhookClient, WebhookTarget};
use crate::application::services::text_cleaning::clean_webhook_value;
use crate::application::use_cases::create_feedback::feedback_form_link;
use crate::domain::entities::{FeedbackContent, FeedbackSubmission, PostDetails, SocialMediaPost};
use crate::domain::repositories::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::value_objects::{ImageFields, PostImageType, PostStatus};

/// Labels of the intake form as sent by the frontend.
pub mod labels {
    pub const CONTENT_CREATOR: &str = "Content Creator";
    pub const SOCIAL_PLATFORMS: &str = "Social Platforms";
    pub const CUSTOM_CONTENT: &str = "Custom Content?";
    pub const AI_PROMPT: &str = "AI Prompted Text Generation";
    pub const EXCLUDE_LLMS: &str = "Exclude LLMs";
    pub const POST_IMAGE: &str = "Post Image?";
    pub const IMAGE_URL: &str = "Image URL";
    pub const UPLOAD_IMAGE: &str = "Upload an Image";
    pub const LINKEDIN_IMAGE_LLM: &str = "LinkedIn Image LLM";
    pub const TWITTER_IMAGE_LLM: &str = "Twitter Image LLM";
    pub const FEEDBACK_FORM_URL: &str = "Feedback Form URL";
    pub const FEEDBACK_SUBMISSION_ID: &str = "Feedback Submission ID";
    pub const SOCIAL_MEDIA_POST_ID: &str = "Social Media Post ID";
}

pub const FORWARDED_MESSAGE: &str = "Webhook request forwarded successfully";

#[derive(Debug, Error)]
pub enum ProxyWebhookError {
    #[error("Webhook timeout")]
    Timeout,
    #[error("Webhook error: {0}")]
    Transport(String),
    #[error("N8n webhook error: {body}")]
    Upstream { status: u16, body: String },
}

impl From<UpstreamError> for ProxyWebhookError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::Timeout(_) => ProxyWebhookError::Timeout,
            UpstreamError::Status { status, body } => ProxyWebhookError::Upstream { status, body },
            other => ProxyWebhookError::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxyWebhookRequest {
    pub payload: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyWebhookResponse {
    pub message: String,
    pub feedback_form_link: Option<String>,
    pub feedback_submission_id: Option<String>,
    pub social_media_post_id: Option<String>,
}

pub struct ProxyWebhookUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
    webhook_client: Arc<dyn WebhookClient>,
    frontend_url: String,
}

impl ProxyWebhookUseCase {
    pub fn new(
        feedback_repository: Arc<dyn FeedbackRepository>,
        webhook_client: Arc<dyn WebhookClient>,
        frontend_url: String,
    ) -> Self {
        Self {
            feedback_repository,
            webhook_client,
            frontend_url,
        }
    }

    pub async fn execute(
        &self,
        request: ProxyWebhookRequest,
    ) -> Result<ProxyWebhookResponse, ProxyWebhookError> {
        let mut payload = request.payload;
        tracing::info!("Webhook proxy called with {} items", payload.len());

        let mut response = ProxyWebhookResponse {
            message: FORWARDED_MESSAGE.to_string(),
            ..ProxyWebhookResponse::default()
        };

        if let Some(Value::Object(form)) = payload.first_mut() {
            match self.record(form).await {
                Ok((submission, post)) => {
                    let link = feedback_form_link(&self.frontend_url, submission.submission_id());
                    tracing::info!("Created feedback entry {}", submission.submission_id());
                    tracing::info!("Created social media post {}", post.post_id());

                    enrich(form, &link, &submission, &post);
                    response.feedback_form_link = Some(link);
                    response.feedback_submission_id = Some(submission.submission_id().to_string());
                    response.social_media_post_id = Some(post.post_id().to_string());
                }
                Err(e) => {
                    tracing::error!("Failed to create database entries: {}", e);
                }
            }
        }

        let reply = self
            .webhook_client
            .send(WebhookTarget::Intake, &Value::Array(payload))
            .await
            .inspect_err(|e| tracing::error!("Forwarding webhook request failed: {}", e))?;

        tracing::info!(
            "Successfully forwarded webhook request to n8n (status {})",
            reply.status
        );
        Ok(response)
    }

    async fn record(
        &self,
        form: &Map<String, Value>,
    ) -> Result<(FeedbackSubmission, SocialMediaPost), FeedbackRepositoryError> {
        let field = |label: &str| clean_webhook_value(form_text(form, label).as_deref());

        let image_label = form_text(form, labels::POST_IMAGE);
        let image_type = PostImageType::from_label(image_label.as_deref());
        tracing::info!(
            "Post image radio selection {:?} determined as '{}'",
            image_label,
            image_type
        );

        let email = field(labels::CONTENT_CREATOR);
        let submission = FeedbackSubmission::new(FeedbackContent {
            n8n_execution_id: Some(format!("sm-{}", Uuid::new_v4())),
            email: email.clone(),
            ..FeedbackContent::default()
        });

        let details = PostDetails {
            content_creator: email.clone(),
            email,
            feedback_submission_id: Some(submission.submission_id().to_string()),
            social_platform: field(labels::SOCIAL_PLATFORMS),
            custom_content: field(labels::CUSTOM_CONTENT),
            ai_prompt: field(labels::AI_PROMPT),
            excluded_llms: field(labels::EXCLUDE_LLMS),
            linkedin_image_llm: field(labels::LINKEDIN_IMAGE_LLM),
            twitter_image_llm: field(labels::TWITTER_IMAGE_LLM),
            ..PostDetails::default()
        };

        // Only the field named by the selection is taken from the form.
        let images = match image_type {
            PostImageType::ImageUrl => ImageFields::new(field(labels::IMAGE_URL), None),
            PostImageType::UploadImage => ImageFields::new(None, field(labels::UPLOAD_IMAGE)),
            _ => ImageFields::default(),
        };

        let post = SocialMediaPost::new(details, image_type, images, Some(PostStatus::Pending));
        self.feedback_repository
            .save_with_post(&submission, &post)
            .await
    }
}

/// Text of a form value. Checkbox groups arrive as arrays and are joined.
fn form_text(form: &Map<String, Value>, label: &str) -> Option<String> {
    match form.get(label)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

fn enrich(
    form: &mut Map<String, Value>,
    link: &str,
    submission: &FeedbackSubmission,
    post: &SocialMediaPost,
) {
    let text = |value: Option<&str>| value.map_or(Value::Null, |v| Value::String(v.to_string()));
    let details = post.details();

    form.insert(labels::FEEDBACK_FORM_URL.to_string(), Value::String(link.to_string()));
    form.insert(
        labels::FEEDBACK_SUBMISSION_ID.to_string(),
        Value::String(submission.submission_id().to_string()),
    );
    form.insert(
        labels::SOCIAL_MEDIA_POST_ID.to_string(),
        Value::String(post.post_id().to_string()),
    );
    form.insert(
        labels::LINKEDIN_IMAGE_LLM.to_string(),
        text(details.linkedin_image_llm.as_deref()),
    );
    form.insert(
        labels::TWITTER_IMAGE_LLM.to_string(),
        text(details.twitter_image_llm.as_deref()),
    );
    form.insert(labels::IMAGE_URL.to_string(), text(post.images().image_url.as_deref()));
    form.insert(
        labels::UPLOAD_IMAGE.to_string(),
        text(post.images().uploaded_image_url.as_deref()),
    );

    for value in form.values_mut() {
        if let Value::String(s) = value {
            *value = text(clean_webhook_value(Some(s)).as_deref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryFeedbackRepository, RecordingWebhookClient};
    use serde_json::json;

    fn form() -> Value {
        json!([{
            "Content Creator": "a@b.com",
            "Social Platforms": ["LinkedIn", "X"],
            "Post Image?": "Yes, I have an image URL",
            "Image URL": "http://x/y.jpg",
            "Upload an Image": "\"http://u/z.jpg\"",
            "Custom Content?": "string",
            "LinkedIn Image LLM": "'Stable Diffusion'"
        }])
    }

    fn use_case(
        repository: Arc<InMemoryFeedbackRepository>,
        client: Arc<RecordingWebhookClient>,
    ) -> ProxyWebhookUseCase {
        ProxyWebhookUseCase::new(repository, client, "http://front".to_string())
    }

    fn payload(value: Value) -> ProxyWebhookRequest {
        ProxyWebhookRequest {
            payload: value.as_array().cloned().unwrap_or_default(),
        }
    }

    #[tokio::test]
    async fn test_records_submission_and_post_then_forwards() {
        let repository = Arc::new(InMemoryFeedbackRepository::default());
        let client = Arc::new(RecordingWebhookClient::ok());
        let response = use_case(repository.clone(), client.clone())
            .execute(payload(form()))
            .await
            .unwrap();

        let submission_id = response.feedback_submission_id.clone().unwrap();
        let post_id = response.social_media_post_id.clone().unwrap();
        assert_eq!(
            response.feedback_form_link.as_deref(),
            Some(format!("http://front/feedback/{submission_id}").as_str())
        );

        let submission = repository.get(&submission_id).unwrap();
        assert!(submission.n8n_execution_id().unwrap().starts_with("sm-"));
        assert_eq!(submission.email(), Some("a@b.com"));

        let post = repository.linked_post(&submission_id).unwrap();
        assert_eq!(post.post_id(), post_id);
        assert_eq!(post.post_image_type(), &PostImageType::ImageUrl);
        assert_eq!(post.images().image_url.as_deref(), Some("http://x/y.jpg"));
        assert_eq!(post.images().uploaded_image_url, None);
        assert_eq!(post.details().social_platform.as_deref(), Some("LinkedIn, X"));
        assert_eq!(post.details().custom_content, None);
        assert_eq!(post.details().linkedin_image_llm.as_deref(), Some("Stable Diffusion"));

        let (target, sent) = client.last().unwrap();
        assert_eq!(target, WebhookTarget::Intake);
        let sent = &sent[0];
        assert_eq!(sent["Feedback Submission ID"], json!(submission_id));
        assert_eq!(sent["Social Media Post ID"], json!(post_id));
        assert_eq!(sent["Image URL"], json!("http://x/y.jpg"));
        assert_eq!(sent["Upload an Image"], Value::Null);
        assert_eq!(sent["Custom Content?"], Value::Null);
        assert_eq!(sent["Twitter Image LLM"], Value::Null);
        assert_eq!(sent["LinkedIn Image LLM"], json!("Stable Diffusion"));
    }

    #[tokio::test]
    async fn test_persistence_failure_forwards_original_payload() {
        let repository = Arc::new(InMemoryFeedbackRepository::failing());
        let client = Arc::new(RecordingWebhookClient::ok());
        let response = use_case(repository, client.clone())
            .execute(payload(form()))
            .await
            .unwrap();

        assert_eq!(response.feedback_submission_id, None);
        assert_eq!(response.social_media_post_id, None);
        assert_eq!(client.last().unwrap().1, form());
    }

    #[tokio::test]
    async fn test_non_object_payload_is_forwarded_untouched() {
        let repository = Arc::new(InMemoryFeedbackRepository::default());
        let client = Arc::new(RecordingWebhookClient::ok());
        let response = use_case(repository.clone(), client.clone())
            .execute(payload(json!(["plain"])))
            .await
            .unwrap();

        assert_eq!(response.feedback_form_link, None);
        assert_eq!(repository.len(), 0);
        assert_eq!(client.last().unwrap().1, json!(["plain"]));
    }

    #[tokio::test]
    async fn test_upstream_errors_are_mapped() {
        let cases = [
            (UpstreamError::Timeout("slow".to_string()), 408),
            (UpstreamError::Transport("refused".to_string()), 502),
            (
                UpstreamError::Status {
                    status: 404,
                    body: "no workflow".to_string(),
                },
                404,
            ),
        ];

        for (error, expected) in cases {
            let client = Arc::new(RecordingWebhookClient::failing(error));
            let result = use_case(Arc::new(InMemoryFeedbackRepository::default()), client)
                .execute(payload(form()))
                .await;
            let status = match result {
                Err(ProxyWebhookError::Timeout) => 408,
                Err(ProxyWebhookError::Transport(_)) => 502,
                Err(ProxyWebhookError::Upstream { status, .. }) => status,
                Ok(_) => 200,
            };
            assert_eq!(status, expected);
        }
    }
}

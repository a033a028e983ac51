use std::sync::Arc;

use thiserror::Error;

use crate::application::services::text_cleaning::{clean_form_value, log_escape_characters};
use crate::domain::entities::{FeedbackContent, FeedbackSubmission};
use crate::domain::repositories::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::value_objects::FeedbackField;

pub const CREATED_MESSAGE: &str =
    "Feedback submission was stored successfully! You can provide feedback using the link above.";

#[derive(Debug, Error)]
pub enum CreateFeedbackError {
    #[error("Database integrity error: {0}")]
    Integrity(String),
    #[error("Database error: {0}")]
    Repository(String),
}

impl From<FeedbackRepositoryError> for CreateFeedbackError {
    fn from(error: FeedbackRepositoryError) -> Self {
        match error {
            FeedbackRepositoryError::IntegrityError(msg) => CreateFeedbackError::Integrity(msg),
            other => CreateFeedbackError::Repository(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateFeedbackRequest {
    pub content: FeedbackContent,
}

#[derive(Debug, Clone)]
pub struct CreateFeedbackResponse {
    pub submission: FeedbackSubmission,
    pub feedback_form_link: String,
    pub message: String,
}

/// Builds the reviewer-facing form link for a submission.
pub fn feedback_form_link(frontend_url: &str, submission_id: &str) -> String {
    format!("{}/feedback/{}", frontend_url.trim_end_matches('/'), submission_id)
}

pub struct CreateFeedbackUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
    frontend_url: String,
}

impl CreateFeedbackUseCase {
    pub fn new(feedback_repository: Arc<dyn FeedbackRepository>, frontend_url: String) -> Self {
        Self {
            feedback_repository,
            frontend_url,
        }
    }

    pub async fn execute(
        &self,
        request: CreateFeedbackRequest,
    ) -> Result<CreateFeedbackResponse, CreateFeedbackError> {
        let raw = request.content;
        tracing::info!(
            "Creating feedback submission for execution_id: {:?}",
            raw.n8n_execution_id
        );
        log_escape_characters(
            "CREATE_FEEDBACK",
            raw.entries()
                .filter_map(|(field, value)| value.map(|v| (field.as_str(), v))),
        );

        let mut content = FeedbackContent::default();
        for field in FeedbackField::ALL {
            content.set_field(field, clean_form_value(raw.field(field)));
        }

        let submission = FeedbackSubmission::new(content);
        for category in submission.conflicting_feedback_categories() {
            tracing::warn!(
                "Submission {} has more than one feedback method for {}",
                submission.submission_id(),
                category
            );
        }

        let stored = self.feedback_repository.save(&submission).await?;
        tracing::info!(
            "Successfully created feedback submission with ID: {}",
            stored.submission_id()
        );

        Ok(CreateFeedbackResponse {
            feedback_form_link: feedback_form_link(&self.frontend_url, stored.submission_id()),
            submission: stored,
            message: CREATED_MESSAGE.to_string(),
        })
    }
}

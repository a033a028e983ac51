use std::sync::Arc;

use thiserror::Error;

use crate::application::services::text_cleaning::{
    clean_form_value, log_escape_characters, strip_quotes,
};
use crate::application::use_cases::get_feedback::overlay_linked_post_images;
use crate::domain::entities::{ExecutionIdPolicy, FeedbackPatch, FeedbackSubmission};
use crate::domain::repositories::{
    FeedbackRepository, FeedbackRepositoryError, PostRepository, PostRepositoryError,
};
use crate::domain::value_objects::FeedbackField;

#[derive(Debug, Error)]
pub enum UpdateFeedbackError {
    #[error("Feedback submission not found")]
    NotFound(String),
    #[error("Database integrity error: {0}")]
    Integrity(String),
    #[error("Database error: {0}")]
    Repository(String),
}

impl From<FeedbackRepositoryError> for UpdateFeedbackError {
    fn from(error: FeedbackRepositoryError) -> Self {
        match error {
            FeedbackRepositoryError::NotFound(id) => UpdateFeedbackError::NotFound(id),
            FeedbackRepositoryError::IntegrityError(msg) => UpdateFeedbackError::Integrity(msg),
            other => UpdateFeedbackError::Repository(other.to_string()),
        }
    }
}

impl From<PostRepositoryError> for UpdateFeedbackError {
    fn from(error: PostRepositoryError) -> Self {
        UpdateFeedbackError::Repository(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateFeedbackRequest {
    pub submission_id: String,
    /// Only the keys the client actually sent.
    pub patch: FeedbackPatch,
}

#[derive(Debug, Clone)]
pub struct UpdateFeedbackResponse {
    pub submission: FeedbackSubmission,
    pub updated_fields: Vec<FeedbackField>,
}

pub struct UpdateFeedbackUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
    post_repository: Arc<dyn PostRepository>,
}

impl UpdateFeedbackUseCase {
    pub fn new(
        feedback_repository: Arc<dyn FeedbackRepository>,
        post_repository: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            feedback_repository,
            post_repository,
        }
    }

    pub async fn execute(
        &self,
        request: UpdateFeedbackRequest,
    ) -> Result<UpdateFeedbackResponse, UpdateFeedbackError> {
        tracing::info!("Updating feedback submission with ID: {}", request.submission_id);

        let mut submission = self
            .feedback_repository
            .find_by_submission_id(&request.submission_id)
            .await?
            .ok_or_else(|| UpdateFeedbackError::NotFound(request.submission_id.clone()))?;

        let patch = clean_patch(request.patch);
        tracing::info!("Fields to update: {:?}", patch.fields());

        let updated_fields = if patch.is_empty() {
            Vec::new()
        } else {
            log_escape_characters(
                "UPDATE_FEEDBACK",
                patch
                    .iter()
                    .filter_map(|(field, value)| value.as_deref().map(|v| (field.as_str(), v))),
            );
            let (patched, written) = self
                .feedback_repository
                .apply_patch(&request.submission_id, &patch, ExecutionIdPolicy::Overwrite)
                .await?;
            submission = patched;
            for category in submission.conflicting_feedback_categories() {
                tracing::warn!(
                    "Submission {} has more than one feedback method for {}",
                    submission.submission_id(),
                    category
                );
            }
            written
        };

        overlay_linked_post_images(self.post_repository.as_ref(), &mut submission).await?;

        Ok(UpdateFeedbackResponse {
            submission,
            updated_fields,
        })
    }
}

/// Email is quote-stripped and dropped when blank; everything else goes
/// through form cleaning.
fn clean_patch(mut patch: FeedbackPatch) -> FeedbackPatch {
    let email = patch.remove(FeedbackField::Email);

    let mut cleaned = FeedbackPatch::new();
    for (field, value) in patch.iter() {
        cleaned.set(*field, clean_form_value(value.as_deref()));
    }

    match email {
        Some(Some(raw)) => {
            let email = strip_quotes(&raw).trim();
            if email.is_empty() {
                tracing::warn!("Email field is empty after cleaning, removing from update data");
            } else {
                cleaned.set(FeedbackField::Email, Some(email.to_string()));
            }
        }
        Some(None) => {
            tracing::warn!("Email field is null, removing from update data");
        }
        None => {}
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FeedbackContent;
    use crate::test_support::{InMemoryFeedbackRepository, InMemoryPostRepository};

    async fn setup() -> (UpdateFeedbackUseCase, String) {
        let feedback = Arc::new(InMemoryFeedbackRepository::default());
        let stored = feedback
            .save(&FeedbackSubmission::new(FeedbackContent {
                n8n_execution_id: Some("exec-1".to_string()),
                email: Some("a@b.com".to_string()),
                ..FeedbackContent::default()
            }))
            .await
            .unwrap();
        let use_case =
            UpdateFeedbackUseCase::new(feedback, Arc::new(InMemoryPostRepository::default()));
        (use_case, stored.submission_id().to_string())
    }

    #[tokio::test]
    async fn test_only_supplied_fields_change() {
        let (use_case, submission_id) = setup().await;
        let mut patch = FeedbackPatch::new();
        patch.set(FeedbackField::XFeedback, Some("'punchier'".to_string()));
        patch.set(FeedbackField::LinkedinChosenLlm, Some("string".to_string()));

        let response = use_case
            .execute(UpdateFeedbackRequest {
                submission_id,
                patch,
            })
            .await
            .unwrap();

        let content = response.submission.content();
        assert_eq!(content.x.feedback.as_deref(), Some("punchier"));
        assert_eq!(content.linkedin.chosen_llm, None);
        assert_eq!(content.email.as_deref(), Some("a@b.com"));
        assert!(response.submission.updated_at().is_some());
    }

    #[tokio::test]
    async fn test_blank_email_is_ignored() {
        let (use_case, submission_id) = setup().await;
        let mut patch = FeedbackPatch::new();
        patch.set(FeedbackField::Email, Some("\"\"".to_string()));

        let response = use_case
            .execute(UpdateFeedbackRequest {
                submission_id,
                patch,
            })
            .await
            .unwrap();

        assert_eq!(response.submission.email(), Some("a@b.com"));
        assert!(response.updated_fields.is_empty());
        assert_eq!(response.submission.updated_at(), None);
    }

    #[tokio::test]
    async fn test_typed_update_overwrites_execution_id() {
        let (use_case, submission_id) = setup().await;
        let mut patch = FeedbackPatch::new();
        patch.set(FeedbackField::N8nExecutionId, Some("exec-2".to_string()));

        let response = use_case
            .execute(UpdateFeedbackRequest {
                submission_id,
                patch,
            })
            .await
            .unwrap();
        assert_eq!(response.submission.n8n_execution_id(), Some("exec-2"));
    }

    #[tokio::test]
    async fn test_unknown_submission() {
        let (use_case, _) = setup().await;
        let result = use_case
            .execute(UpdateFeedbackRequest {
                submission_id: "missing".to_string(),
                patch: FeedbackPatch::new(),
            })
            .await;
        assert!(matches!(result, Err(UpdateFeedbackError::NotFound(_))));
    }
}

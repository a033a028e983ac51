use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::FeedbackSubmission;
use crate::domain::repositories::{
    FeedbackRepository, FeedbackRepositoryError, PostRepository, PostRepositoryError,
};

#[derive(Debug, Error)]
pub enum GetFeedbackError {
    #[error("Feedback submission not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    RepositoryError(String),
}

impl From<FeedbackRepositoryError> for GetFeedbackError {
    fn from(error: FeedbackRepositoryError) -> Self {
        match error {
            FeedbackRepositoryError::NotFound(id) => GetFeedbackError::NotFound(id),
            other => GetFeedbackError::RepositoryError(other.to_string()),
        }
    }
}

impl From<PostRepositoryError> for GetFeedbackError {
    fn from(error: PostRepositoryError) -> Self {
        GetFeedbackError::RepositoryError(error.to_string())
    }
}

/// Replaces the submission's delivery image fields with those of its linked
/// post. Submissions without a post are left untouched.
pub async fn overlay_linked_post_images(
    post_repository: &dyn PostRepository,
    submission: &mut FeedbackSubmission,
) -> Result<(), PostRepositoryError> {
    match post_repository
        .find_by_submission_id(submission.submission_id())
        .await?
    {
        Some(post) => {
            tracing::debug!(
                "Using image fields of post {} for submission {}",
                post.post_id(),
                submission.submission_id()
            );
            submission.overlay_images(post.images().clone());
        }
        None => {
            tracing::debug!(
                "No social media post linked to submission {}",
                submission.submission_id()
            );
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GetFeedbackRequest {
    pub submission_id: String,
}

#[derive(Debug, Clone)]
pub struct GetFeedbackResponse {
    pub submission: FeedbackSubmission,
}

pub struct GetFeedbackUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
    post_repository: Arc<dyn PostRepository>,
}

impl GetFeedbackUseCase {
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
        request: GetFeedbackRequest,
    ) -> Result<GetFeedbackResponse, GetFeedbackError> {
        let mut submission = self
            .feedback_repository
            .find_by_submission_id(&request.submission_id)
            .await?
            .ok_or_else(|| GetFeedbackError::NotFound(request.submission_id.clone()))?;

        overlay_linked_post_images(self.post_repository.as_ref(), &mut submission).await?;

        Ok(GetFeedbackResponse { submission })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FeedbackContent, PostDetails, SocialMediaPost};
    use crate::domain::value_objects::{ImageFields, PostImageType};
    use crate::test_support::{InMemoryFeedbackRepository, InMemoryPostRepository};

    fn submission_with_image(url: &str) -> FeedbackSubmission {
        let mut content = FeedbackContent::default();
        content.delivery.image_url = Some(url.to_string());
        FeedbackSubmission::new(content)
    }

    #[tokio::test]
    async fn test_missing_submission_is_not_found() {
        let use_case = GetFeedbackUseCase::new(
            Arc::new(InMemoryFeedbackRepository::default()),
            Arc::new(InMemoryPostRepository::default()),
        );

        let result = use_case
            .execute(GetFeedbackRequest {
                submission_id: "nope".to_string(),
            })
            .await;
        assert!(matches!(result, Err(GetFeedbackError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stored_images_kept_without_linked_post() {
        let feedback = Arc::new(InMemoryFeedbackRepository::default());
        let stored = feedback
            .save(&submission_with_image("http://own/img.png"))
            .await
            .unwrap();
        let use_case =
            GetFeedbackUseCase::new(feedback, Arc::new(InMemoryPostRepository::default()));

        let response = use_case
            .execute(GetFeedbackRequest {
                submission_id: stored.submission_id().to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.submission, stored);
    }

    #[tokio::test]
    async fn test_linked_post_images_take_precedence() {
        let feedback = Arc::new(InMemoryFeedbackRepository::default());
        let posts = Arc::new(InMemoryPostRepository::default());
        let stored = feedback
            .save(&submission_with_image("http://own/img.png"))
            .await
            .unwrap();
        let post = SocialMediaPost::new(
            PostDetails {
                feedback_submission_id: Some(stored.submission_id().to_string()),
                ..PostDetails::default()
            },
            PostImageType::UploadImage,
            ImageFields::new(None, Some("http://upload/a.png".to_string())),
            None,
        );
        posts.save(&post).await.unwrap();

        let use_case = GetFeedbackUseCase::new(feedback, posts);
        let response = use_case
            .execute(GetFeedbackRequest {
                submission_id: stored.submission_id().to_string(),
            })
            .await
            .unwrap();

        let images = response.submission.image_fields();
        assert_eq!(images.image_url, None);
        assert_eq!(images.uploaded_image_url.as_deref(), Some("http://upload/a.png"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GetFeedbackError::NotFound("abc".to_string()).to_string(),
            "Feedback submission not found"
        );
        let from_repository = GetFeedbackError::from(FeedbackRepositoryError::DatabaseError(
            "down".to_string(),
        ));
        assert_eq!(from_repository.to_string(), "Database error: Database error: down");
    }
}

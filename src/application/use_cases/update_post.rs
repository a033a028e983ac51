use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::{PostPatch, SocialMediaPost};
use crate::domain::repositories::{PostRepository, PostRepositoryError};

#[derive(Debug, Error)]
pub enum UpdatePostError {
    #[error("Social media post not found")]
    NotFound(String),
    #[error("Database integrity error: {0}")]
    Integrity(String),
    #[error("Database error: {0}")]
    Repository(String),
}

impl From<PostRepositoryError> for UpdatePostError {
    fn from(error: PostRepositoryError) -> Self {
        match error {
            PostRepositoryError::NotFound(id) => UpdatePostError::NotFound(id),
            PostRepositoryError::IntegrityError(msg) => UpdatePostError::Integrity(msg),
            other => UpdatePostError::Repository(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePostRequest {
    pub post_id: String,
    pub patch: PostPatch,
}

#[derive(Debug, Clone)]
pub struct UpdatePostResponse {
    pub post: SocialMediaPost,
}

pub struct UpdatePostUseCase {
    post_repository: Arc<dyn PostRepository>,
}

impl UpdatePostUseCase {
    pub fn new(post_repository: Arc<dyn PostRepository>) -> Self {
        Self { post_repository }
    }

    pub async fn execute(
        &self,
        request: UpdatePostRequest,
    ) -> Result<UpdatePostResponse, UpdatePostError> {
        tracing::info!("Updating social media post with ID: {}", request.post_id);

        let mut post = self
            .post_repository
            .find_by_post_id(&request.post_id)
            .await?
            .ok_or_else(|| UpdatePostError::NotFound(request.post_id.clone()))?;

        if request.patch == PostPatch::default() {
            tracing::info!("No fields to update for post ID: {}", request.post_id);
            return Ok(UpdatePostResponse { post });
        }

        post.apply_patch(request.patch);
        let post = self.post_repository.update(&post).await?;

        tracing::info!(
            "Successfully updated social media post with ID: {}",
            request.post_id
        );
        Ok(UpdatePostResponse { post })
    }
}

use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::{PostDetails, SocialMediaPost};
use crate::domain::repositories::{PostRepository, PostRepositoryError};
use crate::domain::value_objects::{ImageFields, PostImageType, PostStatus};

#[derive(Debug, Error)]
pub enum CreatePostError {
    #[error("Database integrity error: {0}")]
    Integrity(String),
    #[error("Database error: {0}")]
    Repository(String),
}

impl From<PostRepositoryError> for CreatePostError {
    fn from(error: PostRepositoryError) -> Self {
        match error {
            PostRepositoryError::IntegrityError(msg) => CreatePostError::Integrity(msg),
            other => CreatePostError::Repository(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostRequest {
    pub details: PostDetails,
    /// Free-form label; normalized before storage.
    pub post_image_type: Option<String>,
    pub image_url: Option<String>,
    pub uploaded_image_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePostResponse {
    pub post: SocialMediaPost,
}

pub struct CreatePostUseCase {
    post_repository: Arc<dyn PostRepository>,
}

impl CreatePostUseCase {
    pub fn new(post_repository: Arc<dyn PostRepository>) -> Self {
        Self { post_repository }
    }

    pub async fn execute(
        &self,
        request: CreatePostRequest,
    ) -> Result<CreatePostResponse, CreatePostError> {
        tracing::info!(
            "Creating social media post for creator: {:?}",
            request.details.content_creator
        );

        let image_type = PostImageType::from_label(request.post_image_type.as_deref());
        tracing::info!("Determined post_image_type: {}", image_type);

        let post = SocialMediaPost::new(
            request.details,
            image_type,
            ImageFields::new(request.image_url, request.uploaded_image_url),
            request.status.map(PostStatus::from),
        );
        let stored = self.post_repository.save(&post).await?;

        tracing::info!(
            "Successfully created social media post with ID: {}",
            stored.post_id()
        );
        Ok(CreatePostResponse { post: stored })
    }
}

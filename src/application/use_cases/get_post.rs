use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::SocialMediaPost;
use crate::domain::repositories::{PostRepository, PostRepositoryError};

#[derive(Debug, Error)]
pub enum GetPostError {
    #[error("Social media post not found")]
    PostNotFound(String),
    #[error("Database error: {0}")]
    RepositoryError(String),
}

impl From<PostRepositoryError> for GetPostError {
    fn from(error: PostRepositoryError) -> Self {
        match error {
            PostRepositoryError::NotFound(id) => GetPostError::PostNotFound(id),
            other => GetPostError::RepositoryError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetPostRequest {
    pub post_id: String,
}

#[derive(Debug, Clone)]
pub struct GetPostResponse {
    pub post: SocialMediaPost,
}

pub struct GetPostUseCase {
    post_repository: Arc<dyn PostRepository>,
}

impl GetPostUseCase {
    pub fn new(post_repository: Arc<dyn PostRepository>) -> Self {
        Self { post_repository }
    }

    pub async fn execute(&self, request: GetPostRequest) -> Result<GetPostResponse, GetPostError> {
        let post = self
            .post_repository
            .find_by_post_id(&request.post_id)
            .await?
            .ok_or(GetPostError::PostNotFound(request.post_id))?;

        Ok(GetPostResponse { post })
    }
}

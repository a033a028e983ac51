use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::SocialMediaPost;

#[derive(Debug, Error)]
pub enum PostRepositoryError {
    #[error("Social media post not found: {0}")]
    NotFound(String),
    #[error("Integrity error: {0}")]
    IntegrityError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn save(&self, post: &SocialMediaPost) -> Result<SocialMediaPost, PostRepositoryError>;
    async fn find_by_post_id(
        &self,
        post_id: &str,
    ) -> Result<Option<SocialMediaPost>, PostRepositoryError>;
    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
        status: Option<&str>,
    ) -> Result<Vec<SocialMediaPost>, PostRepositoryError>;
    async fn find_by_creator(
        &self,
        content_creator: &str,
    ) -> Result<Vec<SocialMediaPost>, PostRepositoryError>;
    /// The post linked to a feedback submission, if any.
    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<SocialMediaPost>, PostRepositoryError>;
    async fn update(&self, post: &SocialMediaPost) -> Result<SocialMediaPost, PostRepositoryError>;
    async fn delete(&self, post_id: &str) -> Result<bool, PostRepositoryError>;
}

use std::sync::Arc;

use thiserror::Error;

use crate::domain::repositories::{PostRepository, PostRepositoryError};

#[derive(Debug, Error)]
pub enum DeletePostError {
    #[error("Social media post not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Repository(#[from] PostRepositoryError),
}

#[derive(Debug, Clone)]
pub struct DeletePostRequest {
    pub post_id: String,
}

pub struct DeletePostUseCase {
    post_repository: Arc<dyn PostRepository>,
}

impl DeletePostUseCase {
    pub fn new(post_repository: Arc<dyn PostRepository>) -> Self {
        Self { post_repository }
    }

    pub async fn execute(&self, request: DeletePostRequest) -> Result<(), DeletePostError> {
        tracing::info!("Deleting social media post with ID: {}", request.post_id);

        if !self.post_repository.delete(&request.post_id).await? {
            tracing::warn!("Social media post not found with ID: {}", request.post_id);
            return Err(DeletePostError::NotFound(request.post_id));
        }

        tracing::info!("Successfully deleted social media post with ID: {}", request.post_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PostDetails, SocialMediaPost};
    use crate::domain::value_objects::{ImageFields, PostImageType};
    use crate::test_support::InMemoryPostRepository;

    #[tokio::test]
    async fn test_delete_twice() {
        let repository = Arc::new(InMemoryPostRepository::default());
        let post = SocialMediaPost::new(
            PostDetails::default(),
            PostImageType::NoImageNeeded,
            ImageFields::default(),
            None,
        );
        let stored = repository.save(&post).await.unwrap();
        let use_case = DeletePostUseCase::new(repository);

        let request = DeletePostRequest {
            post_id: stored.post_id().to_string(),
        };
        assert!(use_case.execute(request.clone()).await.is_ok());
        assert!(matches!(
            use_case.execute(request).await,
            Err(DeletePostError::NotFound(_))
        ));
    }
}

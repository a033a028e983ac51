use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::SocialMediaPost;
use crate::domain::repositories::{PostRepository, PostRepositoryError};

#[derive(Debug, Error)]
pub enum ListPostsError {
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    #[error("Database error: {0}")]
    Repository(#[from] PostRepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All {
        skip: i64,
        limit: i64,
        status: Option<String>,
    },
    ByCreator(String),
}

#[derive(Debug, Clone)]
pub struct ListPostsRequest {
    pub filter: PostFilter,
}

#[derive(Debug, Clone)]
pub struct ListPostsResponse {
    pub posts: Vec<SocialMediaPost>,
}

pub struct ListPostsUseCase {
    post_repository: Arc<dyn PostRepository>,
}

impl ListPostsUseCase {
    pub fn new(post_repository: Arc<dyn PostRepository>) -> Self {
        Self { post_repository }
    }

    pub async fn execute(
        &self,
        request: ListPostsRequest,
    ) -> Result<ListPostsResponse, ListPostsError> {
        let posts = match request.filter {
            PostFilter::All {
                skip,
                limit,
                status,
            } => {
                if skip < 0 || limit < 0 {
                    return Err(ListPostsError::InvalidPagination(
                        "skip and limit must not be negative".to_string(),
                    ));
                }
                // An empty status means no filter.
                let status = status.filter(|s| !s.is_empty());
                self.post_repository
                    .find_all(skip, limit, status.as_deref())
                    .await?
            }
            PostFilter::ByCreator(creator) => self.post_repository.find_by_creator(&creator).await?,
        };

        tracing::info!("Successfully retrieved {} social media posts", posts.len());
        Ok(ListPostsResponse { posts })
    }
}

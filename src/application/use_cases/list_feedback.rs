use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::FeedbackSubmission;
use crate::domain::repositories::{FeedbackRepository, FeedbackRepositoryError};

pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Error)]
pub enum ListFeedbackError {
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    #[error("Database error: {0}")]
    Repository(#[from] FeedbackRepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackFilter {
    All { skip: i64, limit: i64 },
    ByExecutionId(String),
}

#[derive(Debug, Clone)]
pub struct ListFeedbackRequest {
    pub filter: FeedbackFilter,
}

#[derive(Debug, Clone)]
pub struct ListFeedbackResponse {
    pub submissions: Vec<FeedbackSubmission>,
}

pub struct ListFeedbackUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
}

impl ListFeedbackUseCase {
    pub fn new(feedback_repository: Arc<dyn FeedbackRepository>) -> Self {
        Self {
            feedback_repository,
        }
    }

    pub async fn execute(
        &self,
        request: ListFeedbackRequest,
    ) -> Result<ListFeedbackResponse, ListFeedbackError> {
        let submissions = match request.filter {
            FeedbackFilter::All { skip, limit } => {
                if skip < 0 || limit < 0 {
                    return Err(ListFeedbackError::InvalidPagination(
                        "skip and limit must not be negative".to_string(),
                    ));
                }
                self.feedback_repository.find_all(skip, limit).await?
            }
            FeedbackFilter::ByExecutionId(execution_id) => {
                self.feedback_repository
                    .find_by_execution_id(&execution_id)
                    .await?
            }
        };

        tracing::info!("Found {} feedback submissions", submissions.len());
        Ok(ListFeedbackResponse { submissions })
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{
    ExecutionIdPolicy, FeedbackPatch, FeedbackSubmission, SocialMediaPost,
};
use crate::domain::value_objects::FeedbackField;

#[derive(Debug, Error)]
pub enum FeedbackRepositoryError {
    #[error("Feedback submission not found: {0}")]
    NotFound(String),
    #[error("Integrity error: {0}")]
    IntegrityError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn save(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackSubmission, FeedbackRepositoryError>;

    /// Stores a submission and its post atomically; neither row survives a
    /// failure of the other.
    async fn save_with_post(
        &self,
        submission: &FeedbackSubmission,
        post: &SocialMediaPost,
    ) -> Result<(FeedbackSubmission, SocialMediaPost), FeedbackRepositoryError>;

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<FeedbackSubmission>, FeedbackRepositoryError>;

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackRepositoryError>;

    async fn find_by_execution_id(
        &self,
        execution_id: &str,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackRepositoryError>;

    /// Applies `patch` to the stored row while holding it locked, so
    /// concurrent patches and the execution-id rule see each other's writes.
    /// Returns the stored submission and the fields that were written.
    async fn apply_patch(
        &self,
        submission_id: &str,
        patch: &FeedbackPatch,
        policy: ExecutionIdPolicy,
    ) -> Result<(FeedbackSubmission, Vec<FeedbackField>), FeedbackRepositoryError>;
}

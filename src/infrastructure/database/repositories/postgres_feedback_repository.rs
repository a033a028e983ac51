use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::is_integrity_violation;
use crate::domain::entities::{
    ExecutionIdPolicy, FeedbackPatch, FeedbackSubmission, SocialMediaPost,
};
use crate::domain::repositories::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::value_objects::FeedbackField;
use crate::infrastructure::database::models::{
    FeedbackSubmissionModel, NewFeedbackSubmissionModel, NewSocialMediaPostModel,
    SocialMediaPostModel,
};
use crate::infrastructure::database::schema::{feedback_submissions, social_media_posts};
use crate::infrastructure::database::{Database, DbConnection};

pub struct PostgresFeedbackRepository {
    database: Arc<Database>,
}

impl PostgresFeedbackRepository {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    fn get_connection(&self) -> Result<DbConnection, FeedbackRepositoryError> {
        self.database.connection().map_err(|e| {
            FeedbackRepositoryError::DatabaseError(format!(
                "Failed to get database connection: {}",
                e
            ))
        })
    }
}

fn write_error(action: &str, e: diesel::result::Error) -> FeedbackRepositoryError {
    if is_integrity_violation(&e) {
        FeedbackRepositoryError::IntegrityError(format!("Failed to {}: {}", action, e))
    } else {
        FeedbackRepositoryError::DatabaseError(format!("Failed to {}: {}", action, e))
    }
}

fn join_error(e: tokio::task::JoinError) -> FeedbackRepositoryError {
    FeedbackRepositoryError::DatabaseError(format!("Task join error: {}", e))
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn save(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackSubmission, FeedbackRepositoryError> {
        let new_submission = NewFeedbackSubmissionModel::from(submission);
        let mut conn = self.get_connection()?;

        let model = tokio::task::spawn_blocking(move || {
            diesel::insert_into(feedback_submissions::table)
                .values(&new_submission)
                .returning(FeedbackSubmissionModel::as_returning())
                .get_result::<FeedbackSubmissionModel>(&mut conn)
                .map_err(|e| write_error("save feedback submission", e))
        })
        .await
        .map_err(join_error)??;

        Ok(FeedbackSubmission::from(model))
    }

    async fn save_with_post(
        &self,
        submission: &FeedbackSubmission,
        post: &SocialMediaPost,
    ) -> Result<(FeedbackSubmission, SocialMediaPost), FeedbackRepositoryError> {
        let new_submission = NewFeedbackSubmissionModel::from(submission);
        let new_post = NewSocialMediaPostModel::from(post);
        let mut conn = self.get_connection()?;

        let (submission_model, post_model) = tokio::task::spawn_blocking(move || {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                let submission = diesel::insert_into(feedback_submissions::table)
                    .values(&new_submission)
                    .returning(FeedbackSubmissionModel::as_returning())
                    .get_result::<FeedbackSubmissionModel>(conn)?;
                let post = diesel::insert_into(social_media_posts::table)
                    .values(&new_post)
                    .returning(SocialMediaPostModel::as_returning())
                    .get_result::<SocialMediaPostModel>(conn)?;
                Ok((submission, post))
            })
            .map_err(|e| write_error("save submission with post", e))
        })
        .await
        .map_err(join_error)??;

        Ok((
            FeedbackSubmission::from(submission_model),
            SocialMediaPost::from(post_model),
        ))
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<FeedbackSubmission>, FeedbackRepositoryError> {
        let submission_id = submission_id.to_string();
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            feedback_submissions::table
                .filter(feedback_submissions::submission_id.eq(submission_id))
                .select(FeedbackSubmissionModel::as_select())
                .first::<FeedbackSubmissionModel>(&mut conn)
                .optional()
                .map_err(|e| {
                    FeedbackRepositoryError::DatabaseError(format!(
                        "Failed to find feedback submission: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(join_error)??;

        Ok(result.map(FeedbackSubmission::from))
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackRepositoryError> {
        let mut conn = self.get_connection()?;

        let models = tokio::task::spawn_blocking(move || {
            feedback_submissions::table
                .order(feedback_submissions::id.asc())
                .offset(skip)
                .limit(limit)
                .select(FeedbackSubmissionModel::as_select())
                .load::<FeedbackSubmissionModel>(&mut conn)
                .map_err(|e| {
                    FeedbackRepositoryError::DatabaseError(format!(
                        "Failed to list feedback submissions: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(join_error)??;

        Ok(models.into_iter().map(FeedbackSubmission::from).collect())
    }

    async fn find_by_execution_id(
        &self,
        execution_id: &str,
    ) -> Result<Vec<FeedbackSubmission>, FeedbackRepositoryError> {
        let execution_id = execution_id.to_string();
        let mut conn = self.get_connection()?;

        let models = tokio::task::spawn_blocking(move || {
            feedback_submissions::table
                .filter(feedback_submissions::n8n_execution_id.eq(execution_id))
                .order(feedback_submissions::id.asc())
                .select(FeedbackSubmissionModel::as_select())
                .load::<FeedbackSubmissionModel>(&mut conn)
                .map_err(|e| {
                    FeedbackRepositoryError::DatabaseError(format!(
                        "Failed to find feedback by execution id: {}",
                        e
                    ))
                })
        })
        .await
        .map_err(join_error)??;

        Ok(models.into_iter().map(FeedbackSubmission::from).collect())
    }

    async fn apply_patch(
        &self,
        submission_id: &str,
        patch: &FeedbackPatch,
        policy: ExecutionIdPolicy,
    ) -> Result<(FeedbackSubmission, Vec<FeedbackField>), FeedbackRepositoryError> {
        let submission_id = submission_id.to_string();
        let patch = patch.clone();
        let mut conn = self.get_connection()?;

        let lookup = submission_id.clone();
        let patched = tokio::task::spawn_blocking(move || {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                let current = feedback_submissions::table
                    .filter(feedback_submissions::submission_id.eq(lookup.as_str()))
                    .select(FeedbackSubmissionModel::as_select())
                    .for_update()
                    .get_result::<FeedbackSubmissionModel>(conn)
                    .optional()?;
                let Some(current) = current else {
                    return Ok(None);
                };

                let mut submission = FeedbackSubmission::from(current);
                let written = submission.apply_patch(&patch, policy);
                if written.is_empty() {
                    return Ok(Some((submission, written)));
                }

                let changes = NewFeedbackSubmissionModel::from(&submission);
                let model = diesel::update(
                    feedback_submissions::table
                        .filter(feedback_submissions::submission_id.eq(lookup.as_str())),
                )
                .set(&changes)
                .returning(FeedbackSubmissionModel::as_returning())
                .get_result::<FeedbackSubmissionModel>(conn)?;

                Ok(Some((FeedbackSubmission::from(model), written)))
            })
            .map_err(|e| write_error("update feedback submission", e))
        })
        .await
        .map_err(join_error)??;

        patched.ok_or(FeedbackRepositoryError::NotFound(submission_id))
    }
}

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::application::services::json_repair::{JsonDiagnostic, parse_with_repair};
use crate::application::services::text_cleaning::{log_escape_characters, strip_quotes};
use crate::domain::entities::{ExecutionIdPolicy, FeedbackPatch, FeedbackSubmission};
use crate::domain::repositories::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::value_objects::FeedbackField;

pub const JSON_HELP: &str = "Please check your JSON syntax, especially quotes and special characters. \
Make sure all apostrophes and quotes are properly escaped. The error occurred around the highlighted context.";

#[derive(Debug, Error)]
pub enum UpdateFeedbackRawError {
    #[error("Feedback submission not found")]
    NotFound(String),
    #[error("Invalid JSON format: {0}")]
    InvalidJson(JsonDiagnostic),
    #[error("Request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("Database integrity error: {0}")]
    Integrity(String),
    #[error("Database error: {0}")]
    Repository(String),
}

impl From<FeedbackRepositoryError> for UpdateFeedbackRawError {
    fn from(error: FeedbackRepositoryError) -> Self {
        match error {
            FeedbackRepositoryError::NotFound(id) => UpdateFeedbackRawError::NotFound(id),
            FeedbackRepositoryError::IntegrityError(msg) => UpdateFeedbackRawError::Integrity(msg),
            other => UpdateFeedbackRawError::Repository(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateFeedbackRawRequest {
    pub submission_id: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct UpdateFeedbackRawResponse {
    pub submission: FeedbackSubmission,
    pub repaired: bool,
    pub updated_fields: Vec<FeedbackField>,
    pub ignored_keys: Vec<String>,
}

pub struct UpdateFeedbackRawUseCase {
    feedback_repository: Arc<dyn FeedbackRepository>,
}

impl UpdateFeedbackRawUseCase {
    pub fn new(feedback_repository: Arc<dyn FeedbackRepository>) -> Self {
        Self {
            feedback_repository,
        }
    }

    pub async fn execute(
        &self,
        request: UpdateFeedbackRawRequest,
    ) -> Result<UpdateFeedbackRawResponse, UpdateFeedbackRawError> {
        tracing::info!(
            "Updating feedback submission with ID: {} using raw JSON",
            request.submission_id
        );

        let mut submission = self
            .feedback_repository
            .find_by_submission_id(&request.submission_id)
            .await?
            .ok_or_else(|| UpdateFeedbackRawError::NotFound(request.submission_id.clone()))?;

        let outcome = parse_with_repair(&request.body).map_err(UpdateFeedbackRawError::InvalidJson)?;
        let repaired = outcome.was_repaired();
        let object = match outcome.into_value() {
            Value::Object(map) => map,
            other => return Err(UpdateFeedbackRawError::NotAnObject(json_type_name(&other))),
        };

        log_escape_characters(
            "UPDATE_FEEDBACK_RAW",
            object
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.as_str(), v))),
        );

        let (patch, ignored_keys) = patch_from_object(&object);
        let updated_fields = if patch.is_empty() {
            Vec::new()
        } else {
            let (patched, written) = self
                .feedback_repository
                .apply_patch(&request.submission_id, &patch, ExecutionIdPolicy::FirstWriteWins)
                .await?;
            for field in &written {
                tracing::info!("Updated field '{}'", field);
            }
            submission = patched;
            written
        };

        tracing::info!(
            "Successfully updated feedback submission with ID: {}",
            request.submission_id
        );

        Ok(UpdateFeedbackRawResponse {
            submission,
            repaired,
            updated_fields,
            ignored_keys,
        })
    }
}

/// Maps a JSON object onto known fields. Returns the patch and the keys that
/// were skipped as unknown or protected.
pub fn patch_from_object(object: &Map<String, Value>) -> (FeedbackPatch, Vec<String>) {
    let mut patch = FeedbackPatch::new();
    let mut ignored = Vec::new();

    for (key, value) in object {
        if FeedbackField::is_protected(key) {
            tracing::info!("Ignoring protected field '{}'", key);
            ignored.push(key.clone());
            continue;
        }
        match FeedbackField::from_name(key) {
            Some(field) => patch.set(field, stored_text(value)),
            None => {
                tracing::info!("Ignoring unknown field '{}'", key);
                ignored.push(key.clone());
            }
        }
    }

    (patch, ignored)
}

/// Text stored for a JSON value: strings are quote-stripped, `null` clears,
/// everything else is kept as compact JSON.
pub fn stored_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(strip_quotes(s).to_string()),
        other => Some(other.to_string()),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FeedbackContent;
    use crate::test_support::InMemoryFeedbackRepository;
    use serde_json::json;

    async fn setup(execution_id: Option<&str>) -> (UpdateFeedbackRawUseCase, String) {
        let repository = Arc::new(InMemoryFeedbackRepository::default());
        let stored = repository
            .save(&FeedbackSubmission::new(FeedbackContent {
                n8n_execution_id: execution_id.map(str::to_string),
                ..FeedbackContent::default()
            }))
            .await
            .unwrap();
        (
            UpdateFeedbackRawUseCase::new(repository),
            stored.submission_id().to_string(),
        )
    }

    fn request(submission_id: &str, body: &str) -> UpdateFeedbackRawRequest {
        UpdateFeedbackRawRequest {
            submission_id: submission_id.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_execution_id_is_write_once() {
        let (use_case, id) = setup(Some("exec-1")).await;
        let response = use_case
            .execute(request(&id, r#"{"n8n_execution_id": "exec-2", "x_feedback": "ok"}"#))
            .await
            .unwrap();
        assert_eq!(response.submission.n8n_execution_id(), Some("exec-1"));
        assert_eq!(response.updated_fields, vec![FeedbackField::XFeedback]);
    }

    #[tokio::test]
    async fn test_empty_execution_id_is_filled() {
        let (use_case, id) = setup(Some("")).await;
        let response = use_case
            .execute(request(&id, r#"{"n8n_execution_id": "\"exec-2\""}"#))
            .await
            .unwrap();
        assert_eq!(response.submission.n8n_execution_id(), Some("exec-2"));
    }

    #[tokio::test]
    async fn test_concurrent_raw_updates_keep_both_writes() {
        let (use_case, id) = setup(None).await;
        let (first, second) = tokio::join!(
            use_case.execute(request(&id, r#"{"n8n_execution_id": "e1", "x_feedback": "ok"}"#)),
            use_case.execute(request(
                &id,
                r#"{"n8n_execution_id": "e2", "linkedin_feedback": "hi"}"#
            )),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        let winners: Vec<_> = [&first, &second]
            .into_iter()
            .filter(|r| r.updated_fields.contains(&FeedbackField::N8nExecutionId))
            .collect();
        assert_eq!(winners.len(), 1);

        let stored = use_case
            .feedback_repository
            .find_by_submission_id(&id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.field(FeedbackField::XFeedback), Some("ok"));
        assert_eq!(stored.field(FeedbackField::LinkedinFeedback), Some("hi"));
        assert_eq!(stored.n8n_execution_id(), winners[0].submission.n8n_execution_id());
    }

    #[tokio::test]
    async fn test_single_quoted_body_is_repaired() {
        let (use_case, id) = setup(None).await;
        let response = use_case
            .execute(request(&id, r#"{"email": 'bad'}"#))
            .await
            .unwrap();
        assert!(response.repaired);
        assert_eq!(response.submission.email(), Some("bad"));
    }

    #[tokio::test]
    async fn test_invalid_json_reports_position() {
        let (use_case, id) = setup(None).await;
        let result = use_case.execute(request(&id, r#"{"email": }"#)).await;
        match result {
            Err(UpdateFeedbackRawError::InvalidJson(diagnostic)) => {
                assert_eq!(diagnostic.error_position, 10);
            }
            other => panic!("expected invalid json, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_object_body_is_rejected() {
        let (use_case, id) = setup(None).await;
        let result = use_case.execute(request(&id, "[1, 2]")).await;
        assert!(matches!(result, Err(UpdateFeedbackRawError::NotAnObject("array"))));
    }

    #[tokio::test]
    async fn test_unknown_submission_checked_first() {
        let (use_case, _) = setup(None).await;
        let result = use_case.execute(request("missing", "not json")).await;
        assert!(matches!(result, Err(UpdateFeedbackRawError::NotFound(_))));
    }

    #[test]
    fn test_patch_from_object_value_conversion() {
        let object = json!({
            "submission_id": "hijack",
            "created_at": "2020-01-01",
            "favourite_colour": "blue",
            "email": "'a@b.com'",
            "x_feedback": null,
            "linkedin_feedback": 42,
            "image_feedback": true,
            "linkedin_custom_content": {"tone": ["warm"]}
        });
        let (patch, mut ignored) = patch_from_object(object.as_object().unwrap());
        ignored.sort();

        assert_eq!(ignored, vec!["created_at", "favourite_colour", "submission_id"]);
        assert_eq!(patch.get(FeedbackField::Email), Some(&Some("a@b.com".to_string())));
        assert_eq!(patch.get(FeedbackField::XFeedback), Some(&None));
        assert_eq!(patch.get(FeedbackField::LinkedinFeedback), Some(&Some("42".to_string())));
        assert_eq!(patch.get(FeedbackField::ImageFeedback), Some(&Some("true".to_string())));
        assert_eq!(
            patch.get(FeedbackField::LinkedinCustomContent),
            Some(&Some(r#"{"tone":["warm"]}"#.to_string()))
        );
    }
}

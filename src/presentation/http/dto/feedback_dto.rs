use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::use_cases::create_feedback::CreateFeedbackResponse;
use crate::domain::entities::{FeedbackContent, FeedbackPatch, FeedbackSubmission};
use crate::domain::value_objects::FeedbackField;

/// Feedback columns as sent by clients. Absent keys are not in the map and
/// an explicit `null` clears. Protected and unknown keys are dropped whatever
/// their type; non-string values of known columns keep their JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FeedbackFieldsDto(pub BTreeMap<String, Value>);

impl FeedbackFieldsDto {
    fn known(&self) -> impl Iterator<Item = (FeedbackField, Option<String>)> + '_ {
        self.0.iter().filter_map(|(key, value)| {
            if FeedbackField::is_protected(key) {
                tracing::debug!("Ignoring protected field '{}'", key);
                return None;
            }
            let field = FeedbackField::from_name(key);
            if field.is_none() {
                tracing::debug!("Ignoring field '{}'", key);
            }
            field.map(|field| (field, column_text(value)))
        })
    }

    pub fn into_content(self) -> FeedbackContent {
        let mut content = FeedbackContent::default();
        for (field, value) in self.known() {
            content.set_field(field, value);
        }
        content
    }

    pub fn into_patch(self) -> FeedbackPatch {
        let mut patch = FeedbackPatch::new();
        for (field, value) in self.known() {
            patch.set(field, value);
        }
        patch
    }
}

fn column_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackSubmissionDto {
    pub id: Option<i32>,
    pub submission_id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<&'static str, Option<String>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<FeedbackSubmission> for FeedbackSubmissionDto {
    fn from(submission: FeedbackSubmission) -> Self {
        let fields = submission
            .content()
            .entries()
            .map(|(field, value)| (field.as_str(), value.map(str::to_string)))
            .collect();

        Self {
            id: submission.id(),
            submission_id: submission.submission_id().to_string(),
            fields,
            created_at: submission.created_at().map(|t| t.to_rfc3339()),
            updated_at: submission.updated_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Create answer: the stored record plus the metadata n8n reads.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackCreatedDto {
    #[serde(flatten)]
    pub submission: FeedbackSubmissionDto,
    pub status_code: u16,
    pub feedback_id: String,
    pub feedback_form_link: String,
    pub message: String,
}

impl From<CreateFeedbackResponse> for FeedbackCreatedDto {
    fn from(response: CreateFeedbackResponse) -> Self {
        let feedback_id = response.submission.submission_id().to_string();
        Self {
            submission: FeedbackSubmissionDto::from(response.submission),
            status_code: 201,
            feedback_id,
            feedback_form_link: response.feedback_form_link,
            message: response.message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginationDto {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    crate::application::use_cases::list_feedback::DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_dto_tells_null_from_absent() {
        let dto: FeedbackFieldsDto =
            serde_json::from_value(json!({"email": null, "x_feedback": "ok", "bogus": "x"}))
                .unwrap();
        let patch = dto.into_patch();

        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get(FeedbackField::Email), Some(&None));
        assert_eq!(patch.get(FeedbackField::XFeedback), Some(&Some("ok".to_string())));
        assert_eq!(patch.get(FeedbackField::LinkedinFeedback), None);
    }

    #[test]
    fn test_fields_dto_accepts_any_json_type() {
        let dto: FeedbackFieldsDto = serde_json::from_value(json!({
            "id": 7,
            "submission_id": "hijack",
            "extra": {"nested": true},
            "x_feedback": "ok",
            "linkedin_feedback": 42
        }))
        .unwrap();
        let patch = dto.into_patch();

        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get(FeedbackField::XFeedback), Some(&Some("ok".to_string())));
        assert_eq!(
            patch.get(FeedbackField::LinkedinFeedback),
            Some(&Some("42".to_string()))
        );
    }

    #[test]
    fn test_submission_dto_lists_every_field() {
        let submission = FeedbackSubmission::new(FeedbackContent::default());
        let value = serde_json::to_value(FeedbackSubmissionDto::from(submission)).unwrap();
        let object = value.as_object().unwrap();

        for field in FeedbackField::ALL {
            assert_eq!(object.get(field.as_str()), Some(&serde_json::Value::Null));
        }
        assert!(object.contains_key("submission_id"));
    }
}

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::{Map, Value, json};

use crate::application::ports::DatabaseAdmin;
use crate::application::services::json_repair::{
    JsonDiagnostic, JsonIssues, context_window, repair,
};
use crate::application::services::text_cleaning::{
    EscapeReport, clean_string_content, log_escape_characters,
};
use crate::domain::value_objects::{ImageFields, PostImageType, post_image_type};
use crate::presentation::http::dto::{HealthResponseDto, RootResponseDto};
use crate::presentation::http::extract::ApiJson;

const API_NAME: &str = "n8n Execution Feedback API";
const PREVIEW_LEN: usize = 200;

/// Operational and debugging endpoints.
pub struct DiagnosticsHandler {
    database: Arc<dyn DatabaseAdmin>,
}

impl DiagnosticsHandler {
    pub fn new(database: Arc<dyn DatabaseAdmin>) -> Self {
        Self { database }
    }

    pub async fn root() -> impl IntoResponse {
        Json(RootResponseDto {
            message: API_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub async fn health(State(handler): State<Arc<DiagnosticsHandler>>) -> impl IntoResponse {
        let database = match handler.database.ping().await {
            Ok(()) => "connected".to_string(),
            Err(e) => {
                tracing::error!("Database connection error: {}", e);
                format!("error: {}", e)
            }
        };

        Json(HealthResponseDto {
            status: "healthy".to_string(),
            message: "API is running".to_string(),
            database,
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    pub async fn migration_status(
        State(handler): State<Arc<DiagnosticsHandler>>,
    ) -> impl IntoResponse {
        let body = match handler.database.migration_status().await {
            Ok(status) => json!({
                "status": "success",
                "applied": status.applied,
                "pending": status.pending,
                "timestamp": Utc::now().to_rfc3339(),
            }),
            Err(e) => {
                tracing::error!("Reading migration status failed: {}", e);
                json!({
                    "status": "error",
                    "error": e,
                    "timestamp": Utc::now().to_rfc3339(),
                })
            }
        };
        Json(body)
    }

    pub async fn run_migrations(
        State(handler): State<Arc<DiagnosticsHandler>>,
    ) -> impl IntoResponse {
        tracing::info!("Manual migration run requested");
        let body = match handler.database.run_migrations().await {
            Ok(applied) => {
                tracing::info!("Applied {} migrations", applied.len());
                json!({
                    "status": "success",
                    "message": "Migrations completed successfully",
                    "applied": applied,
                    "timestamp": Utc::now().to_rfc3339(),
                })
            }
            Err(e) => {
                tracing::warn!("Manual migrations failed: {}", e);
                json!({
                    "status": "error",
                    "message": "Migrations failed",
                    "error": e,
                    "timestamp": Utc::now().to_rfc3339(),
                })
            }
        };
        Json(body)
    }

    pub async fn test_json_parsing(body: String) -> impl IntoResponse {
        let error = match serde_json::from_str::<Value>(&body) {
            Ok(parsed) => {
                return Json(json!({
                    "message": "JSON parsed successfully",
                    "body_length": body.len(),
                    "parsed_data": parsed,
                    "status": "success",
                }));
            }
            Err(e) => e,
        };

        let diagnostic = JsonDiagnostic::from_error(&body, &error);
        let context = context_window(&body, diagnostic.error_position, 50);

        match serde_json::from_str::<Value>(&repair(&body)) {
            Ok(cleaned) => Json(json!({
                "message": "JSON parsed after cleaning",
                "original_error": diagnostic.message,
                "error_position": diagnostic.error_position,
                "context": context,
                "cleaned_data": cleaned,
                "status": "cleaned",
            })),
            Err(_) => Json(json!({
                "message": "JSON parsing failed even after cleaning",
                "error": diagnostic.message,
                "error_position": diagnostic.error_position,
                "context": context,
                "body_preview": preview(&body),
                "status": "failed",
            })),
        }
    }

    pub async fn fix_json(body: String) -> impl IntoResponse {
        let original_error = match serde_json::from_str::<Value>(&body) {
            Ok(_) => {
                return Json(json!({
                    "message": "JSON was already valid",
                    "fixed_json": body,
                    "status": "already_valid",
                }));
            }
            Err(e) => e,
        };

        let fixed = repair(&body);
        match serde_json::from_str::<Value>(&fixed) {
            Ok(parsed) => Json(json!({
                "message": "JSON fixed successfully",
                "original_json": body,
                "fixed_json": fixed,
                "parsed_data": parsed,
                "status": "fixed",
            })),
            Err(fix_error) => Json(json!({
                "message": "Failed to fix JSON",
                "original_error": original_error.to_string(),
                "fix_error": fix_error.to_string(),
                "original_json": body,
                "attempted_fix": fixed,
                "status": "failed",
            })),
        }
    }

    pub async fn debug_json(body: String) -> impl IntoResponse {
        let issues = JsonIssues::scan(&body).describe();

        match serde_json::from_str::<Value>(&body) {
            Ok(_) => Json(json!({
                "message": "JSON is valid",
                "body_length": body.len(),
                "issues": issues,
                "status": "valid",
            })),
            Err(e) => {
                let diagnostic = JsonDiagnostic::from_error(&body, &e);
                let problem_character = diagnostic
                    .problem_character
                    .map_or_else(|| "EOF".to_string(), |c| format!("{:?}", c));
                Json(json!({
                    "message": "JSON is invalid",
                    "error": diagnostic.message,
                    "error_position": diagnostic.error_position,
                    "problem_character": problem_character,
                    "context": diagnostic.context,
                    "body_length": body.len(),
                    "issues": issues,
                    "status": "invalid",
                }))
            }
        }
    }

    pub async fn test_escape_characters(
        ApiJson(data): ApiJson<Map<String, Value>>,
    ) -> impl IntoResponse {
        log_escape_characters(
            "TEST_ESCAPE_CHARACTERS",
            data.iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.as_str(), v))),
        );

        let processed: Map<String, Value> = data
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) if !s.is_empty() => Value::String(clean_string_content(s)),
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect();

        let string_fields = data.values().filter(|v| v.is_string()).count();
        let fields_with_escapes = processed
            .values()
            .filter_map(Value::as_str)
            .filter(|s| EscapeReport::scan(s).has_escapes())
            .count();

        Json(json!({
            "message": "Escape character test completed",
            "original_data": data,
            "processed_data": processed,
            "escape_character_summary": {
                "total_fields": data.len(),
                "string_fields": string_fields,
                "fields_with_escapes": fields_with_escapes,
            },
        }))
    }

    pub async fn test_post_image_type(
        ApiJson(data): ApiJson<Map<String, Value>>,
    ) -> impl IntoResponse {
        let cases: [(Option<&str>, &str); 9] = [
            (Some("Image URL"), post_image_type::IMAGE_URL),
            (Some("Upload Image"), post_image_type::UPLOAD_IMAGE),
            (Some("AI Generated"), post_image_type::AI_GENERATED),
            (Some(""), post_image_type::NO_IMAGE_NEEDED),
            (None, post_image_type::NO_IMAGE_NEEDED),
            (Some("Some other value"), "Some other value"),
            (Some("Image URL with extra text"), post_image_type::IMAGE_URL),
            (Some("Upload Image and more"), post_image_type::UPLOAD_IMAGE),
            (Some("AI Generated content"), post_image_type::AI_GENERATED),
        ];

        let mut results: Vec<Value> = cases
            .iter()
            .map(|(input, expected)| {
                let actual = PostImageType::from_label(*input);
                json!({
                    "input": input,
                    "expected": expected,
                    "actual": actual.as_str(),
                    "matches": actual.as_str() == *expected,
                })
            })
            .collect();

        if let Some(provided) = data.get("post_image_type") {
            let actual = PostImageType::from_label(provided.as_str());
            results.push(json!({
                "input": provided,
                "expected": "custom input",
                "actual": actual.as_str(),
                "matches": true,
            }));
        }

        let sample = ImageFields::new(
            Some("https://example.com/image.jpg".to_string()),
            Some("https://upload.example.com/img.jpg".to_string()),
        );
        let storage_results: Vec<Value> = PostImageType::canonical_values()
            .iter()
            .map(|image_type| {
                let output = sample.clone().reconcile(image_type);
                json!({
                    "post_image_type": image_type.as_str(),
                    "input": {
                        "image_url": sample.image_url,
                        "uploaded_image_url": sample.uploaded_image_url,
                    },
                    "output": {
                        "image_url": output.image_url,
                        "uploaded_image_url": output.uploaded_image_url,
                    },
                })
            })
            .collect();

        let all_passed = results.iter().all(|r| r["matches"] == Value::Bool(true));
        Json(json!({
            "message": "Post image type logic and image URL storage test completed",
            "post_image_type_tests": results,
            "image_url_storage_tests": storage_results,
            "all_tests_passed": all_passed,
        }))
    }

    pub async fn test_cors() -> impl IntoResponse {
        tracing::info!("CORS test endpoint called");
        Json(json!({
            "message": "CORS is working",
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}

fn preview(body: &str) -> String {
    if body.len() <= PREVIEW_LEN {
        return body.to_string();
    }
    format!("{}...", context_window(body, 0, PREVIEW_LEN))
}

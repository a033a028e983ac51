use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::application::use_cases::{
    change_password::ChangePasswordError, create_feedback::CreateFeedbackError,
    create_post::CreatePostError, delete_post::DeletePostError, get_feedback::GetFeedbackError,
    get_post::GetPostError, list_feedback::ListFeedbackError, list_posts::ListPostsError,
    login_user::LoginUserError, proxy_webhook::ProxyWebhookError,
    submit_feedback_webhook::SubmitFeedbackWebhookError, update_feedback::UpdateFeedbackError,
    update_feedback_raw::{JSON_HELP, UpdateFeedbackRawError},
    update_post::UpdatePostError, upload_image::UploadImageError,
};
use crate::domain::repositories::UserRepositoryError;

/// Error rendered as `{"detail": ...}`.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Timeout(String),
    BadGateway(String),
    /// Status copied from an upstream service.
    Upstream { status: u16, detail: String },
    Internal(String),
    /// Structured detail for JSON syntax errors.
    InvalidJson(Value),
    /// Body rejected by the JSON extractor, with the extractor's status.
    Rejected { status: StatusCode, detail: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Timeout(msg)
            | AppError::BadGateway(msg)
            | AppError::Upstream { detail: msg, .. }
            | AppError::Rejected { detail: msg, .. } => Value::String(msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                Value::String(format!("Internal server error: {}", msg))
            }
            AppError::InvalidJson(detail) => detail,
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<CreateFeedbackError> for AppError {
    fn from(error: CreateFeedbackError) -> Self {
        match error {
            CreateFeedbackError::Integrity(_) => AppError::BadRequest(error.to_string()),
            CreateFeedbackError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

impl From<GetFeedbackError> for AppError {
    fn from(error: GetFeedbackError) -> Self {
        match error {
            GetFeedbackError::NotFound(_) => AppError::NotFound(error.to_string()),
            GetFeedbackError::RepositoryError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ListFeedbackError> for AppError {
    fn from(error: ListFeedbackError) -> Self {
        match error {
            ListFeedbackError::InvalidPagination(_) => AppError::BadRequest(error.to_string()),
            ListFeedbackError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<UpdateFeedbackError> for AppError {
    fn from(error: UpdateFeedbackError) -> Self {
        match error {
            UpdateFeedbackError::NotFound(_) => AppError::NotFound(error.to_string()),
            UpdateFeedbackError::Integrity(_) => AppError::BadRequest(error.to_string()),
            UpdateFeedbackError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

impl From<UpdateFeedbackRawError> for AppError {
    fn from(error: UpdateFeedbackRawError) -> Self {
        match error {
            UpdateFeedbackRawError::NotFound(_) => AppError::NotFound(error.to_string()),
            UpdateFeedbackRawError::InvalidJson(diagnostic) => AppError::InvalidJson(json!({
                "type": "json_invalid",
                "msg": format!("Invalid JSON format: {}", diagnostic.message),
                "error_position": diagnostic.error_position,
                "line": diagnostic.line,
                "column": diagnostic.column,
                "context": diagnostic.context,
                "help": JSON_HELP,
            })),
            UpdateFeedbackRawError::NotAnObject(_) | UpdateFeedbackRawError::Integrity(_) => {
                AppError::BadRequest(error.to_string())
            }
            UpdateFeedbackRawError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

impl From<CreatePostError> for AppError {
    fn from(error: CreatePostError) -> Self {
        match error {
            CreatePostError::Integrity(_) => AppError::BadRequest(error.to_string()),
            CreatePostError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

impl From<GetPostError> for AppError {
    fn from(error: GetPostError) -> Self {
        match error {
            GetPostError::PostNotFound(_) => AppError::NotFound(error.to_string()),
            GetPostError::RepositoryError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ListPostsError> for AppError {
    fn from(error: ListPostsError) -> Self {
        match error {
            ListPostsError::InvalidPagination(_) => AppError::BadRequest(error.to_string()),
            ListPostsError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<UpdatePostError> for AppError {
    fn from(error: UpdatePostError) -> Self {
        match error {
            UpdatePostError::NotFound(_) => AppError::NotFound(error.to_string()),
            UpdatePostError::Integrity(_) => AppError::BadRequest(error.to_string()),
            UpdatePostError::Repository(msg) => AppError::Internal(msg),
        }
    }
}

impl From<DeletePostError> for AppError {
    fn from(error: DeletePostError) -> Self {
        match error {
            DeletePostError::NotFound(_) => AppError::NotFound(error.to_string()),
            DeletePostError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<ProxyWebhookError> for AppError {
    fn from(error: ProxyWebhookError) -> Self {
        match error {
            ProxyWebhookError::Timeout => AppError::Timeout(error.to_string()),
            ProxyWebhookError::Transport(_) => AppError::BadGateway(error.to_string()),
            ProxyWebhookError::Upstream { status, .. } => AppError::Upstream {
                status,
                detail: error.to_string(),
            },
        }
    }
}

impl From<SubmitFeedbackWebhookError> for AppError {
    fn from(error: SubmitFeedbackWebhookError) -> Self {
        match error {
            SubmitFeedbackWebhookError::MissingSubmissionId => {
                AppError::BadRequest(error.to_string())
            }
            SubmitFeedbackWebhookError::NotFound(_) => AppError::NotFound(error.to_string()),
            SubmitFeedbackWebhookError::Repository(msg) => AppError::Internal(msg),
            SubmitFeedbackWebhookError::Timeout => AppError::Timeout(error.to_string()),
            SubmitFeedbackWebhookError::Transport(_) => AppError::BadGateway(error.to_string()),
            SubmitFeedbackWebhookError::Upstream { status, .. } => AppError::Upstream {
                status,
                detail: error.to_string(),
            },
        }
    }
}

impl From<UploadImageError> for AppError {
    fn from(error: UploadImageError) -> Self {
        match error {
            UploadImageError::ValidationError(msg) => AppError::BadRequest(msg),
            UploadImageError::Timeout => AppError::Timeout(error.to_string()),
            UploadImageError::Transport(_) => AppError::BadGateway(error.to_string()),
            UploadImageError::Upstream { status, .. } => AppError::Upstream {
                status,
                detail: error.to_string(),
            },
        }
    }
}

impl From<LoginUserError> for AppError {
    fn from(error: LoginUserError) -> Self {
        match error {
            LoginUserError::InvalidCredentials | LoginUserError::Deactivated => {
                AppError::Unauthorized(error.to_string())
            }
            LoginUserError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<ChangePasswordError> for AppError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::UserNotFound => AppError::NotFound(error.to_string()),
            ChangePasswordError::IncorrectPassword => AppError::Unauthorized(error.to_string()),
            ChangePasswordError::EmptyPassword => AppError::BadRequest(error.to_string()),
            ChangePasswordError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<UserRepositoryError> for AppError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound(_) => AppError::NotFound(error.to_string()),
            UserRepositoryError::DatabaseError(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_passes_through() {
        let error = AppError::from(ProxyWebhookError::Upstream {
            status: 503,
            body: "busy".to_string(),
        });
        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_timeout_maps_to_408() {
        assert_eq!(
            AppError::from(UploadImageError::Timeout).status(),
            StatusCode::REQUEST_TIMEOUT
        );
    }

    #[test]
    fn test_login_failures_are_unauthorized() {
        assert_eq!(
            AppError::from(LoginUserError::Deactivated).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}

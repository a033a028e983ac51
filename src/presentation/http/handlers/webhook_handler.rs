use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use serde_json::Value;

use crate::application::use_cases::{
    ProxyWebhookUseCase, SubmitFeedbackWebhookUseCase, UploadImageUseCase,
    proxy_webhook::ProxyWebhookRequest, submit_feedback_webhook::SubmitFeedbackWebhookRequest,
    upload_image::UploadImageRequest,
};
use crate::presentation::http::dto::{
    ProxyWebhookResponseDto, SubmitFeedbackWebhookDto, SubmitFeedbackWebhookResponseDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::ApiJson;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

pub struct WebhookHandler {
    proxy_use_case: Arc<ProxyWebhookUseCase>,
    submit_feedback_use_case: Arc<SubmitFeedbackWebhookUseCase>,
    upload_image_use_case: Arc<UploadImageUseCase>,
}

impl WebhookHandler {
    pub fn new(
        proxy_use_case: Arc<ProxyWebhookUseCase>,
        submit_feedback_use_case: Arc<SubmitFeedbackWebhookUseCase>,
        upload_image_use_case: Arc<UploadImageUseCase>,
    ) -> Self {
        Self {
            proxy_use_case,
            submit_feedback_use_case,
            upload_image_use_case,
        }
    }

    pub async fn proxy_webhook(
        State(handler): State<Arc<WebhookHandler>>,
        ApiJson(payload): ApiJson<Vec<Value>>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .proxy_use_case
            .execute(ProxyWebhookRequest { payload })
            .await?;

        Ok(Json(ProxyWebhookResponseDto::from(response)))
    }

    pub async fn submit_feedback(
        State(handler): State<Arc<WebhookHandler>>,
        ApiJson(body): ApiJson<SubmitFeedbackWebhookDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .submit_feedback_use_case
            .execute(SubmitFeedbackWebhookRequest {
                submission_id: body.submission_id,
            })
            .await?;

        Ok(Json(SubmitFeedbackWebhookResponseDto::from(response)))
    }

    pub async fn upload_image(
        State(handler): State<Arc<WebhookHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, AppError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?
                .to_vec();

            let response = handler
                .upload_image_use_case
                .execute(UploadImageRequest {
                    file_name,
                    content_type,
                    data,
                })
                .await?;
            return Ok(Json(response.result));
        }

        Err(AppError::BadRequest("No file provided".to_string()))
    }
}

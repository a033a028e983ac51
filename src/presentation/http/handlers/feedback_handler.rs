use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::application::use_cases::{
    CreateFeedbackUseCase, GetFeedbackUseCase, ListFeedbackUseCase, UpdateFeedbackRawUseCase,
    UpdateFeedbackUseCase,
    create_feedback::CreateFeedbackRequest,
    get_feedback::GetFeedbackRequest,
    list_feedback::{FeedbackFilter, ListFeedbackRequest},
    update_feedback::UpdateFeedbackRequest,
    update_feedback_raw::UpdateFeedbackRawRequest,
};
use crate::presentation::http::dto::{
    FeedbackCreatedDto, FeedbackFieldsDto, FeedbackSubmissionDto, PaginationDto,
};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::ApiJson;

pub struct FeedbackHandler {
    create_use_case: Arc<CreateFeedbackUseCase>,
    get_use_case: Arc<GetFeedbackUseCase>,
    list_use_case: Arc<ListFeedbackUseCase>,
    update_use_case: Arc<UpdateFeedbackUseCase>,
    update_raw_use_case: Arc<UpdateFeedbackRawUseCase>,
}

impl FeedbackHandler {
    pub fn new(
        create_use_case: Arc<CreateFeedbackUseCase>,
        get_use_case: Arc<GetFeedbackUseCase>,
        list_use_case: Arc<ListFeedbackUseCase>,
        update_use_case: Arc<UpdateFeedbackUseCase>,
        update_raw_use_case: Arc<UpdateFeedbackRawUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_use_case,
            list_use_case,
            update_use_case,
            update_raw_use_case,
        }
    }

    pub async fn create_feedback(
        State(handler): State<Arc<FeedbackHandler>>,
        ApiJson(body): ApiJson<FeedbackFieldsDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = CreateFeedbackRequest {
            content: body.into_content(),
        };
        let response = handler.create_use_case.execute(request).await?;

        Ok((StatusCode::CREATED, Json(FeedbackCreatedDto::from(response))))
    }

    pub async fn list_feedback(
        State(handler): State<Arc<FeedbackHandler>>,
        Query(pagination): Query<PaginationDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = ListFeedbackRequest {
            filter: FeedbackFilter::All {
                skip: pagination.skip,
                limit: pagination.limit,
            },
        };
        let response = handler.list_use_case.execute(request).await?;

        Ok(Json(to_dtos(response.submissions)))
    }

    pub async fn list_by_execution_id(
        State(handler): State<Arc<FeedbackHandler>>,
        Path(execution_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = ListFeedbackRequest {
            filter: FeedbackFilter::ByExecutionId(execution_id),
        };
        let response = handler.list_use_case.execute(request).await?;

        Ok(Json(to_dtos(response.submissions)))
    }

    pub async fn get_feedback(
        State(handler): State<Arc<FeedbackHandler>>,
        Path(submission_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .get_use_case
            .execute(GetFeedbackRequest { submission_id })
            .await?;

        Ok(Json(FeedbackSubmissionDto::from(response.submission)))
    }

    pub async fn update_feedback(
        State(handler): State<Arc<FeedbackHandler>>,
        Path(submission_id): Path<String>,
        ApiJson(body): ApiJson<FeedbackFieldsDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = UpdateFeedbackRequest {
            submission_id,
            patch: body.into_patch(),
        };
        let response = handler.update_use_case.execute(request).await?;

        Ok(Json(FeedbackSubmissionDto::from(response.submission)))
    }

    /// Takes the body as text so malformed JSON reaches the repair pass.
    pub async fn update_feedback_raw(
        State(handler): State<Arc<FeedbackHandler>>,
        Path(submission_id): Path<String>,
        body: String,
    ) -> Result<impl IntoResponse, AppError> {
        tracing::debug!("Raw update body ({} bytes)", body.len());
        let response = handler
            .update_raw_use_case
            .execute(UpdateFeedbackRawRequest {
                submission_id,
                body,
            })
            .await?;

        if response.repaired {
            tracing::info!("Raw update body needed repair");
        }
        if !response.ignored_keys.is_empty() {
            tracing::info!("Ignored keys: {:?}", response.ignored_keys);
        }

        Ok(Json(FeedbackSubmissionDto::from(response.submission)))
    }
}

fn to_dtos(
    submissions: Vec<crate::domain::entities::FeedbackSubmission>,
) -> Vec<FeedbackSubmissionDto> {
    submissions
        .into_iter()
        .map(FeedbackSubmissionDto::from)
        .collect()
}

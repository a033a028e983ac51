use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::FeedbackHandler;

pub fn feedback_routes(feedback_handler: Arc<FeedbackHandler>) -> Router {
    Router::new()
        .route("/api/feedback", post(FeedbackHandler::create_feedback))
        .route("/api/feedback", get(FeedbackHandler::list_feedback))
        .route(
            "/api/feedback/execution/{execution_id}",
            get(FeedbackHandler::list_by_execution_id),
        )
        .route(
            "/api/feedback/raw/{submission_id}",
            put(FeedbackHandler::update_feedback_raw),
        )
        .route(
            "/api/feedback/{submission_id}",
            get(FeedbackHandler::get_feedback),
        )
        .route(
            "/api/feedback/{submission_id}",
            put(FeedbackHandler::update_feedback),
        )
        .with_state(feedback_handler)
}

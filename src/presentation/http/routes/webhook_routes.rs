use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::WebhookHandler;

pub fn webhook_routes(webhook_handler: Arc<WebhookHandler>) -> Router {
    Router::new()
        .route("/api/webhook-proxy", post(WebhookHandler::proxy_webhook))
        .route(
            "/api/submit-feedback-webhook",
            post(WebhookHandler::submit_feedback),
        )
        .route("/api/upload-image", post(WebhookHandler::upload_image))
        .with_state(webhook_handler)
}

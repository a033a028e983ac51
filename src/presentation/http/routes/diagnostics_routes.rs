use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DiagnosticsHandler;

pub fn diagnostics_routes(diagnostics_handler: Arc<DiagnosticsHandler>) -> Router {
    Router::new()
        .route("/", get(DiagnosticsHandler::root))
        .route("/api/", get(DiagnosticsHandler::root))
        .route("/health", get(DiagnosticsHandler::health))
        .route("/api/health", get(DiagnosticsHandler::health))
        .route(
            "/api/migrations/status",
            get(DiagnosticsHandler::migration_status),
        )
        .route("/api/migrations/run", get(DiagnosticsHandler::run_migrations))
        .route(
            "/api/test-json-parsing",
            post(DiagnosticsHandler::test_json_parsing),
        )
        .route("/api/fix-json", post(DiagnosticsHandler::fix_json))
        .route("/api/debug-json", post(DiagnosticsHandler::debug_json))
        .route(
            "/api/test-escape-characters",
            post(DiagnosticsHandler::test_escape_characters),
        )
        .route(
            "/api/test-post-image-type",
            post(DiagnosticsHandler::test_post_image_type),
        )
        .route("/api/test-cors", get(DiagnosticsHandler::test_cors))
        .with_state(diagnostics_handler)
}

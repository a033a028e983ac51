use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::UserHandler;

pub fn user_routes(user_handler: Arc<UserHandler>) -> Router {
    Router::new()
        .route("/api/users", get(UserHandler::list_users))
        .route("/api/users/login", post(UserHandler::login))
        .route("/api/users/change-password", put(UserHandler::change_password))
        .with_state(user_handler)
}

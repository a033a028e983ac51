use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::PostHandler;

pub fn post_routes(post_handler: Arc<PostHandler>) -> Router {
    Router::new()
        .route("/api/social-media-posts", post(PostHandler::create_post))
        .route("/api/social-media-posts", get(PostHandler::list_posts))
        .route(
            "/api/social-media-posts/creator/{content_creator}",
            get(PostHandler::list_by_creator),
        )
        .route("/api/social-media-posts/{post_id}", get(PostHandler::get_post))
        .route("/api/social-media-posts/{post_id}", put(PostHandler::update_post))
        .route(
            "/api/social-media-posts/{post_id}",
            delete(PostHandler::delete_post),
        )
        .with_state(post_handler)
}

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::database::DatabaseHealthMonitor;
use crate::presentation::http::{
    handlers::{DiagnosticsHandler, FeedbackHandler, PostHandler, UserHandler, WebhookHandler},
    routes::{diagnostics_routes, feedback_routes, post_routes, user_routes, webhook_routes},
};

#[derive(Clone)]
pub struct HttpHandlers {
    pub feedback: Arc<FeedbackHandler>,
    pub post: Arc<PostHandler>,
    pub webhook: Arc<WebhookHandler>,
    pub user: Arc<UserHandler>,
    pub diagnostics: Arc<DiagnosticsHandler>,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    /// Allowed origins; a `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_origins: vec!["*".to_string()],
            body_limit_bytes: 25 * 1024 * 1024,
        }
    }
}

pub struct HttpServer {
    handlers: HttpHandlers,
    settings: ServerSettings,
    health_monitor: Option<DatabaseHealthMonitor>,
}

impl HttpServer {
    pub fn new(
        handlers: HttpHandlers,
        settings: ServerSettings,
        health_monitor: Option<DatabaseHealthMonitor>,
    ) -> Self {
        Self {
            handlers,
            settings,
            health_monitor,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.handlers.clone(), &self.settings)
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();

        if let Some(monitor) = self.health_monitor {
            monitor.spawn();
        }

        let addr = SocketAddr::from(([0, 0, 0, 0], self.settings.port));
        tracing::info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

pub fn build_router(handlers: HttpHandlers, settings: &ServerSettings) -> Router {
    Router::new()
        .merge(diagnostics_routes(handlers.diagnostics))
        .merge(feedback_routes(handlers.feedback))
        .merge(post_routes(handlers.post))
        .merge(webhook_routes(handlers.webhook))
        .merge(user_routes(handlers.user))
        .layer(cors_layer(&settings.cors_origins))
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        .layer(
            TraceLayer::new_for_http()
                .on_request(
                    |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                        tracing::info!("Received request: {} {}", request.method(), request.uri());
                    },
                )
                .on_response(
                    |response: &axum::http::Response<axum::body::Body>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            "Response: {} (took {} ms)",
                            response.status(),
                            latency.as_millis()
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            "Request failed: {:?} (took {} ms)",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::application::ports::{DatabaseAdmin, WebhookTarget};
    use crate::application::use_cases::{
        ChangePasswordUseCase, CreateFeedbackUseCase, CreatePostUseCase, DeletePostUseCase,
        GetFeedbackUseCase, GetPostUseCase, ListFeedbackUseCase, ListPostsUseCase,
        ListUsersUseCase, LoginUserUseCase, ProxyWebhookUseCase, SubmitFeedbackWebhookUseCase,
        UpdateFeedbackRawUseCase, UpdateFeedbackUseCase, UpdatePostUseCase, UploadImageUseCase,
    };
    use crate::domain::repositories::{FeedbackRepository, PostRepository};
    use crate::test_support::{
        FakeDatabaseAdmin, InMemoryFeedbackRepository, InMemoryPostRepository, InMemoryStore,
        InMemoryUserRepository, RecordingUploader, RecordingWebhookClient,
    };

    struct TestApp {
        router: Router,
        webhook: Arc<RecordingWebhookClient>,
    }

    fn test_app() -> TestApp {
        let store = Arc::new(InMemoryStore::default());
        let feedback: Arc<dyn FeedbackRepository> =
            Arc::new(InMemoryFeedbackRepository::with_store(store.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::with_store(store));
        let users = Arc::new(InMemoryUserRepository::seeded());
        let webhook = Arc::new(RecordingWebhookClient::ok());
        let uploader = Arc::new(RecordingUploader::answering(json!({"url": "https://u/1.jpg"})));
        let admin: Arc<dyn DatabaseAdmin> = Arc::new(FakeDatabaseAdmin::default());
        let frontend = "http://front.test".to_string();

        let handlers = HttpHandlers {
            feedback: Arc::new(FeedbackHandler::new(
                Arc::new(CreateFeedbackUseCase::new(feedback.clone(), frontend.clone())),
                Arc::new(GetFeedbackUseCase::new(feedback.clone(), posts.clone())),
                Arc::new(ListFeedbackUseCase::new(feedback.clone())),
                Arc::new(UpdateFeedbackUseCase::new(feedback.clone(), posts.clone())),
                Arc::new(UpdateFeedbackRawUseCase::new(feedback.clone())),
            )),
            post: Arc::new(PostHandler::new(
                Arc::new(CreatePostUseCase::new(posts.clone())),
                Arc::new(GetPostUseCase::new(posts.clone())),
                Arc::new(ListPostsUseCase::new(posts.clone())),
                Arc::new(UpdatePostUseCase::new(posts.clone())),
                Arc::new(DeletePostUseCase::new(posts.clone())),
            )),
            webhook: Arc::new(WebhookHandler::new(
                Arc::new(ProxyWebhookUseCase::new(
                    feedback.clone(),
                    webhook.clone(),
                    frontend,
                )),
                Arc::new(SubmitFeedbackWebhookUseCase::new(
                    feedback,
                    posts,
                    webhook.clone(),
                )),
                Arc::new(UploadImageUseCase::new(uploader)),
            )),
            user: Arc::new(UserHandler::new(
                Arc::new(ListUsersUseCase::new(users.clone())),
                Arc::new(LoginUserUseCase::new(users.clone())),
                Arc::new(ChangePasswordUseCase::new(users)),
            )),
            diagnostics: Arc::new(DiagnosticsHandler::new(admin)),
        };

        TestApp {
            router: build_router(handlers, &ServerSettings::default()),
            webhook,
        }
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_feedback(router: &Router, body: Value) -> Value {
        let (status, created) =
            send(router, Method::POST, "/api/feedback", Some(body.to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        created
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = test_app();

        let (status, body) = send(&app.router, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "n8n Execution Feedback API");

        let (status, body) = send(&app.router, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_create_feedback_assigns_uuid_and_nulls() {
        let app = test_app();
        let created = create_feedback(
            &app.router,
            json!({"n8n_execution_id": null, "email": "a@b.com"}),
        )
        .await;

        let submission_id = created["submission_id"].as_str().unwrap();
        assert!(Uuid::parse_str(submission_id).is_ok());
        assert_eq!(created["email"], "a@b.com");
        assert!(created["n8n_execution_id"].is_null());
        assert!(created["x_feedback"].is_null());
        assert!(created["image_url"].is_null());
        assert_eq!(created["status_code"], 201);
        assert_eq!(created["feedback_id"], submission_id);
        assert_eq!(
            created["feedback_form_link"],
            format!("http://front.test/feedback/{submission_id}")
        );
    }

    #[tokio::test]
    async fn test_created_feedback_reads_back() {
        let app = test_app();
        let created = create_feedback(
            &app.router,
            json!({"n8n_execution_id": "exec-1", "email": "a@b.com", "x_feedback": "Shorter"}),
        )
        .await;
        let submission_id = created["submission_id"].as_str().unwrap();

        let (status, fetched) = send(
            &app.router,
            Method::GET,
            &format!("/api/feedback/{submission_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        for key in ["submission_id", "n8n_execution_id", "email", "x_feedback", "linkedin_feedback"] {
            assert_eq!(fetched[key], created[key], "{key}");
        }

        let (_, listed) = send(&app.router, Method::GET, "/api/feedback/execution/exec-1", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_feedback_is_404() {
        let app = test_app();
        let (status, body) = send(&app.router, Method::GET, "/api/feedback/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].is_string());

        let (status, _) = send(
            &app.router,
            Method::PUT,
            "/api/feedback/raw/nope",
            Some("{not json".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_typed_writes_ignore_protected_keys_of_any_type() {
        let app = test_app();
        let created =
            create_feedback(&app.router, json!({"email": "a@b.com", "id": 3})).await;
        assert_eq!(created["email"], "a@b.com");
        assert_ne!(created["id"], 3);

        let submission_id = created["submission_id"].as_str().unwrap();
        let (status, updated) = send(
            &app.router,
            Method::PUT,
            &format!("/api/feedback/{}", submission_id),
            Some(json!({"id": 7, "x_feedback": "ok"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["x_feedback"], "ok");
        assert_eq!(updated["submission_id"], submission_id);
    }

    #[tokio::test]
    async fn test_rejected_body_uses_detail_shape() {
        let app = test_app();

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/users/login",
            Some(json!({"username": 1}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, body) =
            send(&app.router, Method::POST, "/api/feedback", Some("{oops".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_raw_update_keeps_first_execution_id() {
        let app = test_app();
        let created = create_feedback(&app.router, json!({"n8n_execution_id": "exec-1"})).await;
        let uri = format!("/api/feedback/raw/{}", created["submission_id"].as_str().unwrap());

        let (status, updated) = send(
            &app.router,
            Method::PUT,
            &uri,
            Some(json!({"n8n_execution_id": "exec-2", "x_feedback": "ok"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["n8n_execution_id"], "exec-1");
        assert_eq!(updated["x_feedback"], "ok");
    }

    #[tokio::test]
    async fn test_raw_update_sets_missing_execution_id() {
        let app = test_app();
        let created = create_feedback(&app.router, json!({"email": "a@b.com"})).await;
        let uri = format!("/api/feedback/raw/{}", created["submission_id"].as_str().unwrap());

        let (status, updated) = send(
            &app.router,
            Method::PUT,
            &uri,
            Some(r#"{"n8n_execution_id": "exec-9"}"#.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["n8n_execution_id"], "exec-9");
    }

    #[tokio::test]
    async fn test_raw_update_repairs_single_quotes() {
        let app = test_app();
        let created = create_feedback(&app.router, json!({"email": "a@b.com"})).await;
        let uri = format!("/api/feedback/raw/{}", created["submission_id"].as_str().unwrap());

        let (status, updated) =
            send(&app.router, Method::PUT, &uri, Some(r#"{"email": 'bad'}"#.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], "bad");
    }

    #[tokio::test]
    async fn test_raw_update_reports_error_position() {
        let app = test_app();
        let created = create_feedback(&app.router, json!({"email": "a@b.com"})).await;
        let uri = format!("/api/feedback/raw/{}", created["submission_id"].as_str().unwrap());

        let (status, body) =
            send(&app.router, Method::PUT, &uri, Some(r#"{"email": }"#.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"]["type"], "json_invalid");
        assert_eq!(body["detail"]["error_position"], 10);
    }

    #[tokio::test]
    async fn test_webhook_proxy_stores_normalized_post() {
        let app = test_app();
        let payload = json!([{
            "Content Creator": "a@b.com",
            "Post Image?": "Yes, I have an image URL",
            "Image URL": "http://x/y.jpg",
            "Upload an Image": null,
        }]);

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/webhook-proxy",
            Some(payload.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let post_id = body["social_media_post_id"].as_str().unwrap();
        assert!(body["feedback_submission_id"].is_string());

        let (status, post) = send(
            &app.router,
            Method::GET,
            &format!("/api/social-media-posts/{post_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(post["post_image_type"], "Yes, Image URL");
        assert_eq!(post["image_url"], "http://x/y.jpg");
        assert!(post["uploaded_image_url"].is_null());

        let (target, forwarded) = app.webhook.last().unwrap();
        assert_eq!(target, WebhookTarget::Intake);
        assert_eq!(forwarded[0]["Social Media Post ID"], post_id);
    }

    #[tokio::test]
    async fn test_post_update_reconciles_images() {
        let app = test_app();
        let (status, created) = send(
            &app.router,
            Method::POST,
            "/api/social-media-posts",
            Some(
                json!({
                    "content_creator": "a@b.com",
                    "post_image_type": "Yes, I have an image URL",
                    "image_url": "http://x/y.jpg",
                    "uploaded_image_url": "http://u/z.jpg",
                })
                .to_string(),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(created["uploaded_image_url"].is_null());
        let uri = format!("/api/social-media-posts/{}", created["post_id"].as_str().unwrap());

        let (status, updated) = send(
            &app.router,
            Method::PUT,
            &uri,
            Some(json!({"post_image_type": "Upload my own"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["post_image_type"], "Yes, Upload Image");
        assert!(updated["image_url"].is_null());
        assert_eq!(updated["uploaded_image_url"], "http://x/y.jpg");

        let (status, _) = send(&app.router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app.router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_and_users() {
        let app = test_app();
        let (status, users) = send(&app.router, Method::GET, "/api/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 3);
        assert!(users[0].get("password").is_none());

        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/users/login",
            Some(json!({"username": "bob", "password": "wrong"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_json_diagnostics() {
        let app = test_app();

        let (_, body) = send(
            &app.router,
            Method::POST,
            "/api/test-json-parsing",
            Some(r#"{"email": 'bad'}"#.to_string()),
        )
        .await;
        assert_eq!(body["status"], "cleaned");
        assert_eq!(body["cleaned_data"]["email"], "bad");

        let (_, body) = send(
            &app.router,
            Method::POST,
            "/api/fix-json",
            Some(r#"{"a": 1}"#.to_string()),
        )
        .await;
        assert_eq!(body["status"], "already_valid");

        let (_, body) = send(
            &app.router,
            Method::POST,
            "/api/debug-json",
            Some(r#"{"email": }"#.to_string()),
        )
        .await;
        assert_eq!(body["status"], "invalid");
        assert_eq!(body["error_position"], 10);
    }

    #[tokio::test]
    async fn test_post_image_type_self_check_passes() {
        let app = test_app();
        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/test-post-image-type",
            Some(json!({"post_image_type": "Yes, AI generated image"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["all_tests_passed"], true);
        assert_eq!(body["image_url_storage_tests"].as_array().unwrap().len(), 4);
    }
}

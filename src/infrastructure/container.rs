use std::sync::Arc;

use crate::{
    application::{
        ports::{DatabaseAdmin, ImageUploader, WebhookClient},
        use_cases::{
            ChangePasswordUseCase, CreateFeedbackUseCase, CreatePostUseCase, DeletePostUseCase,
            GetFeedbackUseCase, GetPostUseCase, ListFeedbackUseCase, ListPostsUseCase,
            ListUsersUseCase, LoginUserUseCase, ProxyWebhookUseCase,
            SubmitFeedbackWebhookUseCase, UpdateFeedbackRawUseCase, UpdateFeedbackUseCase,
            UpdatePostUseCase, UploadImageUseCase,
        },
    },
    domain::repositories::{FeedbackRepository, PostRepository, UserRepository},
    infrastructure::{
        config::AppConfig,
        database::{
            Database, DatabaseHealthMonitor,
            repositories::{
                PostgresFeedbackRepository, PostgresPostRepository, PostgresUserRepository,
            },
        },
        external_services::{HttpImageUploader, N8nWebhookClient, WebhookEndpoints},
    },
    presentation::http::{
        handlers::{DiagnosticsHandler, FeedbackHandler, PostHandler, UserHandler, WebhookHandler},
        server::{HttpHandlers, HttpServer, ServerSettings},
    },
};

pub struct AppContainer {
    pub database: Arc<Database>,
    pub handlers: HttpHandlers,

    settings: ServerSettings,
    health_check_interval: std::time::Duration,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let database = Arc::new(Database::connect(&config.database_url, config.db_pool_size)?);
        tracing::info!("Database pool ready ({} connections)", config.db_pool_size);

        if config.run_migrations {
            match database.run_migrations().await {
                Ok(applied) if applied.is_empty() => tracing::info!("No pending migrations"),
                Ok(applied) => tracing::info!("Applied migrations: {}", applied.join(", ")),
                // Startup continues; the migration endpoints can retry later.
                Err(e) => tracing::error!("Failed to run database migrations: {}", e),
            }
        }

        // Create repositories
        let feedback_repository: Arc<dyn FeedbackRepository> =
            Arc::new(PostgresFeedbackRepository::new(database.clone()));
        let post_repository: Arc<dyn PostRepository> =
            Arc::new(PostgresPostRepository::new(database.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(database.clone()));

        // Create external services
        let webhook_client: Arc<dyn WebhookClient> = Arc::new(N8nWebhookClient::new(
            WebhookEndpoints {
                intake_url: config.n8n_webhook_url.clone(),
                feedback_url: config.feedback_webhook_url.clone(),
            },
            config.outbound_timeout(),
        )?);
        let image_uploader: Arc<dyn ImageUploader> = Arc::new(HttpImageUploader::new(
            config.upload_service_url.clone(),
            config.outbound_timeout(),
        )?);

        // Create use cases
        let feedback_handler = Arc::new(FeedbackHandler::new(
            Arc::new(CreateFeedbackUseCase::new(
                feedback_repository.clone(),
                config.frontend_url.clone(),
            )),
            Arc::new(GetFeedbackUseCase::new(
                feedback_repository.clone(),
                post_repository.clone(),
            )),
            Arc::new(ListFeedbackUseCase::new(feedback_repository.clone())),
            Arc::new(UpdateFeedbackUseCase::new(
                feedback_repository.clone(),
                post_repository.clone(),
            )),
            Arc::new(UpdateFeedbackRawUseCase::new(feedback_repository.clone())),
        ));

        let post_handler = Arc::new(PostHandler::new(
            Arc::new(CreatePostUseCase::new(post_repository.clone())),
            Arc::new(GetPostUseCase::new(post_repository.clone())),
            Arc::new(ListPostsUseCase::new(post_repository.clone())),
            Arc::new(UpdatePostUseCase::new(post_repository.clone())),
            Arc::new(DeletePostUseCase::new(post_repository.clone())),
        ));

        let webhook_handler = Arc::new(WebhookHandler::new(
            Arc::new(ProxyWebhookUseCase::new(
                feedback_repository.clone(),
                webhook_client.clone(),
                config.frontend_url.clone(),
            )),
            Arc::new(SubmitFeedbackWebhookUseCase::new(
                feedback_repository.clone(),
                post_repository.clone(),
                webhook_client,
            )),
            Arc::new(UploadImageUseCase::new(image_uploader)),
        ));

        let user_handler = Arc::new(UserHandler::new(
            Arc::new(ListUsersUseCase::new(user_repository.clone())),
            Arc::new(LoginUserUseCase::new(user_repository.clone())),
            Arc::new(ChangePasswordUseCase::new(user_repository)),
        ));

        let database_admin: Arc<dyn DatabaseAdmin> = database.clone();
        let diagnostics_handler = Arc::new(DiagnosticsHandler::new(database_admin));

        Ok(Self {
            database,
            handlers: HttpHandlers {
                feedback: feedback_handler,
                post: post_handler,
                webhook: webhook_handler,
                user: user_handler,
                diagnostics: diagnostics_handler,
            },
            settings: ServerSettings {
                port: config.port,
                cors_origins: config.cors_origin_list(),
                body_limit_bytes: config.body_limit_bytes,
            },
            health_check_interval: config.health_check_interval(),
        })
    }

    pub fn into_server(self) -> HttpServer {
        let monitor = DatabaseHealthMonitor::new(self.database.clone(), self.health_check_interval);
        HttpServer::new(self.handlers, self.settings, Some(monitor))
    }
}

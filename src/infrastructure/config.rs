use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings. Every flag falls back to an environment variable, which
/// `.env` may supply.
#[derive(Parser, Debug, Clone)]
#[command(name = "n8n-feedback-api")]
#[command(about = "Feedback and social media post backend for n8n workflows")]
#[command(version)]
pub struct AppConfig {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "PORT")]
    pub port: u16,

    /// Base URL of the feedback form frontend
    #[arg(long, default_value = "http://localhost:3000", env = "FRONTEND_URL")]
    pub frontend_url: String,

    /// n8n webhook receiving new content requests
    #[arg(
        long,
        default_value = "http://localhost:5678/webhook/content-request",
        env = "N8N_WEBHOOK_URL"
    )]
    pub n8n_webhook_url: String,

    /// n8n webhook receiving completed feedback
    #[arg(
        long,
        default_value = "http://localhost:5678/webhook/feedback",
        env = "FEEDBACK_WEBHOOK_URL"
    )]
    pub feedback_webhook_url: String,

    /// Image upload service endpoint
    #[arg(
        long,
        default_value = "http://localhost:8080/upload",
        env = "UPLOAD_SERVICE_URL"
    )]
    pub upload_service_url: String,

    /// Comma separated allowed origins, or `*`
    #[arg(long, default_value = "http://localhost:3000", env = "CORS_ORIGINS")]
    pub cors_origins: String,

    /// Timeout for outbound webhook and upload calls, in seconds
    #[arg(long, default_value = "30", env = "OUTBOUND_TIMEOUT_SECS")]
    pub outbound_timeout_secs: u64,

    #[arg(long, default_value = "10", env = "DB_POOL_SIZE")]
    pub db_pool_size: u32,

    #[arg(long, default_value = "60", env = "DB_HEALTH_CHECK_INTERVAL_SECS")]
    pub db_health_check_interval_secs: u64,

    /// Apply pending migrations at startup
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        env = "RUN_MIGRATIONS"
    )]
    pub run_migrations: bool,

    /// Maximum request body size in bytes
    #[arg(long, default_value = "26214400", env = "BODY_LIMIT_BYTES")]
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("FRONTEND_URL", &self.frontend_url)?;
        check_url("N8N_WEBHOOK_URL", &self.n8n_webhook_url)?;
        check_url("FEEDBACK_WEBHOOK_URL", &self.feedback_webhook_url)?;
        check_url("UPLOAD_SERVICE_URL", &self.upload_service_url)?;
        Ok(())
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(self.outbound_timeout_secs)
    }

    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.db_health_check_interval_secs.max(1))
    }

    /// Trimmed, non-empty origins. A lone `*` means any origin.
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin_list().iter().any(|origin| origin == "*")
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map(|_| ()).map_err(|e| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

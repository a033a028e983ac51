use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use infrastructure::{AppConfig, AppContainer};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "n8n_feedback_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::parse();
    config.validate().context("Invalid configuration")?;

    tracing::info!("Starting n8n feedback API on port {}", config.port);
    tracing::info!("Frontend URL: {}", config.frontend_url);
    if config.allows_any_origin() {
        tracing::warn!("CORS allows any origin");
    }

    let container = AppContainer::new(&config)
        .await
        .map_err(|e| anyhow!(e))
        .context("Failed to initialize application")?;

    container
        .into_server()
        .run()
        .await
        .map_err(|e| anyhow!(e))
        .context("Server error")?;

    Ok(())
}

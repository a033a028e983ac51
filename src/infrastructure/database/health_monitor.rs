use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::connection::{Database, DatabaseError};

/// Periodically probes the database and rebuilds the pool when the probe
/// fails.
pub struct DatabaseHealthMonitor {
    database: Arc<Database>,
    interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthCheck {
    Healthy,
    Reconnected,
    Unavailable(String),
}

impl DatabaseHealthMonitor {
    pub fn new(database: Arc<Database>, interval: Duration) -> Self {
        Self { database, interval }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                "Database health monitor started (every {}s)",
                self.interval.as_secs()
            );
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick fires immediately; startup already connected.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.check().await;
            }
        })
    }

    pub async fn check(&self) -> HealthCheck {
        let database = self.database.clone();
        let probe = run_blocking(move || database.probe()).await;

        let reason = match probe {
            Ok(()) => {
                tracing::debug!("Database health check passed");
                return HealthCheck::Healthy;
            }
            Err(e) => e.to_string(),
        };

        tracing::warn!("Database health check failed: {}, reconnecting", reason);
        let database = self.database.clone();
        match run_blocking(move || database.reconnect()).await {
            Ok(()) => HealthCheck::Reconnected,
            Err(e) => {
                tracing::error!("Database reconnect failed: {}", e);
                HealthCheck::Unavailable(e.to_string())
            }
        }
    }
}

async fn run_blocking<F>(f: F) -> Result<(), DatabaseError>
where
    F: FnOnce() -> Result<(), DatabaseError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("Task join error: {}", e)))?
}

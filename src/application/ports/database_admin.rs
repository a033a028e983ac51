use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
}

/// Operational access to the database behind the repositories.
#[async_trait]
pub trait DatabaseAdmin: Send + Sync {
    /// Round-trips a trivial query.
    async fn ping(&self) -> Result<(), String>;
    async fn migration_status(&self) -> Result<MigrationStatus, String>;
    /// Applies pending migrations and returns the versions that ran.
    async fn run_migrations(&self) -> Result<Vec<String>, String>;
}

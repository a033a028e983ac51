use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use diesel::{
    PgConnection, RunQueryDsl,
    migration::Migration,
    r2d2::{self, ConnectionManager},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

use crate::application::ports::{DatabaseAdmin, MigrationStatus};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("Pool error: {0}")]
    PoolError(String),
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Owns the connection pool. `reconnect` swaps in a fresh pool; callers that
/// already hold a pool handle keep using it until they drop it.
pub struct Database {
    url: String,
    pool_size: u32,
    pool: RwLock<DbPool>,
}

impl Database {
    pub fn connect(url: &str, pool_size: u32) -> Result<Self, DatabaseError> {
        let pool = build_pool(url, pool_size)?;
        Ok(Self {
            url: url.to_string(),
            pool_size,
            pool: RwLock::new(pool),
        })
    }

    pub fn pool(&self) -> DbPool {
        self.read_pool().clone()
    }

    pub fn connection(&self) -> Result<DbConnection, DatabaseError> {
        checkout(&self.pool())
    }

    pub fn reconnect(&self) -> Result<(), DatabaseError> {
        let fresh = build_pool(&self.url, self.pool_size)?;
        *self.write_pool() = fresh;
        tracing::info!("Database pool rebuilt");
        Ok(())
    }

    /// Runs `SELECT 1` on a pooled connection.
    pub fn probe(&self) -> Result<(), DatabaseError> {
        probe(&self.pool())
    }

    pub fn apply_pending_migrations(&self) -> Result<Vec<String>, DatabaseError> {
        apply_pending(&self.pool())
    }

    fn read_pool(&self) -> RwLockReadGuard<'_, DbPool> {
        self.pool.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_pool(&self) -> RwLockWriteGuard<'_, DbPool> {
        self.pool.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DatabaseAdmin for Database {
    async fn ping(&self) -> Result<(), String> {
        let pool = self.pool();
        blocking(move || probe(&pool)).await
    }

    async fn migration_status(&self) -> Result<MigrationStatus, String> {
        let pool = self.pool();
        blocking(move || status(&pool)).await
    }

    async fn run_migrations(&self) -> Result<Vec<String>, String> {
        let pool = self.pool();
        blocking(move || apply_pending(&pool)).await
    }
}

async fn blocking<T, F>(f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DatabaseError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| e.to_string())
}

fn build_pool(url: &str, pool_size: u32) -> Result<DbPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(url);

    r2d2::Pool::builder()
        .max_size(pool_size.max(1))
        .min_idle(Some(1))
        .test_on_check_out(true)
        .build(manager)
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

fn checkout(pool: &DbPool) -> Result<DbConnection, DatabaseError> {
    pool.get()
        .map_err(|e| DatabaseError::PoolError(e.to_string()))
}

fn probe(pool: &DbPool) -> Result<(), DatabaseError> {
    let mut conn = checkout(pool)?;
    diesel::sql_query("SELECT 1")
        .execute(&mut conn)
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
    Ok(())
}

fn status(pool: &DbPool) -> Result<MigrationStatus, DatabaseError> {
    let mut conn = checkout(pool)?;

    let applied = conn
        .applied_migrations()
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?
        .iter()
        .map(|version| version.to_string())
        .collect();
    let pending = conn
        .pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();

    Ok(MigrationStatus { applied, pending })
}

fn apply_pending(pool: &DbPool) -> Result<Vec<String>, DatabaseError> {
    let mut conn = checkout(pool)?;
    let versions = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?
        .iter()
        .map(|version| version.to_string())
        .collect();
    Ok(versions)
}

pub mod connection;
pub mod health_monitor;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{Database, DatabaseError, DbConnection, DbPool, MIGRATIONS};
pub use health_monitor::{DatabaseHealthMonitor, HealthCheck};

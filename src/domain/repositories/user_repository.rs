use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::User;

#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_active(&self) -> Result<Vec<User>, UserRepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;
    async fn update_password(&self, user: &User) -> Result<(), UserRepositoryError>;
}

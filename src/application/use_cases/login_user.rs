use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::User;
use crate::domain::repositories::{UserRepository, UserRepositoryError};

#[derive(Debug, Error)]
pub enum LoginUserError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("User account is deactivated")]
    Deactivated,
    #[error("Database error: {0}")]
    Repository(#[from] UserRepositoryError),
}

#[derive(Debug, Clone)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginUserResponse {
    pub user: User,
}

pub struct LoginUserUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl LoginUserUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(
        &self,
        request: LoginUserRequest,
    ) -> Result<LoginUserResponse, LoginUserError> {
        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or(LoginUserError::InvalidCredentials)?;

        if !user.verify_password(&request.password) {
            tracing::warn!("Failed login attempt for user {}", request.username);
            return Err(LoginUserError::InvalidCredentials);
        }
        if !user.is_active() {
            return Err(LoginUserError::Deactivated);
        }

        tracing::info!("User {} logged in", user.username());
        Ok(LoginUserResponse { user })
    }
}

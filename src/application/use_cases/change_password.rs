use std::sync::Arc;

use thiserror::Error;

use crate::domain::repositories::{UserRepository, UserRepositoryError};

pub const PASSWORD_UPDATED_MESSAGE: &str = "Password updated successfully";

#[derive(Debug, Error)]
pub enum ChangePasswordError {
    #[error("User not found")]
    UserNotFound,
    #[error("Current password is incorrect")]
    IncorrectPassword,
    #[error("New password must not be empty")]
    EmptyPassword,
    #[error("Database error: {0}")]
    Repository(#[from] UserRepositoryError),
}

#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl ChangePasswordUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(&self, request: ChangePasswordRequest) -> Result<(), ChangePasswordError> {
        let mut user = self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .ok_or(ChangePasswordError::UserNotFound)?;

        if !user.verify_password(&request.current_password) {
            return Err(ChangePasswordError::IncorrectPassword);
        }
        if request.new_password.trim().is_empty() {
            return Err(ChangePasswordError::EmptyPassword);
        }

        user.change_password(&request.current_password, &request.new_password)
            .map_err(|_| ChangePasswordError::IncorrectPassword)?;
        self.user_repository.update_password(&user).await?;

        tracing::info!("Password updated for user {}", user.username());
        Ok(())
    }
}

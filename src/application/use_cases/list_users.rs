use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{UserRepository, UserRepositoryError};

#[derive(Debug, Clone)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
}

pub struct ListUsersUseCase {
    user_repository: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(&self) -> Result<ListUsersResponse, UserRepositoryError> {
        let users = self.user_repository.find_active().await?;
        Ok(ListUsersResponse { users })
    }
}

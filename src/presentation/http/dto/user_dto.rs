use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            is_active: user.is_active(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordDto {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
}

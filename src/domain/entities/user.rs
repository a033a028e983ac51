use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PasswordHash;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: i32,
    username: String,
    name: String,
    email: String,
    password: PasswordHash,
    is_active: Option<bool>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: i32,
        username: String,
        name: String,
        email: String,
        password: PasswordHash,
        is_active: Option<bool>,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            name,
            email,
            password,
            is_active,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// A missing flag counts as active, matching the column default.
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    pub fn change_password(&mut self, current: &str, new_password: &str) -> Result<(), String> {
        if !self.verify_password(current) {
            return Err("Current password is incorrect".to_string());
        }
        if new_password.trim().is_empty() {
            return Err("New password must not be empty".to_string());
        }

        self.password = PasswordHash::from_plain(new_password);
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::User;
use crate::domain::repositories::{UserRepository, UserRepositoryError};
use crate::infrastructure::database::models::{UpdatePasswordModel, UserModel};
use crate::infrastructure::database::schema::users;
use crate::infrastructure::database::{Database, DbConnection};

pub struct PostgresUserRepository {
    database: Arc<Database>,
}

impl PostgresUserRepository {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    fn get_connection(&self) -> Result<DbConnection, UserRepositoryError> {
        self.database.connection().map_err(|e| {
            UserRepositoryError::DatabaseError(format!("Failed to get database connection: {}", e))
        })
    }
}

fn to_user(model: UserModel) -> Result<User, UserRepositoryError> {
    User::try_from(model).map_err(|e| {
        UserRepositoryError::DatabaseError(format!("Failed to convert user model: {}", e))
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_active(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.get_connection()?;

        let models = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::is_active.eq(true).or(users::is_active.is_null()))
                .order(users::id.asc())
                .select(UserModel::as_select())
                .load::<UserModel>(&mut conn)
                .map_err(|e| {
                    UserRepositoryError::DatabaseError(format!("Failed to list users: {}", e))
                })
        })
        .await
        .map_err(|e| UserRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        models.into_iter().map(to_user).collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let username = username.to_string();
        let mut conn = self.get_connection()?;

        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::username.eq(username))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()
                .map_err(|e| {
                    UserRepositoryError::DatabaseError(format!("Failed to find user: {}", e))
                })
        })
        .await
        .map_err(|e| UserRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        result.map(to_user).transpose()
    }

    async fn update_password(&self, user: &User) -> Result<(), UserRepositoryError> {
        let changes = UpdatePasswordModel::from(user);
        let user_id = user.id();
        let mut conn = self.get_connection()?;

        let updated = tokio::task::spawn_blocking(move || {
            diesel::update(users::table.find(user_id))
                .set(&changes)
                .execute(&mut conn)
                .map_err(|e| {
                    UserRepositoryError::DatabaseError(format!("Failed to update password: {}", e))
                })
        })
        .await
        .map_err(|e| UserRepositoryError::DatabaseError(format!("Task join error: {}", e)))??;

        if updated == 0 {
            return Err(UserRepositoryError::NotFound(user.username().to_string()));
        }
        Ok(())
    }
}

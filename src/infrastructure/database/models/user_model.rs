use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::User;
use crate::domain::value_objects::PasswordHash;
use crate::infrastructure::database::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub struct UpdatePasswordModel {
    pub password: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UpdatePasswordModel {
    fn from(user: &User) -> Self {
        Self {
            password: user.password().as_str().to_string(),
            updated_at: user.updated_at(),
        }
    }
}

impl TryFrom<UserModel> for User {
    type Error = String;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let password = PasswordHash::new(model.password)
            .map_err(|e| format!("user '{}': {}", model.username, e))?;

        Ok(User::restore(
            model.id,
            model.username,
            model.name,
            model.email,
            password,
            model.is_active,
            model.created_at,
            model.updated_at,
        ))
    }
}

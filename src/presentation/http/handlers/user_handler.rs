use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};

use crate::application::use_cases::{
    ChangePasswordUseCase, ListUsersUseCase, LoginUserUseCase,
    change_password::{ChangePasswordRequest, PASSWORD_UPDATED_MESSAGE},
    login_user::LoginUserRequest,
};
use crate::presentation::http::dto::{ChangePasswordDto, LoginDto, MessageResponseDto, UserDto};
use crate::presentation::http::error::AppError;
use crate::presentation::http::extract::ApiJson;

pub struct UserHandler {
    list_use_case: Arc<ListUsersUseCase>,
    login_use_case: Arc<LoginUserUseCase>,
    change_password_use_case: Arc<ChangePasswordUseCase>,
}

impl UserHandler {
    pub fn new(
        list_use_case: Arc<ListUsersUseCase>,
        login_use_case: Arc<LoginUserUseCase>,
        change_password_use_case: Arc<ChangePasswordUseCase>,
    ) -> Self {
        Self {
            list_use_case,
            login_use_case,
            change_password_use_case,
        }
    }

    pub async fn list_users(
        State(handler): State<Arc<UserHandler>>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler.list_use_case.execute().await?;
        let users: Vec<UserDto> = response.users.into_iter().map(UserDto::from).collect();
        Ok(Json(users))
    }

    pub async fn login(
        State(handler): State<Arc<UserHandler>>,
        ApiJson(body): ApiJson<LoginDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let response = handler
            .login_use_case
            .execute(LoginUserRequest {
                username: body.username,
                password: body.password,
            })
            .await?;

        Ok(Json(UserDto::from(response.user)))
    }

    pub async fn change_password(
        State(handler): State<Arc<UserHandler>>,
        ApiJson(body): ApiJson<ChangePasswordDto>,
    ) -> Result<impl IntoResponse, AppError> {
        handler
            .change_password_use_case
            .execute(ChangePasswordRequest {
                username: body.username,
                current_password: body.current_password,
                new_password: body.new_password,
            })
            .await?;

        Ok(Json(MessageResponseDto::new(PASSWORD_UPDATED_MESSAGE)))
    }
}

/*
 * Responsibility
 * - POST /users, POST /users/login
 * - 登録 / 資格情報の照合は UserStore (外部コラボレータ) に任せ、Login 成功時に access token を発行
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::users::{CreateUserRequest, LoginUserRequest, LoginUserResponse, UserResponse},
    error::AppError,
    repos::user_repo::NewUser,
    state::AppState,
};

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .users
        .create(NewUser {
            username: &req.username,
            password: &req.password,
            full_name: &req.full_name,
            email: &req.email,
        })
        .await?;

    tracing::info!(username = %row.username, "user registered");
    Ok(Json(row.into()))
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(req): Json<LoginUserRequest>,
) -> Result<Json<LoginUserResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    match state
        .users
        .verify(&req.username, &req.password)
        .await?
    {
        Some(true) => {}
        Some(false) => {
            tracing::warn!(username = %req.username, "login with wrong password");
            return Err(AppError::Unauthorized("invalid username or password"));
        }
        None => return Err(AppError::not_found("user")),
    }

    let access_token = state
        .tokens
        .create_token(&req.username, state.access_token_ttl)?;

    Ok(Json(LoginUserResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.access_token_ttl.num_seconds(),
        username: req.username,
    }))
}

/*
 * Responsibility
 * - /accounts 系 handler (access middleware の後ろ)
 * - 所有者は token の username。取得系は policy::ensure_owner を通してから返す
 */
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    api::v1::{
        dto::accounts::{AccountResponse, CreateAccountRequest, ListAccountsQuery},
        extractors::AuthPayload,
    },
    error::AppError,
    policy::ensure_owner,
    state::AppState,
};

pub async fn create_account(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .accounts
        .create(&payload.username, &req.currency)
        .await?;

    Ok(Json(row.into()))
}

pub async fn get_account(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    let row = state
        .accounts
        .get(account_id)
        .await?
        .ok_or(AppError::not_found("account"))?;

    ensure_owner(&payload, &row.owner)?;

    Ok(Json(row.into()))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    query.validate().map_err(AppError::bad_request)?;

    let rows = state
        .accounts
        .list_by_owner(&payload.username, query.limit(), query.offset())
        .await?;

    Ok(Json(rows.into_iter().map(AccountResponse::from).collect()))
}

/*
 * Responsibility
 * - POST /transfers
 * - 所有者チェックは送金元 (from) のみ。送金先 (to) は他人の口座でもよい
 * - 残高移動そのものは AccountStore::transfer に任せる
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::transfers::{CreateTransferRequest, TransferResponse},
        extractors::AuthPayload,
    },
    error::AppError,
    policy::ensure_owner,
    repos::account_repo::AccountRow,
    state::AppState,
};

fn check_currency(account: &AccountRow, currency: &str) -> Result<(), AppError> {
    if account.currency != currency {
        return Err(AppError::bad_request(format!(
            "account [{}] currency mismatch: {} vs {}",
            account.id, account.currency, currency
        )));
    }
    Ok(())
}

pub async fn create_transfer(
    State(state): State<AppState>,
    AuthPayload(payload): AuthPayload,
    Json(req): Json<CreateTransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let from = state
        .accounts
        .get(req.from_account_id)
        .await?
        .ok_or(AppError::not_found("account"))?;
    ensure_owner(&payload, &from.owner)?;
    check_currency(&from, &req.currency)?;

    let to = state
        .accounts
        .get(req.to_account_id)
        .await?
        .ok_or(AppError::not_found("account"))?;
    check_currency(&to, &req.currency)?;

    let row = state
        .accounts
        .transfer(from.id, to.id, req.amount)
        .await?;

    tracing::info!(
        transfer_id = row.id,
        from = row.from_account_id,
        to = row.to_account_id,
        "transfer created"
    );

    Ok(Json(row.into()))
}

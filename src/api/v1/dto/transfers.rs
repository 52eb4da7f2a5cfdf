/*
 * Responsibility
 * - Transfers の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::accounts::is_supported_currency;
use crate::repos::account_repo::TransferRow;

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub currency: String,
}

impl CreateTransferRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.from_account_id < 1 || self.to_account_id < 1 {
            return Err("account ids must be >= 1");
        }
        if self.from_account_id == self.to_account_id {
            return Err("cannot transfer to the same account");
        }
        if self.amount <= 0 {
            return Err("amount must be positive");
        }
        if !is_supported_currency(&self.currency) {
            return Err("unsupported currency");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<TransferRow> for TransferResponse {
    fn from(row: TransferRow) -> Self {
        Self {
            id: row.id,
            from_account_id: row.from_account_id,
            to_account_id: row.to_account_id,
            amount: row.amount,
            created_at: row.created_at,
        }
    }
}

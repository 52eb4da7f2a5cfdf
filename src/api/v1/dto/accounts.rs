/*
 * Responsibility
 * - Accounts の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::account_repo::AccountRow;

pub const SUPPORTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "TWD"];

pub fn is_supported_currency(currency: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&currency)
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub currency: String,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_supported_currency(&self.currency) {
            return Err("unsupported currency");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub page_id: i32,
    pub page_size: i32,
}

impl ListAccountsQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page_id < 1 {
            return Err("page_id must be >= 1");
        }
        if !(5..=10).contains(&self.page_size) {
            return Err("page_size must be between 5 and 10");
        }
        Ok(())
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Computed in `i64`, so any `i32` page id fits.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page_id) - 1) * i64::from(self.page_size)
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRow> for AccountResponse {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
            balance: row.balance,
            currency: row.currency,
            created_at: row.created_at,
        }
    }
}

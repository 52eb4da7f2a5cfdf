/*
 * Responsibility
 * - Users (登録 / Login) の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::UserRow;

fn validate_credentials(username: &str, password: &str) -> Result<(), &'static str> {
    if username.is_empty() || !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("username must be alphanumeric");
    }
    if password.len() < 6 {
        return Err("password must be at least 6 characters");
    }
    Ok(())
}

// local@domain.tld, nothing fancier
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_credentials(&self.username, &self.password)?;
        if self.full_name.trim().is_empty() {
            return Err("full_name is required");
        }
        if !is_plausible_email(&self.email) {
            return Err("email is invalid");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            full_name: row.full_name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

impl LoginUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_credentials(&self.username, &self.password)
    }
}

#[derive(Debug, Serialize)]
pub struct LoginUserResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: i64,
    pub username: String,
}

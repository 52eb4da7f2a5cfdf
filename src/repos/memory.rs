//! In-memory stores for handler and middleware tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::repos::BoxFuture;
use crate::repos::account_repo::{AccountRow, AccountStore, TransferRow};
use crate::repos::error::RepoError;
use crate::repos::user_repo::{NewUser, UserRow, UserStore};

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<Vec<AccountRow>>,
    transfers: Mutex<Vec<TransferRow>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, owner: &str, balance: i64, currency: &str) -> AccountRow {
        let mut accounts = self.accounts.lock().unwrap();
        let row = AccountRow {
            id: accounts.len() as i64 + 1,
            owner: owner.to_string(),
            balance,
            currency: currency.to_string(),
            created_at: Utc::now(),
        };
        accounts.push(row.clone());
        row
    }

    pub fn balance(&self, account_id: i64) -> Option<i64> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == account_id)
            .map(|a| a.balance)
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.lock().unwrap().len()
    }
}

impl AccountStore for MemoryAccountStore {
    fn create<'a>(
        &'a self,
        owner: &'a str,
        currency: &'a str,
    ) -> BoxFuture<'a, Result<AccountRow, RepoError>> {
        Box::pin(async move { Ok(self.insert(owner, 0, currency)) })
    }

    fn get(&self, account_id: i64) -> BoxFuture<'_, Result<Option<AccountRow>, RepoError>> {
        Box::pin(async move {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.iter().find(|a| a.id == account_id).cloned())
        })
    }

    fn list_by_owner<'a>(
        &'a self,
        owner: &'a str,
        limit: i64,
        offset: i64,
    ) -> BoxFuture<'a, Result<Vec<AccountRow>, RepoError>> {
        Box::pin(async move {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts
                .iter()
                .filter(|a| a.owner == owner)
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        })
    }

    fn transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> BoxFuture<'_, Result<TransferRow, RepoError>> {
        Box::pin(async move {
            let mut accounts = self.accounts.lock().unwrap();
            for account in accounts.iter_mut() {
                if account.id == from_account_id {
                    account.balance -= amount;
                }
                if account.id == to_account_id {
                    account.balance += amount;
                }
            }

            let mut transfers = self.transfers.lock().unwrap();
            let row = TransferRow {
                id: transfers.len() as i64 + 1,
                from_account_id,
                to_account_id,
                amount,
                created_at: Utc::now(),
            };
            transfers.push(row.clone());
            Ok(row)
        })
    }
}

/// username -> (password, row), password compared in plain text (tests only).
#[derive(Debug, Default)]
pub struct MemoryUsers {
    users: Mutex<HashMap<String, (String, UserRow)>>,
}

impl MemoryUsers {
    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.users.lock().unwrap().insert(
            username.to_string(),
            (
                password.to_string(),
                UserRow {
                    username: username.to_string(),
                    full_name: username.to_string(),
                    email: format!("{username}@example.com"),
                    created_at: Utc::now(),
                },
            ),
        );
        self
    }
}

impl UserStore for MemoryUsers {
    fn create<'a>(&'a self, user: NewUser<'a>) -> BoxFuture<'a, Result<UserRow, RepoError>> {
        Box::pin(async move {
            let mut users = self.users.lock().unwrap();
            let taken = users.contains_key(user.username)
                || users.values().any(|(_, row)| row.email == user.email);
            if taken {
                return Err(RepoError::Conflict);
            }

            let row = UserRow {
                username: user.username.to_string(),
                full_name: user.full_name.to_string(),
                email: user.email.to_string(),
                created_at: Utc::now(),
            };
            users.insert(
                user.username.to_string(),
                (user.password.to_string(), row.clone()),
            );
            Ok(row)
        })
    }

    fn verify<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Option<bool>, RepoError>> {
        Box::pin(async move {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).map(|(p, _)| p == password))
        })
    }
}

/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - tokens: TokenMaker (起動時に 1 つだけ選択), accounts / users: 永続化層
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use chrono::Duration;

use crate::repos::{account_repo::AccountStore, user_repo::UserStore};
use crate::services::token::TokenMaker;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenMaker>,
    pub accounts: Arc<dyn AccountStore>,
    pub users: Arc<dyn UserStore>,
    pub access_token_ttl: Duration,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        tokens: Arc<dyn TokenMaker>,
        accounts: Arc<dyn AccountStore>,
        users: Arc<dyn UserStore>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            tokens,
            accounts,
            users,
            access_token_ttl,
        }
    }
}

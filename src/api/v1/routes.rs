/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 公開: /health, /users, /users/login
 * - 保護: /accounts, /transfers (access middleware を route_layer で適用)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    accounts::{create_account, get_account, list_accounts},
    health::health,
    transfers::create_transfer,
    users::{create_user, login_user},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/users", post(create_user))
        .route("/users/login", post(login_user));

    let protected = Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .route("/transfers", post(create_transfer));
    let protected = access::apply(protected, state);

    public.merge(protected)
}

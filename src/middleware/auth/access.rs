//! access token 検証 → Payload を extensions に入れる
//!
//! - `Authorization: Bearer <token>` を受け取り、TokenMaker で検証する
//! - 失敗理由 (期限切れ / 署名不一致 / alg 不一致 / 形式不正) はログにのみ残し、
//!   レスポンスは一律 401 `{"error": "..."}` にする
//! - 認可 (リソースの所有者チェック) は handler 側 (policy::ownership) の責務

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::token::{Payload, TokenMaker};
use crate::state::AppState;

pub const AUTH_TYPE_BEARER: &str = "Bearer";

/// 保護したい routes に認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/accounts", post(create_account));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let payload = authenticate(req.headers(), state.tokens.as_ref())?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(payload);

    Ok(next.run(req).await)
}

/// Header parsing and token verification, separated from the axum plumbing.
pub fn authenticate(headers: &HeaderMap, tokens: &dyn TokenMaker) -> Result<Payload, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        tracing::warn!("authorization header is not provided");
        return Err(AppError::Unauthorized("authorization header is not provided"));
    };
    if value.is_empty() {
        tracing::warn!("authorization header is empty");
        return Err(AppError::Unauthorized("authorization header is not provided"));
    }

    let value = value.to_str().map_err(|_| {
        tracing::warn!("authorization header is not valid UTF-8");
        AppError::Unauthorized("invalid authorization header format")
    })?;

    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() < 2 {
        tracing::warn!(fields = fields.len(), "invalid authorization header format");
        return Err(AppError::Unauthorized("invalid authorization header format"));
    }

    // Scheme match is case-sensitive.
    if fields[0] != AUTH_TYPE_BEARER {
        tracing::warn!(scheme = %fields[0], "unsupported authorization type");
        return Err(AppError::Unauthorized("unsupported authorization type"));
    }

    tokens.verify_token(fields[1]).map_err(|err| {
        tracing::warn!(error = %err, "access token verification failed");
        AppError::from(err)
    })
}

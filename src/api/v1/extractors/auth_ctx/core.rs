use axum::extract::FromRequestParts;
use axum::http::{Extensions, request::Parts};

use crate::error::AppError;
use crate::services::token::Payload;
use crate::state::AppState;

/// Handler で、検証済み Payload を受け取るための extractor
/// middleware が Payload を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
#[derive(Debug, Clone)]
pub struct AuthPayload(pub Payload);

/// Typed lookup of the payload stored by the access middleware.
pub fn auth_payload(extensions: &Extensions) -> Result<&Payload, AppError> {
    extensions.get::<Payload>().ok_or_else(|| {
        tracing::error!("auth payload missing from request; is the access middleware installed?");
        AppError::Unauthorized("authorization required")
    })
}

impl FromRequestParts<AppState> for AuthPayload {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        auth_payload(&parts.extensions).cloned().map(AuthPayload)
    }
}

/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (Bearer 検証), http (request id / access log / limits)
 */
pub mod auth;
pub mod http;

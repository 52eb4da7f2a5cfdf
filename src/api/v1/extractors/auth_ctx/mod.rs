/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストの Payload を型付きで handler に提供する
 * - extensions からの取り出しに失敗したら 401 (AppError) を返す。downcast は不要
 *
 * Public API:
 * - AuthPayload
 * - auth_payload
 */

mod core;

pub use core::{AuthPayload, auth_payload};

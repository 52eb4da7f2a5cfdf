/*
 * Responsibility
 * - 認可 (BOLA) チェック。認証 (middleware) の後、リソース取得後に handler から呼ぶ
 */
pub mod ownership;

pub use ownership::ensure_owner;

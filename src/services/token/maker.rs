use chrono::Duration;
use thiserror::Error;

use crate::services::token::payload::Payload;

/// Errors from maker construction, issuance and verification.
///
/// The variants stay distinct for logging. The HTTP layer collapses every
/// verification-time variant into one 401.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid key size: must be at least {required} bytes, got {actual}")]
    KeyTooShort { required: usize, actual: usize },

    #[error("invalid key size: must be exactly {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("token has expired")]
    Expired,

    #[error("failed to build token: {0}")]
    Serialization(String),
}

impl TokenError {
    /// True for failures caused by the presented token rather than the server.
    pub fn is_verification(&self) -> bool {
        matches!(
            self,
            Self::Malformed | Self::SignatureInvalid | Self::UnsupportedAlgorithm(_) | Self::Expired
        )
    }
}

/// Issues and verifies access tokens for one protection scheme.
///
/// Implementations hold an immutable key and no other state, so one instance is
/// shared across all requests.
pub trait TokenMaker: Send + Sync {
    /// Create a token for `username` valid for `duration`.
    ///
    /// Negative durations are not rejected here; only verification checks expiry.
    fn create_token(&self, username: &str, duration: Duration) -> Result<String, TokenError>;

    /// Open `token` and return its payload if it is intact and not expired.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

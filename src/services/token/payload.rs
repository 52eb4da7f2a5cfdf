use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::token::maker::TokenError;

/// Claims carried inside an access token.
///
/// - `id` is unique per issuance (v4 UUID, OS CSPRNG). Nothing stores it yet.
/// - `username` is compared verbatim against resource owners.
/// - `expires_at` is always derived from `issued_at`, never set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub id: Uuid,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// Build a fresh payload valid for `duration` from now.
    ///
    /// A negative `duration` is accepted and yields an already expired payload.
    pub fn new(username: &str, duration: Duration) -> Result<Self, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(duration)
            .ok_or_else(|| TokenError::Serialization("token duration out of range".to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            issued_at,
            expires_at,
        })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Expiry check shared by every maker after the token has been opened.
    pub(crate) fn ensure_valid(self) -> Result<Self, TokenError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(TokenError::Expired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payload_window() {
        let before = Utc::now();
        let payload = Payload::new("alice", Duration::minutes(1)).unwrap();
        let after = Utc::now();

        assert_eq!(payload.username, "alice");
        assert!(payload.issued_at >= before && payload.issued_at <= after);
        assert_eq!(payload.expires_at - payload.issued_at, Duration::minutes(1));
        assert!(payload.is_valid());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Payload::new("alice", Duration::minutes(1)).unwrap();
        let b = Payload::new("alice", Duration::minutes(1)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validity_boundary() {
        let payload = Payload::new("alice", Duration::minutes(1)).unwrap();

        assert!(payload.is_valid_at(payload.expires_at));
        assert!(!payload.is_valid_at(payload.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_negative_duration_is_expired() {
        let payload = Payload::new("alice", Duration::minutes(-1)).unwrap();
        assert!(!payload.is_valid());
        assert!(matches!(payload.ensure_valid(), Err(TokenError::Expired)));
    }

    #[test]
    fn test_out_of_range_duration() {
        let result = Payload::new("alice", Duration::MAX);
        assert!(matches!(result, Err(TokenError::Serialization(_))));
    }
}

use crate::error::AppError;
use crate::services::token::Payload;

/// Reject unless the authenticated subject owns the resource.
///
/// Call after fetching the resource and before mutating or returning it. For
/// transfers only the debited account goes through here.
pub fn ensure_owner(payload: &Payload, owner: &str) -> Result<(), AppError> {
    if payload.username != owner {
        tracing::warn!(
            username = %payload.username,
            owner = %owner,
            token_id = %payload.id,
            "resource does not belong to caller"
        );
        return Err(AppError::Unauthorized("resource does not belong to caller"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_owner_matches() {
        let alice = Payload::new("alice", Duration::minutes(1)).unwrap();
        assert!(ensure_owner(&alice, "alice").is_ok());
    }

    #[test]
    fn test_owner_differs() {
        let alice = Payload::new("alice", Duration::minutes(1)).unwrap();
        assert!(matches!(
            ensure_owner(&alice, "bob"),
            Err(AppError::Unauthorized("resource does not belong to caller"))
        ));
    }

    #[test]
    fn test_comparison_is_verbatim() {
        let alice = Payload::new("alice", Duration::minutes(1)).unwrap();
        assert!(ensure_owner(&alice, "Alice").is_err());
        assert!(ensure_owner(&alice, "alice ").is_err());
    }
}

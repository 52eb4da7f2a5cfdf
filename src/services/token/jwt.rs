use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use tracing::error;

use crate::services::token::maker::{TokenError, TokenMaker};
use crate::services::token::payload::Payload;

pub const MIN_SECRET_KEY_SIZE: usize = 32;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

// Anything outside this family is rejected before the key is used.
const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// HMAC-signed JWT maker. Payload is readable by token holders, only tampering is detected.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtMaker")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtMaker {
    pub fn new(secret_key: &[u8]) -> Result<Self, TokenError> {
        if secret_key.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::KeyTooShort {
                required: MIN_SECRET_KEY_SIZE,
                actual: secret_key.len(),
            });
        }

        // `exp`/`nbf`/`aud` live in `Payload`, not in registered claims.
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key),
            decoding_key: DecodingKey::from_secret(secret_key),
            validation,
        })
    }

    /// Check the declared `alg` without trusting anything else in the token.
    ///
    /// Parsed by hand because `jsonwebtoken` cannot represent `"none"` and would
    /// report it as a JSON error.
    fn check_header(token: &str) -> Result<(), TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(_), Some(_), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| TokenError::Malformed)?;
        let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

        let accepted = raw
            .alg
            .parse::<Algorithm>()
            .is_ok_and(|alg| HMAC_FAMILY.contains(&alg));
        if !accepted {
            return Err(TokenError::UnsupportedAlgorithm(raw.alg));
        }

        Ok(())
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(&self, username: &str, duration: Duration) -> Result<String, TokenError> {
        let payload = Payload::new(username, duration)?;

        let mut header = Header::new(SIGNING_ALGORITHM);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &payload, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenError::Serialization(e.to_string())
        })
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        Self::check_header(token)?;

        let data = jsonwebtoken::decode::<Payload>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm => {
                    TokenError::UnsupportedAlgorithm("algorithm rejected by verifier".to_string())
                }
                _ => TokenError::Malformed,
            })?;

        data.claims.ensure_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn encode_segment(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn forged_body(username: &str) -> String {
        let payload = Payload::new(username, Duration::minutes(1)).unwrap();
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap())
    }

    #[test]
    fn test_key_size_enforced() {
        let short = JwtMaker::new(&[7u8; 16]);
        assert!(matches!(
            short,
            Err(TokenError::KeyTooShort {
                required: 32,
                actual: 16
            })
        ));

        assert!(JwtMaker::new(&[7u8; 32]).is_ok());
        assert!(JwtMaker::new(&[7u8; 64]).is_ok());
    }

    #[test]
    fn test_round_trip() {
        let maker = JwtMaker::new(KEY).unwrap();

        let token = maker.create_token("alice", Duration::minutes(1)).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let payload = maker.verify_token(&token).unwrap();
        let now = chrono::Utc::now();
        assert_eq!(payload.username, "alice");
        assert!(payload.issued_at <= now && now <= payload.expires_at);
    }

    #[test]
    fn test_fresh_id_per_token() {
        let maker = JwtMaker::new(KEY).unwrap();
        let a = maker.create_token("alice", Duration::minutes(1)).unwrap();
        let b = maker.create_token("alice", Duration::minutes(1)).unwrap();

        let a = maker.verify_token(&a).unwrap();
        let b = maker.verify_token(&b).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_expired_token() {
        let maker = JwtMaker::new(KEY).unwrap();
        let token = maker.create_token("alice", Duration::minutes(-1)).unwrap();

        assert!(matches!(maker.verify_token(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_different_keys_reject() {
        let maker1 = JwtMaker::new(KEY).unwrap();
        let maker2 = JwtMaker::new(b"fedcba9876543210fedcba9876543210").unwrap();

        let token = maker1.create_token("alice", Duration::minutes(1)).unwrap();
        assert!(matches!(
            maker2.verify_token(&token),
            Err(TokenError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let maker = JwtMaker::new(KEY).unwrap();
        let token = maker.create_token("alice", Duration::minutes(1)).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], forged_body("mallory"), parts[2]);

        assert!(matches!(
            maker.verify_token(&forged),
            Err(TokenError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let maker = JwtMaker::new(KEY).unwrap();
        let header = encode_segment(&serde_json::json!({"alg": "none", "typ": "JWT"}));
        let token = format!("{header}.{}.", forged_body("alice"));

        match maker.verify_token(&token) {
            Err(TokenError::UnsupportedAlgorithm(alg)) => assert_eq!(alg, "none"),
            other => panic!("expected UnsupportedAlgorithm, got {other:?}"),
        }
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let maker = JwtMaker::new(KEY).unwrap();
        let token = maker.create_token("alice", Duration::minutes(1)).unwrap();

        // Same body and a real HS256 signature, only the declared alg differs.
        let parts: Vec<&str> = token.split('.').collect();
        let header = encode_segment(&serde_json::json!({"alg": "RS256", "typ": "JWT"}));
        let forged = format!("{header}.{}.{}", parts[1], parts[2]);

        assert!(matches!(
            maker.verify_token(&forged),
            Err(TokenError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let maker = JwtMaker::new(KEY).unwrap();

        for token in ["", "invalid", "invalid.token", "invalid.token.here", "a.b.c.d"] {
            assert!(
                matches!(maker.verify_token(token), Err(TokenError::Malformed)),
                "token {token:?} should be malformed"
            );
        }
    }
}

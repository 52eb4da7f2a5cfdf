use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chacha20poly1305::aead::{Aead, KeyInit, Payload as AeadPayload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use chrono::Duration;
use tracing::error;

use crate::services::token::maker::{TokenError, TokenMaker};
use crate::services::token::payload::Payload;

pub const KEY_SIZE: usize = 32;

const NONCE_SIZE: usize = 24;
const TAG_SIZE: usize = 16;

// Version prefix, also bound as associated data.
const TOKEN_HEADER: &str = "v1.sealed.";

/// XChaCha20-Poly1305 maker. The token is one encrypted blob, so the payload is
/// hidden from intermediaries and tampering shows up as a decryption failure.
pub struct SealedMaker {
    cipher: XChaCha20Poly1305,
}

impl std::fmt::Debug for SealedMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedMaker").finish_non_exhaustive()
    }
}

impl SealedMaker {
    /// `symmetric_key` must be exactly 32 bytes.
    pub fn new(symmetric_key: &[u8]) -> Result<Self, TokenError> {
        if symmetric_key.len() < KEY_SIZE {
            return Err(TokenError::KeyTooShort {
                required: KEY_SIZE,
                actual: symmetric_key.len(),
            });
        }
        if symmetric_key.len() != KEY_SIZE {
            return Err(TokenError::InvalidKeySize {
                expected: KEY_SIZE,
                actual: symmetric_key.len(),
            });
        }

        let cipher = XChaCha20Poly1305::new(Key::from_slice(symmetric_key));
        Ok(Self { cipher })
    }
}

impl TokenMaker for SealedMaker {
    fn create_token(&self, username: &str, duration: Duration) -> Result<String, TokenError> {
        let payload = Payload::new(username, duration)?;
        let plaintext =
            serde_json::to_vec(&payload).map_err(|e| TokenError::Serialization(e.to_string()))?;

        let mut nonce = [0u8; NONCE_SIZE];
        getrandom::fill(&mut nonce).map_err(|e| {
            error!(error = %e, "failed to draw token nonce");
            TokenError::Serialization(e.to_string())
        })?;

        let ciphertext = self
            .cipher
            .encrypt(
                XNonce::from_slice(&nonce),
                AeadPayload {
                    msg: &plaintext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::Serialization("encryption failed".to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(format!("{TOKEN_HEADER}{}", URL_SAFE_NO_PAD.encode(blob)))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let body = token
            .strip_prefix(TOKEN_HEADER)
            .ok_or(TokenError::Malformed)?;
        let blob = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| TokenError::Malformed)?;

        if blob.len() < NONCE_SIZE + TAG_SIZE {
            return Err(TokenError::Malformed);
        }

        let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(
                XNonce::from_slice(nonce),
                AeadPayload {
                    msg: ciphertext,
                    aad: TOKEN_HEADER.as_bytes(),
                },
            )
            .map_err(|_| TokenError::SignatureInvalid)?;

        let payload: Payload =
            serde_json::from_slice(&plaintext).map_err(|_| TokenError::Malformed)?;

        payload.ensure_valid()
    }
}

/// Factory: build the process-wide `TokenMaker` from application `Config`.
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Config;
use crate::services::token::jwt::JwtMaker;
use crate::services::token::maker::{TokenError, TokenMaker};
use crate::services::token::sealed::SealedMaker;

/// Token protection scheme, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScheme {
    /// HMAC-signed JWT (integrity only).
    Jwt,
    /// XChaCha20-Poly1305 sealed blob (confidentiality + integrity).
    Sealed,
}

impl FromStr for TokenScheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "sealed" => Ok(Self::Sealed),
            _ => Err(()),
        }
    }
}

pub fn build_token_maker(config: &Config) -> Result<Arc<dyn TokenMaker>, TokenError> {
    let key = config.token_symmetric_key.as_bytes();

    let maker: Arc<dyn TokenMaker> = match config.token_scheme {
        TokenScheme::Jwt => Arc::new(JwtMaker::new(key)?),
        TokenScheme::Sealed => Arc::new(SealedMaker::new(key)?),
    };

    Ok(maker)
}

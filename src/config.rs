/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, token scheme/key, TTL など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use chrono::Duration;

use crate::services::token::TokenScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,

    pub token_scheme: TokenScheme,
    // Raw bytes of this string are the symmetric key.
    pub token_symmetric_key: String,
    pub access_token_ttl: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material or credentials
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("token_scheme", &self.token_scheme)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let token_scheme = match std::env::var("TOKEN_SCHEME") {
            Ok(v) => v
                .parse::<TokenScheme>()
                .map_err(|_| ConfigError::Invalid("TOKEN_SCHEME"))?,
            Err(_) => TokenScheme::Sealed,
        };

        let token_symmetric_key = std::env::var("TOKEN_SYMMETRIC_KEY")
            .map_err(|_| ConfigError::Missing("TOKEN_SYMMETRIC_KEY"))?;

        let access_token_ttl_seconds = match std::env::var("ACCESS_TOKEN_TTL_SECONDS") {
            Ok(v) => v
                .parse::<i64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?,
            Err(_) => 900, // 15 min
        };
        let access_token_ttl = Duration::try_seconds(access_token_ttl_seconds)
            .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))?;

        Ok(Self {
            addr,
            app_env,
            database_url,
            token_scheme,
            token_symmetric_key,
            access_token_ttl,
        })
    }

    #[cfg(test)]
    pub fn for_tests(token_scheme: TokenScheme, key: &str) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            database_url: String::new(),
            token_scheme,
            token_symmetric_key: key.to_string(),
            access_token_ttl: Duration::minutes(1),
        }
    }
}

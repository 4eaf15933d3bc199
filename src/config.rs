//! Process-wide configuration.
//!
//! Loaded once from the environment (after `.env`) at startup and handed to
//! the components that need it by reference.

use std::env;
use std::str::FromStr;

use crate::auth::{password::HashParams, token::MAX_TTL_SECS};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// HMAC secret for signing bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_ttl_secs: i64,
    pub hash_params: HashParams,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            database_url: "sqlite://storefront.db".to_string(),
            db_max_connections: 5,
            jwt_secret: "your-secret-key".to_string(),
            jwt_ttl_secs: 3600 * 24 * 7,
            hash_params: HashParams::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys fall back to
    /// the defaults; set but unparseable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_ttl_secs: parse_or(&lookup, "JWT_EXP", defaults.jwt_ttl_secs)?,
            hash_params: HashParams {
                memory_kib: parse_or(&lookup, "HASH_MEMORY_KIB", defaults.hash_params.memory_kib)?,
                iterations: parse_or(&lookup, "HASH_ITERATIONS", defaults.hash_params.iterations)?,
                parallelism: parse_or(
                    &lookup,
                    "HASH_PARALLELISM",
                    defaults.hash_params.parallelism,
                )?,
            },
        };

        if config.jwt_ttl_secs <= 0 || config.jwt_ttl_secs > MAX_TTL_SECS {
            return Err(ConfigError::InvalidValue("JWT_EXP".to_string()));
        }
        if config.jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if let Err(e) = config.hash_params.to_params() {
            return Err(ConfigError::InvalidValue(format!(
                "HASH_MEMORY_KIB/HASH_ITERATIONS/HASH_PARALLELISM ({e})"
            )));
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, fallback: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(fallback),
    }
}

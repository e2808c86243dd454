// Process configuration loaded from the environment at startup

use thiserror::Error;

/// Configuration errors surfaced before the server starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),
    #[error("{0} is not a valid value: {1}")]
    Invalid(&'static str, String),
}

/// Runtime configuration
///
/// Every field is required. Starting without a signing secret or a token
/// lifetime would silently issue unverifiable tokens, so a missing variable
/// aborts startup instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
}

impl Config {
    /// Read configuration from environment variables
    ///
    /// Expects `DATABASE_URL`, `PORT`, `JWT_SECRET` and `JWT_TTL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let port = require("PORT")?
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid("PORT", e.to_string()))?;
        let jwt_secret = require("JWT_SECRET")?;
        let jwt_ttl_secs = require("JWT_TTL_SECS")?
            .parse::<i64>()
            .map_err(|e| ConfigError::Invalid("JWT_TTL_SECS", e.to_string()))?;

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            jwt_ttl_secs,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

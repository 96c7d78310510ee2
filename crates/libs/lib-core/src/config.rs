//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite:data/marketplace.db` |
//! | `JWT_SECRET` | required |
//! | `JWT_EXPIRATION_HOURS` | `72` |
//! | `HASH_COST` | `2` |
//!
//! The validated [`Config`] is carried in the web layer's application state;
//! there is no global instance.

use lib_utils::envs::{self, get_env, get_env_or, get_env_parse_or};
use thiserror::Error;

/// Default token lifetime.
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 72;

/// Default Argon2 time cost.
pub const DEFAULT_HASH_COST: u32 = 2;

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{0} has an invalid format")]
    WrongFormat(&'static str),

    #[error("{0}")]
    Invalid(String),
}

impl From<envs::Error> for ConfigError {
    fn from(err: envs::Error) -> Self {
        match err {
            envs::Error::MissingEnv(name) => ConfigError::Missing(name),
            envs::Error::WrongFormat(name) => ConfigError::WrongFormat(name),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Argon2 time cost (iterations) used when hashing new passwords
    ///
    /// Valid range: 1-10
    pub hash_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/marketplace.db");
        let jwt_secret = get_env("JWT_SECRET")?;
        let jwt_expiration_hours =
            get_env_parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?;
        let hash_cost = get_env_parse_or("HASH_COST", DEFAULT_HASH_COST)?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            hash_cost,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err(ConfigError::Invalid(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        if self.hash_cost < 1 || self.hash_cost > 10 {
            return Err(ConfigError::Invalid(
                "HASH_COST must be between 1 and 10".to_string(),
            ));
        }

        Ok(())
    }
}

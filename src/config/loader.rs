//! Configuration loading from disk and environment.
//!
//! Precedence: defaults < TOML file < environment variables. Validation
//! runs last and fails startup on missing secrets, matching the rule that
//! a misconfigured service should refuse to boot rather than limp.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} is required but not set")]
    MissingRequired(&'static str),
}

/// Load configuration, optionally from a TOML file, then apply environment
/// overrides and validate.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            toml::from_str(&raw)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(addr) = env::var("SKYMINT_BIND_ADDRESS") {
        config.server.bind_address = addr;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        config.auth.jwt_secret = secret;
    }
    if let Ok(key) = env::var("OPENWEATHER_API_KEY") {
        config.providers.openweather_api_key = key;
    }
    if let Ok(key) = env::var("COINGECKO_API_KEY") {
        config.providers.coingecko_api_key = key;
    }
}

/// Semantic validation; serde handles the syntactic part.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.auth.jwt_secret.is_empty() {
        return Err(ConfigError::MissingRequired("JWT_SECRET"));
    }
    if config.providers.openweather_api_key.is_empty() {
        return Err(ConfigError::MissingRequired("OPENWEATHER_API_KEY"));
    }
    if config.providers.coingecko_api_key.is_empty() {
        return Err(ConfigError::MissingRequired("COINGECKO_API_KEY"));
    }
    Ok(())
}

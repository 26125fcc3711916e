//! Runtime configuration.
//!
//! Loaded from environment variables at startup; a `.env` file in the working
//! directory is honoured for local development.

use std::time::Duration;

use flashy_core::model::UserId;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_DB_URL: &str = "sqlite://flashygen.sqlite3";
pub const DEFAULT_GENERATOR_URL: &str = "http://localhost:8000";
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 120;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub generator_url: Url,
    pub generator_timeout: Duration,
    /// Identity to use verbatim instead of the stored or anonymous one.
    pub user_id: Option<UserId>,
}

impl AppConfig {
    /// Reads `FLASHY_*` variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but unusable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("FLASHY_DB_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        let generator_raw =
            lookup("FLASHY_GENERATOR_URL").unwrap_or_else(|| DEFAULT_GENERATOR_URL.to_string());
        let generator_url = parse_generator_url(&generator_raw)
            .map_err(|e| ConfigError::InvalidValue("FLASHY_GENERATOR_URL".into(), e))?;

        let generator_timeout = match lookup("FLASHY_GENERATOR_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("FLASHY_GENERATOR_TIMEOUT_SECS".into(), e.to_string())
            })?),
            None => Duration::from_secs(DEFAULT_GENERATOR_TIMEOUT_SECS),
        };

        let user_id = lookup("FLASHY_USER_ID")
            .filter(|v| !v.trim().is_empty())
            .map(UserId::new)
            .transpose()
            .map_err(|e| ConfigError::InvalidValue("FLASHY_USER_ID".into(), e.to_string()))?;

        Ok(Self {
            database_url,
            generator_url,
            generator_timeout,
            user_id,
        })
    }
}

/// Accepts only absolute http(s) URLs.
///
/// # Errors
///
/// Returns a description of the problem.
pub fn parse_generator_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

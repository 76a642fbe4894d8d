//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

pub const DEFAULT_WGER_API_URL: &str = "https://wger.de/api/v2/exercise/";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Users persist in Postgres when set, in process memory otherwise.
    pub database_url: Option<String>,
    pub log_level: Level,
    pub wger_api_url: String,
    pub wger_api_key: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Exercise Catalog Settings ---
        let wger_api_url =
            std::env::var("WGER_API_URL").unwrap_or_else(|_| DEFAULT_WGER_API_URL.to_string());
        if !wger_api_url.starts_with("http://") && !wger_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "WGER_API_URL".to_string(),
                format!("'{}' is not an http(s) URL", wger_api_url),
            ));
        }
        let wger_api_key = std::env::var("WGER_API_KEY").ok();

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            wger_api_url,
            wger_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "BIND_ADDRESS",
        "DATABASE_URL",
        "RUST_LOG",
        "WGER_API_URL",
        "WGER_API_KEY",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_environment_is_empty() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, None);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.wger_api_url, DEFAULT_WGER_API_URL);
        assert_eq!(config.wger_api_key, None);
    }

    #[test]
    #[serial]
    fn values_are_read_from_environment() {
        clear_env();
        std::env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
        std::env::set_var("DATABASE_URL", "postgres://localhost/fitness");
        std::env::set_var("RUST_LOG", "debug");
        std::env::set_var("WGER_API_KEY", "secret");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.bind_address, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/fitness")
        );
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.wger_api_key.as_deref(), Some("secret"));
    }

    #[test]
    #[serial]
    fn invalid_bind_address_is_rejected() {
        clear_env();
        std::env::set_var("BIND_ADDRESS", "not-an-address");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue(ref var, _)) if var == "BIND_ADDRESS"));
    }

    #[test]
    #[serial]
    fn invalid_log_level_is_rejected() {
        clear_env();
        std::env::set_var("RUST_LOG", "chatty");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue(ref var, _)) if var == "RUST_LOG"));
    }

    #[test]
    #[serial]
    fn blank_database_url_means_in_memory() {
        clear_env();
        std::env::set_var("DATABASE_URL", "  ");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.database_url, None);
    }
}

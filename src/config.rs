//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; handlers only ever see the cached
//! `Config` inside `AppState`.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS (the mobile SPA origin)
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Root directory for the JSON-file store.
    /// `None` runs the service on the in-memory store (nothing survives
    /// a restart); used for tests and quick local runs.
    pub data_dir: Option<PathBuf>,
    /// Seconds between store re-scans that detect writes by other
    /// processes sharing the data directory. `0` disables the poller;
    /// change events from this process are always published regardless.
    pub poll_interval_secs: u64,
    /// Allow `POST /api/auth/session` with an empty body to sign in as
    /// the built-in demo user.
    pub demo_mode: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            data_dir: env::var("FITBRIDGE_DATA_DIR").ok().map(PathBuf::from),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            demo_mode: env::var("DEMO_MODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8000,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            data_dir: None,
            poll_interval_secs: 0,
            demo_mode: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::remove_var("PORT");
        env::remove_var("POLL_INTERVAL_SECS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8000);
        assert_eq!(config.poll_interval_secs, 5);
        assert!(!config.jwt_signing_key.is_empty());
    }

    #[test]
    fn test_demo_mode_flag_parsing() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");

        env::set_var("DEMO_MODE", "true");
        assert!(Config::from_env().unwrap().demo_mode);

        env::set_var("DEMO_MODE", "0");
        assert!(!Config::from_env().unwrap().demo_mode);

        env::remove_var("DEMO_MODE");
    }
}

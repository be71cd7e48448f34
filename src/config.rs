//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use crate::gateways::WORKOUTS_KEY;
use crate::models::Coordinates;
use crate::services::session::{SessionOptions, DEFAULT_MAP_ZOOM};
use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory holding the workout snapshot
    pub data_dir: PathBuf,
    /// Storage key for the workout snapshot
    pub storage_key: String,
    /// Initial map zoom level
    pub map_zoom: u8,
    /// Fixed position to center the map on (skips IP lookup)
    pub home_position: Option<Coordinates>,
    /// IP geolocation endpoint
    pub geolocation_url: Option<String>,
    /// Timeout for the IP geolocation request
    pub geolocation_timeout_secs: u64,
}

impl Config {
    /// Config for tests: in-memory friendly defaults and a fixed position.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: env::temp_dir().join("mapty-tracker-test"),
            storage_key: WORKOUTS_KEY.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
            home_position: Some(Coordinates::new(37.3861, -122.0839)),
            geolocation_url: None,
            geolocation_timeout_secs: 10,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let home_position = match (env::var("HOME_LAT").ok(), env::var("HOME_LNG").ok()) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(
                parse_var("HOME_LAT", &lat)?,
                parse_var("HOME_LNG", &lng)?,
            )),
            (Some(_), None) => return Err(ConfigError::Missing("HOME_LNG")),
            (None, Some(_)) => return Err(ConfigError::Missing("HOME_LAT")),
            (None, None) => None,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            storage_key: env::var("STORAGE_KEY").unwrap_or_else(|_| WORKOUTS_KEY.to_string()),
            map_zoom: match env::var("MAP_ZOOM") {
                Ok(v) => parse_var("MAP_ZOOM", &v)?,
                Err(_) => DEFAULT_MAP_ZOOM,
            },
            home_position,
            geolocation_url: env::var("GEOLOCATION_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            geolocation_timeout_secs: match env::var("GEOLOCATION_TIMEOUT_SECS") {
                Ok(v) => parse_var("GEOLOCATION_TIMEOUT_SECS", &v)?,
                Err(_) => 10,
            },
        })
    }

    /// Session settings derived from this config.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            storage_key: self.storage_key.clone(),
            map_zoom: self.map_zoom,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(name, value.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

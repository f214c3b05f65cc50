use std::{env, num::ParseIntError, time::Duration};
use thiserror::Error;

pub const API_KEY_VAR: &str = "DISTANCE_MATRIX_API_KEY";
pub const BASE_URL_VAR: &str = "DISTANCE_MATRIX_BASE_URL";
pub const TIMEOUT_VAR: &str = "DISTANCE_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.distancematrix.ai/maps/api/distancematrix/json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("Invalid {var} value \"{value}\": {source}")]
    InvalidTimeout {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Connection settings for the distance matrix API.
#[derive(Debug, Clone)]
pub struct DistanceConfig {
    pub api_key: String,
    pub base_url: String,
    /// `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl DistanceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                    source,
                })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

use std::env;

use thiserror::Error;

use crate::model::DEFAULT_ML_ENDPOINT;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("POLYGON_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process-level settings, resolved once at startup. Only the data
/// provider key is mandatory; everything else has a sensible default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub polygon_api_key: String,
    pub ml_endpoint: String,
    pub port: u16,
}

impl Settings {
    /// Reads settings from the environment (after dotenv has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        let polygon_api_key = env::var("POLYGON_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let ml_endpoint = env::var("ML_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or_else(|| DEFAULT_ML_ENDPOINT.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            polygon_api_key,
            ml_endpoint,
            port,
        })
    }
}

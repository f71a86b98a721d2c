use std::env;
use std::path::PathBuf;

use crate::bundle::ArtifactPaths;
use crate::error::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_CITY: &str = "Dubai";
const DEFAULT_MODEL_PATH: &str = "artifacts/model.json";
const DEFAULT_SCALER_PATH: &str = "artifacts/scaler.json";
const DEFAULT_ENCODER_PATH: &str = "artifacts/one_hot_encoder.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Shown on the input form; every request is assumed to be in this city.
    pub city: String,
    pub artifacts: ArtifactPaths,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: or("HOST", DEFAULT_HOST),
            port,
            city: or("CITY", DEFAULT_CITY),
            artifacts: ArtifactPaths {
                model: PathBuf::from(or("MODEL_PATH", DEFAULT_MODEL_PATH)),
                scaler: PathBuf::from(or("SCALER_PATH", DEFAULT_SCALER_PATH)),
                encoder: Some(PathBuf::from(or("ENCODER_PATH", DEFAULT_ENCODER_PATH))),
            },
        })
    }
}

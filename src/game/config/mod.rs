//! Config Module
//!
//! Tunable parameters for the block game and the target cutter.
//! Every config has a `Default` matching the demo setup and can be loaded
//! from a JSON file; missing fields fall back to their defaults.

pub mod block_config;
pub mod cutting_config;

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use block_config::BlockGameConfig;
pub use cutting_config::CuttingConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Read a config from a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

//! Application settings loading from config.toml
//!
//! Settings control how serial numbers are printed and how hard the issuer and range
//! allocator retry when a conditional update loses a race. Every field has a default,
//! so a missing file or an empty table is valid.

use crate::{
    core::{retry::RetryPolicy, serial::SerialFormat},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_VAR: &str = "SERIALBUDDY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How issued serial numbers are rendered
    pub serial: SerialFormat,
    /// Conflict retry budget for conditional updates
    pub retry: RetryPolicy,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if settings.retry.max_attempts == 0 {
        return Err(Error::Config {
            message: "retry.max_attempts must be at least 1".to_string(),
        });
    }

    Ok(settings)
}

/// Loads settings from `$SERIALBUDDY_CONFIG`, falling back to ./config.toml.
///
/// A missing file yields the defaults; a present but malformed file is an error.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_settings(&path)
    } else {
        info!("No settings file at {path}, using defaults");
        Ok(Settings::default())
    }
}

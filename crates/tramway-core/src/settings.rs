//! Settings for the tramway routing engine.
//!
//! This module provides the [`Settings`] struct and its configuration-file
//! loaders. Loading order: defaults, then a TOML file, then environment
//! variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `TRAMWAY_DEBUG` | `debug` |
//! | `TRAMWAY_LOG_LEVEL` | `log_level` |
//! | `TRAMWAY_ROUTE_MANIFEST` | `route_manifest` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TramwayError, TramwayResult};

/// Configuration for the routing engine and its logging.
///
/// # Examples
///
/// ```
/// use tramway_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty log output, verbose spans).
    pub debug: bool,
    /// The tracing filter directive (e.g. "info", "tramway_routing=trace").
    pub log_level: String,
    /// Optional path to a route manifest to bulk-load at startup.
    pub route_manifest: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            route_manifest: None,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML string. Fields not present in the TOML
    /// keep their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or cannot be deserialized.
    pub fn from_toml_str(toml_str: &str) -> TramwayResult<Self> {
        toml::from_str(toml_str)
            .map_err(|e| TramwayError::ConfigurationError(format!("Failed to parse TOML: {e}")))
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> TramwayResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TramwayError::ConfigurationError(format!(
                "Failed to read settings file '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads settings from a TOML file and then applies environment
    /// variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> TramwayResult<Self> {
        let mut settings = Self::from_toml_file(path)?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Applies `TRAMWAY_*` environment variable overrides to this instance.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(debug) = std::env::var("TRAMWAY_DEBUG") {
            self.debug = matches!(debug.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Ok(level) = std::env::var("TRAMWAY_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(manifest) = std::env::var("TRAMWAY_ROUTE_MANIFEST") {
            self.route_manifest = Some(PathBuf::from(manifest));
        }
    }
}

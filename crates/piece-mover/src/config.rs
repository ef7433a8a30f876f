//! Configuration file loading for the piece mover.
//!
//! Settings come from an optional TOML file (`piece-mover.toml` in the
//! current directory by default). Command-line flags override file values.

use std::path::Path;
use std::str::FromStr;

use chess_core::{FenError, Setup};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or interpreting configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The start position is not a valid FEN placement.
    #[error("Invalid start position: {0}")]
    InvalidPosition(#[from] FenError),
    /// The log level is not one of trace, debug, info, warn, error.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Settings for one run of the mover.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MoverConfig {
    /// Start position as a FEN placement, optionally followed by the side to
    /// move. Defaults to the standard initial position.
    #[serde(default)]
    pub start_position: Option<String>,
    /// Stop after this many applied moves. Unbounded when absent.
    #[serde(default)]
    pub max_turns: Option<u32>,
    /// Maximum level of diagnostics written to stderr. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            start_position: None,
            max_turns: None,
            log_level: default_log_level(),
        }
    }
}

impl MoverConfig {
    /// Default configuration file name.
    pub const DEFAULT_PATH: &'static str = "piece-mover.toml";

    /// Loads the configuration at `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The setup to start from.
    pub fn setup(&self) -> Result<Setup, ConfigError> {
        match &self.start_position {
            Some(fen) => Ok(Setup::parse(fen)?),
            None => Ok(Setup::startpos()),
        }
    }

    /// The configured log level.
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

//! Core error types for pomocycle-core.
//!
//! Nothing in the core is fatal: configuration errors fall back to defaults,
//! save failures are reported to the caller, and side-effect failures are
//! swallowed at the boundary.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::router::PageKey;

/// Core error type for pomocycle-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Navigation errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the settings document
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the settings document
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// The document exists but is not valid TOML for the settings shape
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),

    /// A value is out of its allowed range
    #[error("Invalid settings value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No user configuration directory on this platform
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    /// The backend did not finish writing in time
    #[error("Saving settings did not finish within {}ms", timeout.as_millis())]
    SaveTimedOut { timeout: Duration },
}

/// Router-specific errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    /// A router needs at least one page
    #[error("routes should not be empty")]
    NoPages,

    /// Navigation to a page that was never registered
    #[error("no page registered for '{0}'")]
    UnknownPage(PageKey),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

//! Error types for the settings crate.
//!
//! This module provides structured error types for the settings store,
//! its binary persistence and the human-readable export formats.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A requested key is not present in the store.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A key holds a value of a different kind than requested.
    #[error("Setting '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The settings file could not be read or decoded.
    #[error("Failed to load settings from {}: {reason}", path.display())]
    Deserialize { path: PathBuf, reason: String },

    /// `save` was called on a store that has no backing path.
    #[error("Settings file path was never provided")]
    NoDestinationPath,

    /// The entries could not be encoded.
    #[error("Failed to encode settings: {0}")]
    Serialize(String),

    /// The export/import format is not recognised.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// An imported value has no settings representation.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every stage of the load pipeline.
//! - Define the error a `KeyValueStore` returns when it cannot hold an entry.
//!
//! Does NOT handle:
//! - Deciding whether an error is fatal (see `fail_fast.rs`).
//! - Logging; callers log at the point where an error is swallowed.
//!
//! Invariants:
//! - Every source error carries the path it was raised for.
//! - A missing source file is never an error (see `parser::read_source`).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a configuration source.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source file exists but could not be read.
    #[error("Failed to read config file at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source file was read but its content could not be parsed.
    #[error("Failed to parse config file at {path}: {source}")]
    MalformedSource {
        path: PathBuf,
        source: MalformedCause,
    },

    /// A format name was given that no parser is registered for.
    #[error("Unsupported config format: {name}")]
    UnsupportedFormat { name: String },
}

/// The underlying reason a source was rejected as malformed.
#[derive(Error, Debug)]
pub enum MalformedCause {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("top level must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("mapping key must be a scalar, found {found}")]
    NonScalarKey { found: &'static str },
}

/// Errors a key/value store returns when it cannot hold an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid key {key:?}: keys must be non-empty and contain no '=' or NUL")]
    InvalidKey { key: String },

    #[error("invalid value for {key}: values must not contain NUL")]
    InvalidValue { key: String },
}

impl ConfigError {
    /// Returns the path of the source this error was raised for, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::SourceUnavailable { path, .. }
            | ConfigError::MalformedSource { path, .. } => Some(path),
            ConfigError::UnsupportedFormat { .. } => None,
        }
    }
}

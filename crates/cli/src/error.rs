//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ConfigError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).

use confenv::ConfigError;
use thiserror::Error;

/// Structured exit codes for confenv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    #[allow(dead_code)]
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// The file could not be parsed, or the requested format is unknown.
    ///
    /// Scripts should fix the file or the `--format` value.
    MalformedSource = 2,

    /// The file exists but could not be read.
    SourceUnavailable = 3,

    /// The requested key is not set and no default was given.
    KeyNotFound = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MalformedSource { .. } | ConfigError::UnsupportedFormat { .. } => {
                ExitCode::MalformedSource
            }
            ConfigError::SourceUnavailable { .. } => ExitCode::SourceUnavailable,
        }
    }
}

/// Returned by `get` when the key is missing and no default was given.
#[derive(Error, Debug)]
#[error("Key '{key}' is not set in {file}")]
pub struct KeyNotFound {
    pub key: String,
    pub file: String,
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if cause.downcast_ref::<KeyNotFound>().is_some() {
                return ExitCode::KeyNotFound;
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::MalformedSource.as_i32(), 2);
        assert_eq!(ExitCode::SourceUnavailable.as_i32(), 3);
        assert_eq!(ExitCode::KeyNotFound.as_i32(), 4);
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = Err::<(), _>(ConfigError::SourceUnavailable {
            path: PathBuf::from("/root/secret.env"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
        .context("Failed to load configuration")
        .unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::SourceUnavailable);
    }

    #[test]
    fn test_unsupported_format_maps_to_malformed() {
        let err = anyhow::Error::from(ConfigError::UnsupportedFormat {
            name: "toml".to_string(),
        });
        assert_eq!(err.exit_code(), ExitCode::MalformedSource);
    }

    #[test]
    fn test_key_not_found_exit_code() {
        let err = anyhow::Error::from(KeyNotFound {
            key: "MISSING".to_string(),
            file: ".env".to_string(),
        });
        assert_eq!(err.exit_code(), ExitCode::KeyNotFound);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}

//! Source format detection.
//!
//! Responsibilities:
//! - Map a file path's extension to a `ConfigFormat`.
//! - Parse explicit format names (e.g. from a CLI flag).
//!
//! Invariants:
//! - Detection is total: any unrecognized or missing extension is `Env`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// Supported configuration source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConfigFormat {
    /// `KEY=VALUE` lines.
    #[default]
    Env,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Returns the canonical lowercase name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigFormat::Env => "env",
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }

    /// Whether sources of this format are nested trees rather than flat lines.
    pub fn is_structured(self) -> bool {
        !matches!(self, ConfigFormat::Env)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "env" | "dotenv" => Ok(ConfigFormat::Env),
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Detect the format of a configuration file from its extension.
///
/// The extension is whatever follows the last `.` of the file name, so a
/// bare dotfile such as `.json` counts as JSON. `.json` is JSON,
/// `.yml`/`.yaml` is YAML (case-insensitive). Everything else, including
/// files without an extension and `.env`, is treated as env format.
pub fn detect_format(path: impl AsRef<Path>) -> ConfigFormat {
    let ext = path.as_ref().file_name().and_then(|name| {
        name.to_string_lossy()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    });

    match ext.as_deref() {
        Some("json") => ConfigFormat::Json,
        Some("yml") | Some("yaml") => ConfigFormat::Yaml,
        _ => ConfigFormat::Env,
    }
}

//! Source parsing: raw file bytes into a `Value` tree.
//!
//! Responsibilities:
//! - Read a source file, treating a missing file as an empty source.
//! - Dispatch to the env, JSON, or YAML parser.
//!
//! Does NOT handle:
//! - Flattening the tree (see `flatten.rs`).
//! - Writing to the store (see `writer.rs`).
//!
//! Invariants:
//! - A missing file yields an empty mapping for every format.
//! - An unreadable file is `SourceUnavailable`; a syntax error is `MalformedSource`.

mod env;
mod structured;

use std::io::ErrorKind;
use std::path::Path;

pub use env::parse_env;
pub use structured::{parse_json, parse_yaml};

use crate::error::ConfigError;
use crate::format::ConfigFormat;
use crate::value::Mapping;

/// Read a source file. Returns `Ok(None)` when the file does not exist.
pub fn read_source(path: &Path) -> Result<Option<Vec<u8>>, ConfigError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parse already-read content in the given format.
///
/// `path` is only used to label errors.
pub fn parse_content(
    path: &Path,
    content: &[u8],
    format: ConfigFormat,
) -> Result<Mapping, ConfigError> {
    let parsed = match format {
        ConfigFormat::Env => Ok(parse_env(&String::from_utf8_lossy(content))),
        ConfigFormat::Json => parse_json(content),
        ConfigFormat::Yaml => parse_yaml(content),
    };

    parsed.map_err(|source| ConfigError::MalformedSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse the source at `path`.
pub fn parse_source(path: &Path, format: ConfigFormat) -> Result<Mapping, ConfigError> {
    match read_source(path)? {
        Some(content) => parse_content(path, &content, format),
        None => {
            tracing::debug!(path = %path.display(), "Config file not found, using empty source");
            Ok(Mapping::new())
        }
    }
}

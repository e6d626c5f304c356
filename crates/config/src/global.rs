//! One-shot loading and typed reads against the process environment.
//!
//! These functions do not track what they wrote, so there is no reload;
//! use [`ConfigHandle`](crate::ConfigHandle) when that is needed.

use std::collections::BTreeMap;
use std::path::Path;

use crate::accessors::{get_bool, get_int, get_str};
use crate::error::ConfigError;
use crate::flatten::FlatMap;
use crate::format::{ConfigFormat, detect_format};
use crate::handle::load_flat;
use crate::store::{KeyValueStore, ProcessEnv};
use crate::writer::{OverridePolicy, apply};

fn load_into_env(path: &Path, format: ConfigFormat) -> Result<FlatMap, ConfigError> {
    let flat = load_flat(path, format)?;
    Ok(apply(&ProcessEnv, &flat, OverridePolicy::initial_for(format)))
}

/// Load a configuration file of any supported format into the process
/// environment. Returns the entries that were written.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<FlatMap, ConfigError> {
    let path = path.as_ref();
    load_into_env(path, detect_format(path))
}

/// Load a file as env format regardless of its extension.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<FlatMap, ConfigError> {
    load_into_env(path.as_ref(), ConfigFormat::Env)
}

/// Read a string from the process environment.
pub fn env_str(key: &str, default: Option<&str>) -> String {
    get_str(&ProcessEnv, key, default)
}

/// Read an integer from the process environment.
pub fn env_int(key: &str, default: Option<i64>) -> i64 {
    get_int(&ProcessEnv, key, default)
}

/// Read a boolean from the process environment.
pub fn env_bool(key: &str, default: Option<bool>) -> bool {
    get_bool(&ProcessEnv, key, default)
}

/// Snapshot of the whole process environment.
pub fn env_all() -> BTreeMap<String, String> {
    ProcessEnv.snapshot()
}

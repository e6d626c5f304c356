//! Per-source configuration handle.
//!
//! Responsibilities:
//! - Track which file and format a configuration comes from.
//! - Run the load pipeline (parse, flatten, write) into a key/value store.
//! - Remember what was written so reloads remove stale keys.
//!
//! Does NOT handle:
//! - Parsing details (see `parser/`).
//! - Terminating the process on failure (see `fail_fast.rs`).
//!
//! Invariants / Assumptions:
//! - While loaded, `last_written` is exactly the set of store entries this
//!   handle wrote.
//! - A first load of an env file never replaces existing store values;
//!   structured loads and every reload always overwrite.
//! - A failed load leaves the handle unloaded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::accessors::{get_bool, get_int, get_str};
use crate::error::ConfigError;
use crate::flatten::{FlatMap, flatten_source};
use crate::format::{ConfigFormat, detect_format};
use crate::parser::parse_source;
use crate::store::{KeyValueStore, ProcessEnv};
use crate::writer::{OverridePolicy, apply, unapply};

/// Source file used when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".env";

/// Read the source at `path` and flatten it into store keys.
///
/// Nothing is written anywhere; this is the pure half of a load.
pub fn load_flat(path: &Path, format: ConfigFormat) -> Result<FlatMap, ConfigError> {
    let tree = parse_source(path, format)?;
    Ok(flatten_source(&tree, format))
}

/// A configuration source bound to a key/value store.
#[derive(Debug)]
pub struct ConfigHandle<S: KeyValueStore = ProcessEnv> {
    path: PathBuf,
    format: ConfigFormat,
    loaded: bool,
    last_written: FlatMap,
    last_error: Option<ConfigError>,
    store: S,
}

impl ConfigHandle<ProcessEnv> {
    /// Create a handle over the process environment and load it eagerly.
    pub fn from_env(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ProcessEnv)
    }
}

impl Default for ConfigHandle<ProcessEnv> {
    /// Loads `.env` from the working directory into the process environment.
    fn default() -> Self {
        Self::from_env(DEFAULT_CONFIG_FILE)
    }
}

impl<S: KeyValueStore> ConfigHandle<S> {
    fn unloaded(path: PathBuf, format: ConfigFormat, store: S) -> Self {
        Self {
            path,
            format,
            loaded: false,
            last_written: FlatMap::new(),
            last_error: None,
            store,
        }
    }

    /// Create a handle, detect its format, and load it eagerly.
    ///
    /// A load failure does not fail construction. It is logged and kept
    /// for [`ConfigHandle::load_error`]; the handle stays unloaded.
    pub fn new(path: impl Into<PathBuf>, store: S) -> Self {
        let path = path.into();
        let format = detect_format(&path);
        let mut handle = Self::unloaded(path, format, store);

        if let Err(e) = handle.load() {
            tracing::warn!(
                path = %handle.path.display(),
                error = %e,
                "Failed to load config file"
            );
            handle.last_error = Some(e);
        }
        handle
    }

    /// Create a handle, detect its format, and load it, returning any error.
    pub fn try_new(path: impl Into<PathBuf>, store: S) -> Result<Self, ConfigError> {
        let path = path.into();
        let format = detect_format(&path);
        Self::try_with_format(path, format, store)
    }

    /// Create a handle with an explicit format instead of detecting it.
    pub fn try_with_format(
        path: impl Into<PathBuf>,
        format: ConfigFormat,
        store: S,
    ) -> Result<Self, ConfigError> {
        let mut handle = Self::unloaded(path.into(), format, store);
        handle.load()?;
        Ok(handle)
    }

    /// Load the source into the store. Does nothing if already loaded.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        if self.loaded {
            return Ok(());
        }
        self.load_with(OverridePolicy::initial_for(self.format))
    }

    /// Remove everything this handle wrote and load the source again.
    ///
    /// Reloads always overwrite, so changed values in the file replace the
    /// ones written by the previous load.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.reset();
        self.load_with(OverridePolicy::Overwrite)
    }

    /// Switch to a different source file and load it.
    ///
    /// Keys from the previous file are removed first. The format is detected
    /// again from the new path.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        self.reset();
        self.path = path.into();
        self.format = detect_format(&self.path);
        self.load_with(OverridePolicy::Overwrite)
    }

    fn reset(&mut self) {
        unapply(&self.store, &self.last_written);
        self.last_written.clear();
        self.loaded = false;
    }

    fn load_with(&mut self, policy: OverridePolicy) -> Result<(), ConfigError> {
        tracing::debug!(
            path = %self.path.display(),
            format = %self.format,
            ?policy,
            "Loading config file"
        );

        let flat = load_flat(&self.path, self.format)?;
        self.last_written = apply(&self.store, &flat, policy);
        self.loaded = true;
        self.last_error = None;

        tracing::info!(
            path = %self.path.display(),
            format = %self.format,
            keys = self.last_written.len(),
            "Loaded config file"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Entries this handle wrote during its most recent successful load.
    pub fn last_written(&self) -> &FlatMap {
        &self.last_written
    }

    /// The error swallowed by [`ConfigHandle::new`], if its eager load failed.
    pub fn load_error(&self) -> Option<&ConfigError> {
        self.last_error.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the whole store, not just this handle's keys.
    pub fn all(&self) -> BTreeMap<String, String> {
        self.store.snapshot()
    }

    /// Read a string from the store, falling back to `default` (or `""`).
    pub fn str(&self, key: &str, default: Option<&str>) -> String {
        get_str(&self.store, key, default)
    }

    /// Read an integer from the store, falling back to `default` (or `0`).
    pub fn int(&self, key: &str, default: Option<i64>) -> i64 {
        get_int(&self.store, key, default)
    }

    /// Read a boolean from the store, falling back to `default` (or `false`).
    pub fn bool(&self, key: &str, default: Option<bool>) -> bool {
        get_bool(&self.store, key, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_loads_eagerly() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        fs::write(&path, r#"{"server": {"port": 8080}}"#).unwrap();

        let store = MemoryStore::new();
        let handle = ConfigHandle::new(&path, store.clone());

        assert!(handle.is_loaded());
        assert!(handle.load_error().is_none());
        assert_eq!(handle.format(), ConfigFormat::Json);
        assert_eq!(store.get("SERVER_PORT").as_deref(), Some("8080"));
        assert_eq!(handle.int("SERVER_PORT", None), 8080);
    }

    #[test]
    fn test_new_keeps_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "key: [unclosed\n").unwrap();

        let handle = ConfigHandle::new(&path, MemoryStore::new());

        assert!(!handle.is_loaded());
        assert!(matches!(
            handle.load_error(),
            Some(ConfigError::MalformedSource { .. })
        ));
        assert!(handle.last_written().is_empty());
    }

    #[test]
    fn test_try_new_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[").unwrap();

        let result = ConfigHandle::try_new(&path, MemoryStore::new());
        assert!(matches!(result, Err(ConfigError::MalformedSource { .. })));
    }

    #[test]
    fn test_load_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.env");
        fs::write(&path, "KEY=first\n").unwrap();

        let store = MemoryStore::new();
        let mut handle = ConfigHandle::new(&path, store.clone());

        fs::write(&path, "KEY=second\n").unwrap();
        handle.load().unwrap();

        assert_eq!(store.get("KEY").as_deref(), Some("first"));
    }

    #[test]
    fn test_failed_reload_leaves_handle_unloaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        fs::write(&path, r#"{"a": 1}"#).unwrap();

        let store = MemoryStore::new();
        let mut handle = ConfigHandle::new(&path, store.clone());
        assert_eq!(store.get("A").as_deref(), Some("1"));

        fs::write(&path, "{").unwrap();
        assert!(handle.reload().is_err());
        assert!(!handle.is_loaded());
        assert!(handle.last_written().is_empty());
        assert!(store.get("A").is_none());

        fs::write(&path, r#"{"a": 2}"#).unwrap();
        handle.load().unwrap();
        assert_eq!(store.get("A").as_deref(), Some("2"));
    }

    #[test]
    fn test_try_with_format_overrides_detection() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.conf");
        fs::write(&path, "db:\n  host: example\n").unwrap();

        let store = MemoryStore::new();
        let handle =
            ConfigHandle::try_with_format(&path, ConfigFormat::Yaml, store.clone()).unwrap();

        assert_eq!(handle.format(), ConfigFormat::Yaml);
        assert_eq!(store.get("DB_HOST").as_deref(), Some("example"));
    }
}

//! Opt-in wrappers that treat a load failure as fatal.
//!
//! Intended for program startup, where a broken configuration file should
//! stop the process with a clear message. Library code should call the
//! `Result`-returning operations instead.

use std::path::Path;

use crate::flatten::FlatMap;
use crate::global::{load_config_file, load_env_file};
use crate::handle::ConfigHandle;
use crate::store::KeyValueStore;

/// Panicking counterparts of the [`ConfigHandle`] load operations.
pub trait MustLoad {
    /// Like `load`, but panics with a descriptive message on failure.
    fn must_load(&mut self);
}

impl<S: KeyValueStore> MustLoad for ConfigHandle<S> {
    fn must_load(&mut self) {
        if let Err(e) = self.load() {
            tracing::error!(path = %self.path().display(), error = %e, "Config load failed");
            panic!("failed to load config file: {e}");
        }
    }
}

/// Like [`load_config_file`], but panics with a descriptive message on failure.
pub fn must_load_config_file(path: impl AsRef<Path>) -> FlatMap {
    match load_config_file(path.as_ref()) {
        Ok(written) => written,
        Err(e) => {
            tracing::error!(path = %path.as_ref().display(), error = %e, "Config load failed");
            panic!("failed to load config file: {e}");
        }
    }
}

/// Like [`load_env_file`], but panics with a descriptive message on failure.
pub fn must_load_env_file(path: impl AsRef<Path>) -> FlatMap {
    match load_env_file(path.as_ref()) {
        Ok(written) => written,
        Err(e) => {
            tracing::error!(path = %path.as_ref().display(), error = %e, "Env file load failed");
            panic!("failed to load env file: {e}");
        }
    }
}

//! Configuration loading from env, JSON, and YAML files.
//!
//! A source file is parsed into a value tree, flattened into uppercase
//! `SECTION_KEY` names, and written into a key/value store (the process
//! environment by default). Typed accessors then read values back with
//! default fallback.
//!
//! ```no_run
//! use confenv::{ConfigHandle, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let config = ConfigHandle::new("config.yaml", store);
//! let port = config.int("SERVER_PORT", Some(8080));
//! # let _ = port;
//! ```

pub mod accessors;
mod error;
pub mod fail_fast;
pub mod flatten;
mod format;
mod global;
mod handle;
pub mod parser;
mod store;
pub mod value;
pub mod writer;

pub use error::{ConfigError, MalformedCause, StoreError};
pub use fail_fast::{MustLoad, must_load_config_file, must_load_env_file};
pub use flatten::FlatMap;
pub use format::{ConfigFormat, detect_format};
pub use global::{env_all, env_bool, env_int, env_str, load_config_file, load_env_file};
pub use handle::{ConfigHandle, DEFAULT_CONFIG_FILE, load_flat};
pub use store::{KeyValueStore, MemoryStore, ProcessEnv};
pub use value::{Mapping, Number, Value};
pub use writer::OverridePolicy;


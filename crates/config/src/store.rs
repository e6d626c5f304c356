//! Key/value stores that loaded configuration is written into.
//!
//! Responsibilities:
//! - Define the `KeyValueStore` capability used by the writer, the handle,
//!   and the typed accessors.
//! - Provide `ProcessEnv` (the process environment) and `MemoryStore`
//!   (an isolated, shareable in-memory map).
//!
//! Does NOT handle:
//! - Override policy (see `writer.rs`).
//!
//! Invariants:
//! - A store never holds an entry it rejected with `StoreError`.
//! - Writes are individually visible; there is no atomicity across keys.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::StoreError;

/// A string-keyed, string-valued namespace.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability so one store can back several handles.
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn unset(&self, key: &str);

    /// Returns a copy of every entry in the store.
    fn snapshot(&self) -> BTreeMap<String, String>;

    /// Whether `key` is present, even with an empty value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn unset(&self, key: &str) {
        (**self).unset(key)
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        (**self).snapshot()
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

/// The process environment.
///
/// Mutating the environment is only sound while no other thread reads or
/// writes it. Callers that load configuration from several threads must
/// serialize those loads themselves, or use [`MemoryStore`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    fn valid_key(key: &str) -> bool {
        !key.is_empty() && !key.contains('=') && !key.contains('\0')
    }
}

impl KeyValueStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        if !Self::valid_key(key) {
            return None;
        }
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if !Self::valid_key(key) {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
            });
        }
        if value.contains('\0') {
            return Err(StoreError::InvalidValue {
                key: key.to_string(),
            });
        }

        // SAFETY: key and value were validated above, and the type's contract
        // requires callers to keep environment mutation single-threaded.
        unsafe {
            std::env::set_var(key, value);
        }
        Ok(())
    }

    fn unset(&self, key: &str) {
        if !Self::valid_key(key) {
            return;
        }

        // SAFETY: key was validated above; see the type-level contract.
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    fn contains(&self, key: &str) -> bool {
        Self::valid_key(key) && std::env::var_os(key).is_some()
    }
}

/// An in-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

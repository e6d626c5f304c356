//! Writing flattened configuration into a key/value store.
//!
//! Responsibilities:
//! - Apply a `FlatMap` to a store under an `OverridePolicy`.
//! - Remove exactly the keys a previous apply wrote.
//!
//! Invariants:
//! - `apply` returns only the entries it actually wrote. Keys left alone
//!   because they already existed, or rejected by the store, are not
//!   returned and so are never removed by a later `unapply`.

use crate::flatten::FlatMap;
use crate::format::ConfigFormat;
use crate::store::KeyValueStore;

/// How `apply` treats keys that already exist in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
    /// Leave existing keys untouched; the first definition wins.
    PreserveExisting,
    /// Always write, replacing any existing value.
    Overwrite,
}

impl OverridePolicy {
    /// The policy used by a first load of a source in `format`.
    ///
    /// Env files never shadow variables already set in the store, while
    /// structured files always write. Reloads use `Overwrite` regardless.
    pub fn initial_for(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Env => OverridePolicy::PreserveExisting,
            ConfigFormat::Json | ConfigFormat::Yaml => OverridePolicy::Overwrite,
        }
    }
}

/// Write `flat` into `store` and return the entries that were written.
pub fn apply<S: KeyValueStore + ?Sized>(
    store: &S,
    flat: &FlatMap,
    policy: OverridePolicy,
) -> FlatMap {
    let mut written = FlatMap::new();

    for (key, value) in flat {
        if policy == OverridePolicy::PreserveExisting && store.contains(key) {
            tracing::debug!(key = %key, "Keeping existing value");
            continue;
        }

        match store.set(key, value) {
            Ok(()) => {
                written.insert(key.clone(), value.clone());
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Skipping config entry rejected by store");
            }
        }
    }

    written
}

/// Remove every key in `previous` from `store`.
pub fn unapply<S: KeyValueStore + ?Sized>(store: &S, previous: &FlatMap) {
    for key in previous.keys() {
        store.unset(key);
    }
}

//! Typed reads from a key/value store with default fallback.
//!
//! Invariants:
//! - An empty value counts as unset.
//! - A value that fails to parse falls back to the default.
//! - With no default, the fallback is the type's zero value.

use crate::store::KeyValueStore;

fn non_empty<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store.get(key).filter(|v| !v.is_empty())
}

/// Read a string, falling back to `default` (or `""`).
pub fn get_str<S: KeyValueStore + ?Sized>(store: &S, key: &str, default: Option<&str>) -> String {
    non_empty(store, key).unwrap_or_else(|| default.unwrap_or_default().to_string())
}

/// Read a signed integer, falling back to `default` (or `0`).
pub fn get_int<S: KeyValueStore + ?Sized>(store: &S, key: &str, default: Option<i64>) -> i64 {
    non_empty(store, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(|| default.unwrap_or_default())
}

/// Read a boolean, falling back to `default` (or `false`).
///
/// Accepts `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, case-insensitive.
pub fn get_bool<S: KeyValueStore + ?Sized>(store: &S, key: &str, default: Option<bool>) -> bool {
    non_empty(store, key)
        .and_then(|v| parse_bool(&v))
        .unwrap_or_else(|| default.unwrap_or_default())
}

/// Parse a boolean flag value.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

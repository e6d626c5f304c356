//! `KEY=VALUE` line parser.
//!
//! Invariants:
//! - The result is always a flat mapping of strings; env sources never nest.
//! - Parsing never fails. Lines that do not fit the format are skipped.

use crate::value::{Mapping, Value};

/// Parse env-format text into a flat mapping.
///
/// Blank lines and lines starting with `#` are ignored. Each remaining line
/// is split on its first `=`; lines without one are skipped. Keys and values
/// are trimmed, and one matching pair of `"` or `'` quotes around the value
/// is removed. Later definitions of a key replace earlier ones.
pub fn parse_env(content: &str) -> Mapping {
    let mut mapping = Mapping::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = strip_matching_quotes(value.trim());
        mapping.insert(key.to_string(), Value::String(value.to_string()));
    }

    mapping
}

/// Remove one pair of surrounding quotes when both ends use the same style.
fn strip_matching_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return value;
    }

    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if first == last && (first == b'"' || first == b'\'') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

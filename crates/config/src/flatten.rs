//! Flattening of value trees into store-ready key/value pairs.
//!
//! Responsibilities:
//! - Walk a `Mapping` and join nested keys with `.` into qualified names.
//! - Collapse sequences into one comma-joined string.
//! - Convert qualified names into store keys (`a.b_c` -> `A_B_C`).
//!
//! Invariants:
//! - Every leaf of the tree produces exactly one entry.
//! - Sequence elements are rendered, never flattened.

use std::collections::BTreeMap;

use crate::format::ConfigFormat;
use crate::value::{Mapping, Value};

/// A nesting-free view of a configuration source.
pub type FlatMap = BTreeMap<String, String>;

/// Flatten a mapping into qualified names (`parent.child`) and string values.
pub fn flatten(mapping: &Mapping) -> FlatMap {
    let mut out = FlatMap::new();
    flatten_into(mapping, "", &mut out);
    out
}

fn flatten_into(mapping: &Mapping, prefix: &str, out: &mut FlatMap) {
    for (key, node) in mapping {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match node {
            Value::Mapping(child) => flatten_into(child, &full_key, out),
            Value::Sequence(items) => {
                out.insert(full_key, join_sequence(items));
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                out.insert(full_key, node.render());
            }
        }
    }
}

/// Render each element and join them with a comma.
pub fn join_sequence(items: &[Value]) -> String {
    items
        .iter()
        .map(Value::render)
        .collect::<Vec<_>>()
        .join(",")
}

/// Convert a qualified name into its store key: uppercase, `.` replaced by `_`.
///
/// Case mapping is per character. A character whose uppercase form is
/// more than one character (`ß`) is kept as is.
pub fn to_store_key(qualified: &str) -> String {
    qualified
        .chars()
        .map(|c| match c {
            '.' => '_',
            c => upper_char(c),
        })
        .collect()
}

fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Flatten a parsed source into the exact keys that will be written to the store.
///
/// Structured formats get the store-key transform. Env keys are already
/// store keys and are kept verbatim.
pub fn flatten_source(mapping: &Mapping, format: ConfigFormat) -> FlatMap {
    let flat = flatten(mapping);
    if !format.is_structured() {
        return flat;
    }

    flat.into_iter()
        .map(|(key, value)| (to_store_key(&key), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    fn mapping(doc: serde_json::Value) -> Mapping {
        match Value::from(doc) {
            Value::Mapping(m) => m,
            other => panic!("expected mapping, got {}", other.kind()),
        }
    }

    #[test]
    fn test_nested_keys_are_dot_joined() {
        let flat = flatten(&mapping(json!({"a": {"b": {"c": 1}}, "top": "x"})));
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("a.b.c").map(String::as_str), Some("1"));
        assert_eq!(flat.get("top").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_store_keys_for_nested_source() {
        let flat = flatten_source(&mapping(json!({"a": {"b": {"c": 1}}})), ConfigFormat::Json);
        assert_eq!(flat, FlatMap::from([("A_B_C".to_string(), "1".to_string())]));
    }

    #[test]
    fn test_sequences_are_comma_joined() {
        let flat = flatten_source(&mapping(json!({"list": ["x", "y", "z"]})), ConfigFormat::Yaml);
        assert_eq!(flat.get("LIST").map(String::as_str), Some("x,y,z"));
    }

    #[test]
    fn test_empty_sequence_is_empty_string() {
        let flat = flatten_source(&mapping(json!({"list": []})), ConfigFormat::Json);
        assert_eq!(flat.get("LIST").map(String::as_str), Some(""));
    }

    #[test]
    fn test_mixed_sequence_renders_each_element() {
        let items = vec![
            Value::Number(Number::Int(1)),
            Value::Bool(false),
            Value::Number(Number::Float(2.5)),
            Value::from(json!({"k": "v"})),
        ];
        assert_eq!(join_sequence(&items), r#"1,false,2.5,{"k":"v"}"#);
    }

    #[test]
    fn test_empty_nested_mapping_produces_nothing() {
        let flat = flatten(&mapping(json!({"empty": {}, "x": true})));
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("x").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_to_store_key() {
        assert_eq!(to_store_key("database.host"), "DATABASE_HOST");
        assert_eq!(to_store_key("api_key"), "API_KEY");
        assert_eq!(to_store_key("app.features.0"), "APP_FEATURES_0");
    }

    #[test]
    fn test_to_store_key_keeps_length_per_char() {
        assert_eq!(to_store_key("straße"), "STRAßE");
        assert_eq!(to_store_key("café.ñ"), "CAFÉ_Ñ");
    }

    #[test]
    fn test_env_keys_are_kept_verbatim() {
        let mut source = Mapping::new();
        source.insert("lower_case".to_string(), Value::String("v".into()));
        let flat = flatten_source(&source, ConfigFormat::Env);
        assert_eq!(flat.get("lower_case").map(String::as_str), Some("v"));
    }
}

//! JSON and YAML parsers.
//!
//! Both delegate syntax to serde and convert the native document into a
//! `Value` tree. The top level must be a mapping; `null` or an empty
//! document counts as an empty mapping. YAML merge keys (`<<: *anchor`)
//! are expanded before conversion.

use crate::error::MalformedCause;
use crate::value::{Mapping, Value};

/// Parse a JSON document whose top level is an object.
pub fn parse_json(content: &[u8]) -> Result<Mapping, MalformedCause> {
    let doc: serde_json::Value = serde_json::from_slice(content)?;
    if doc.is_null() {
        return Ok(Mapping::new());
    }
    into_mapping(Value::from(doc))
}

/// Parse a YAML document whose top level is a mapping.
pub fn parse_yaml(content: &[u8]) -> Result<Mapping, MalformedCause> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Mapping::new());
    }

    let mut doc: serde_yaml::Value = serde_yaml::from_slice(content)?;
    if doc.is_null() {
        return Ok(Mapping::new());
    }
    doc.apply_merge()?;
    into_mapping(Value::try_from(doc)?)
}

fn into_mapping(value: Value) -> Result<Mapping, MalformedCause> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(MalformedCause::NotAMapping {
            found: other.kind(),
        }),
    }
}

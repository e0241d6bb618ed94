//! Masking of JSON documents embedded in strings.
//!
//! Only text whose first non-blank character is `{` or `[` is parsed. Object
//! members with string values are masked by key; arrays carry no names, so
//! their scalar elements are left alone and only nested objects/arrays are
//! visited. The document is re-serialized compactly with its key order kept.

use serde_json::Value as JsonValue;

use super::engine::MaskingEngine;

/// Whether `text` could hold a JSON object or array.
pub(crate) fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('{' | '['))
}

/// Masks string members of `node` whose key resolves to a rule.
pub(crate) fn mask_node(engine: &MaskingEngine, node: &mut JsonValue) {
    match node {
        JsonValue::Object(members) => {
            for (key, child) in members.iter_mut() {
                match child {
                    JsonValue::String(text) => {
                        if let Some(rule) = engine.resolve(key) {
                            *text = engine.redact(text, rule.text_mask());
                        }
                    }
                    JsonValue::Object(_) | JsonValue::Array(_) => mask_node(engine, child),
                    JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => {}
                }
            }
        }
        JsonValue::Array(items) => {
            for item in items.iter_mut().filter(|item| item.is_object() || item.is_array()) {
                mask_node(engine, item);
            }
        }
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => {}
    }
}

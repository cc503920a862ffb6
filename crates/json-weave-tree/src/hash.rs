//! Canonical digest of a tree.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hex SHA-256 over a key-sorted rendering of the tree.
///
/// Mapping order does not affect the digest, so two trees that compare
/// equal hash equal.
pub fn tree_sha256(value: &Value) -> String {
    let canonical = sort_keys(value).to_string();
    Sha256::digest(canonical.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

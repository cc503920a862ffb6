//! Built-in type definitions and schema augmentation.

use serde_json::{json, Map, Value};

/// Type names rewritten to `$defs` pointers during augmentation.
pub const BUILTIN_TYPES: [&str; 3] = ["image", "document", "reference"];

/// Copy of `schema` with the built-in `$defs` present and every
/// fragment typed `image`, `document`, or `reference` rewritten to a
/// `$ref` pointer at the corresponding definition.
///
/// Existing `$defs` entries are left untouched, so augmenting an
/// already-augmented schema is a no-op.
pub fn augment(schema: &Value) -> Value {
    // Rewrite before attaching `$defs`: the root fragment itself may be
    // builtin-typed, and its `$ref` must still sit next to the
    // definitions it points into.
    let mut out = match rewrite_builtin_types(schema) {
        Value::Object(map) => map,
        other => return other,
    };

    let defs = out
        .entry("$defs".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(defs) = defs {
        defs.entry("image".to_string()).or_insert_with(image_def);
        defs.entry("document".to_string()).or_insert_with(document_def);
        defs.entry("reference".to_string()).or_insert_with(reference_def);
    }

    Value::Object(out)
}

fn image_def() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": {"type": "string", "enum": ["image"]},
            "url": {"type": "string", "format": "uri"}
        },
        "required": ["type", "url"]
    })
}

fn document_def() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": {"type": "string", "enum": ["document"]},
            "contents": {
                "type": "array",
                "items": {"type": "string"}
            },
            "images": {
                "type": "array",
                "items": {"$ref": "#/$defs/image"}
            },
            "metadata": {
                "type": "object",
                "properties": {
                    "filename": {"type": "string"},
                    "created_at": {"type": "string", "format": "date-time"}
                }
            }
        },
        "required": ["type", "contents"]
    })
}

fn reference_def() -> Value {
    json!({
        "oneOf": [
            {
                "type": "object",
                "properties": {
                    "$ref": {"type": "string"}
                },
                "required": ["$ref"]
            },
            {"type": "null"}
        ]
    })
}

fn rewrite_builtin_types(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(t) = map.get("type").and_then(Value::as_str) {
                if BUILTIN_TYPES.contains(&t) {
                    return json!({"$ref": format!("#/$defs/{t}")});
                }
            }
            Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), rewrite_builtin_types(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(rewrite_builtin_types).collect()),
        other => other.clone(),
    }
}

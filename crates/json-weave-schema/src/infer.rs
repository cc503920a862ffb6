//! Structural schema inference from sample instances.
//!
//! Builds an object-rooted schema by merging the shapes of the supplied
//! samples: properties union across samples, `required` narrowing to the
//! keys every sample carries, and array item shapes merged element-wise.

use serde_json::{json, Map, Value};

/// Infer a schema describing every supplied sample.
///
/// # Example
///
/// ```
/// use json_weave_schema::infer_schema;
/// use serde_json::json;
///
/// let a = json!({"name": "x", "count": 1});
/// let b = json!({"name": "y"});
/// let schema = infer_schema([&a, &b]);
/// assert_eq!(schema["properties"]["name"], json!({"type": "string"}));
/// assert_eq!(schema["required"], json!(["name"]));
/// ```
pub fn infer_schema<'a>(samples: impl IntoIterator<Item = &'a Value>) -> Value {
    let mut schema: Option<Value> = None;
    for sample in samples {
        let next = infer_value(sample);
        schema = Some(match schema {
            None => next,
            Some(prev) => merge(&prev, &next),
        });
    }
    schema.unwrap_or_else(|| json!({"type": "object", "properties": {}}))
}

fn infer_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({"type": "null"}),
        Value::Bool(_) => json!({"type": "boolean"}),
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({"type": "integer"}),
        Value::Number(_) => json!({"type": "number"}),
        Value::String(_) => json!({"type": "string"}),
        Value::Array(arr) => {
            let mut items: Option<Value> = None;
            for v in arr {
                let next = infer_value(v);
                items = Some(match items {
                    None => next,
                    Some(prev) => merge(&prev, &next),
                });
            }
            match items {
                None => json!({"type": "array"}),
                Some(items) => json!({"type": "array", "items": items}),
            }
        }
        Value::Object(map) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (k, v) in map {
                properties.insert(k.clone(), infer_value(v));
                required.push(Value::String(k.clone()));
            }
            json!({"type": "object", "properties": properties, "required": required})
        }
    }
}

fn merge(a: &Value, b: &Value) -> Value {
    if a == b {
        return a.clone();
    }
    let types = (
        a.get("type").and_then(Value::as_str),
        b.get("type").and_then(Value::as_str),
    );
    match types {
        (Some("object"), Some("object")) => merge_objects(a, b),
        (Some("array"), Some("array")) => merge_arrays(a, b),
        (Some("integer"), Some("number")) | (Some("number"), Some("integer")) => {
            json!({"type": "number"})
        }
        (Some(ta), Some(tb)) if ta == tb => a.clone(),
        _ => any_of(a, b),
    }
}

fn merge_objects(a: &Value, b: &Value) -> Value {
    let empty = Map::new();
    let props_a = a["properties"].as_object().unwrap_or(&empty);
    let props_b = b["properties"].as_object().unwrap_or(&empty);

    let mut properties = Map::new();
    for (k, va) in props_a {
        match props_b.get(k) {
            Some(vb) => properties.insert(k.clone(), merge(va, vb)),
            None => properties.insert(k.clone(), va.clone()),
        };
    }
    for (k, vb) in props_b {
        if !properties.contains_key(k) {
            properties.insert(k.clone(), vb.clone());
        }
    }

    // Only keys present in both samples stay required.
    let required: Vec<Value> = required_keys(a)
        .into_iter()
        .filter(|k| required_keys(b).contains(k))
        .map(Value::String)
        .collect();

    if required.is_empty() {
        json!({"type": "object", "properties": properties})
    } else {
        json!({"type": "object", "properties": properties, "required": required})
    }
}

fn merge_arrays(a: &Value, b: &Value) -> Value {
    match (a.get("items"), b.get("items")) {
        (Some(ia), Some(ib)) => json!({"type": "array", "items": merge(ia, ib)}),
        (Some(items), None) | (None, Some(items)) => {
            json!({"type": "array", "items": items.clone()})
        }
        (None, None) => json!({"type": "array"}),
    }
}

fn any_of(a: &Value, b: &Value) -> Value {
    let mut options: Vec<Value> = Vec::new();
    for candidate in [a, b] {
        let nested = match candidate.get("anyOf").and_then(Value::as_array) {
            Some(nested) => nested.clone(),
            None => vec![candidate.clone()],
        };
        for option in nested {
            if !options.contains(&option) {
                options.push(option);
            }
        }
    }
    json!({"anyOf": options})
}

fn required_keys(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|keys| {
            keys.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

//! Reference markers — placeholders pointing at a canonical value
//! elsewhere in the same tree.
//!
//! Two wire forms exist: the object form `{"$ref": "<target>"}` and the
//! legacy string form `"$ref:<target>"`. Both are accepted on ingestion
//! and normalized into [`Reference`]; the emission form is an explicit
//! [`RefStyle`] choice, never inferred from context.

use serde_json::{Map, Value};

use crate::access::get;
use crate::locate::locate;

/// Reserved key of the object marker form.
pub const REF_KEY: &str = "$ref";

/// Prefix of the legacy string marker form.
pub const REF_PREFIX: &str = "$ref:";

/// A normalized reference marker.
///
/// The target is a node uid, or — after a resolve pass — a formatted
/// path expression pointing at the first occurrence of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target: String,
}

/// Emission form for reference markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefStyle {
    /// `{"$ref": "<target>"}`
    #[default]
    Object,
    /// `"$ref:<target>"`
    Legacy,
}

impl Reference {
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }

    /// Normalize a marker in either wire form.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => map.get(REF_KEY)?.as_str().map(Self::new),
            Value::String(s) => s.strip_prefix(REF_PREFIX).map(Self::new),
            _ => None,
        }
    }

    /// Render the marker in the requested form.
    pub fn to_value(&self, style: RefStyle) -> Value {
        match style {
            RefStyle::Object => {
                let mut map = Map::new();
                map.insert(REF_KEY.to_string(), Value::String(self.target.clone()));
                Value::Object(map)
            }
            RefStyle::Legacy => Value::String(format!("{REF_PREFIX}{}", self.target)),
        }
    }
}

/// Flat, order-preserving list of every marker in the subtree.
pub fn extract_references(node: &Value) -> Vec<Reference> {
    let mut out = Vec::new();
    collect(node, &mut out);
    out
}

fn collect(node: &Value, out: &mut Vec<Reference>) {
    if let Some(r) = Reference::parse(node) {
        out.push(r);
        return;
    }
    match node {
        Value::Object(map) => {
            for v in map.values() {
                collect(v, out);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect(v, out);
            }
        }
        _ => {}
    }
}

/// Copy of `node` with every dangling marker replaced by null.
///
/// A marker dangles when its target neither locates as a uid nor reads
/// back as a path in `all_data`.
pub fn clean_dangling(all_data: &Value, node: &Value) -> Value {
    if let Some(r) = Reference::parse(node) {
        return if reference_resolves(all_data, &r) {
            node.clone()
        } else {
            Value::Null
        };
    }
    match node {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), clean_dangling(all_data, v)))
                .collect(),
        ),
        Value::Array(arr) => {
            Value::Array(arr.iter().map(|v| clean_dangling(all_data, v)).collect())
        }
        other => other.clone(),
    }
}

/// Whether a marker's target still points at something in `all_data`.
pub(crate) fn reference_resolves(all_data: &Value, reference: &Reference) -> bool {
    locate(all_data, &reference.target).is_some()
        || get(all_data, reference.target.as_str()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_wire_forms_normalize() {
        assert_eq!(
            Reference::parse(&json!({"$ref": "u-1"})),
            Some(Reference::new("u-1"))
        );
        assert_eq!(
            Reference::parse(&json!("$ref:u-1")),
            Some(Reference::new("u-1"))
        );
        assert_eq!(Reference::parse(&json!("plain string")), None);
        assert_eq!(Reference::parse(&json!({"other": 1})), None);
    }

    #[test]
    fn emission_form_is_an_explicit_choice() {
        let r = Reference::new("u-9");
        assert_eq!(r.to_value(RefStyle::Object), json!({"$ref": "u-9"}));
        assert_eq!(r.to_value(RefStyle::Legacy), json!("$ref:u-9"));
    }

    #[test]
    fn extraction_preserves_encounter_order() {
        let doc = json!({
            "a": {"$ref": "first"},
            "b": ["$ref:second", {"c": {"$ref": "third"}}]
        });
        let targets: Vec<String> = extract_references(&doc)
            .into_iter()
            .map(|r| r.target)
            .collect();
        assert_eq!(targets, vec!["first", "second", "third"]);
    }

    #[test]
    fn markers_do_not_nest() {
        // The object form is itself a mapping; it must be reported once,
        // not descended into.
        let doc = json!([{"$ref": "only"}]);
        assert_eq!(extract_references(&doc).len(), 1);
    }

    #[test]
    fn dangling_markers_become_null() {
        let all = json!({"keep": {"$uid": "u-0", "v": 1}});
        let node = json!({
            "ok": {"$ref": "u-0"},
            "gone": {"$ref": "u-missing"},
            "legacy_gone": "$ref:u-missing"
        });
        let cleaned = clean_dangling(&all, &node);
        assert_eq!(cleaned["ok"], json!({"$ref": "u-0"}));
        assert_eq!(cleaned["gone"], json!(null));
        assert_eq!(cleaned["legacy_gone"], json!(null));
    }

    #[test]
    fn path_form_targets_survive_cleaning() {
        let all = json!({"a": {"b": 1}});
        let node = json!({"r": "$ref:a.b"});
        assert_eq!(clean_dangling(&all, &node), node);
    }
}

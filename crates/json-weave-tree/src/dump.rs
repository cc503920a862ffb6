//! JSON dump with per-element index comments.
//!
//! Renders a tree as pretty JSON where every sequence element is
//! preceded by a `/* index: N */` comment, so long arrays stay
//! addressable by eye. Stripping the comments yields strict JSON that
//! re-parses to structurally equal data.

use regex::Regex;
use serde_json::Value;

const INDENT: &str = "  ";

/// Pretty-print `value` with an index comment before each array element.
pub fn dump_with_index_comments(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

/// Remove the index comments emitted by [`dump_with_index_comments`].
pub fn strip_index_comments(text: &str) -> String {
    match Regex::new(r"/\* index: \d+ \*/ ?") {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            out.push_str("[\n");
            for (i, item) in arr.iter().enumerate() {
                push_indent(out, depth + 1);
                out.push_str("/* index: ");
                out.push_str(&i.to_string());
                out.push_str(" */ ");
                write_value(out, item, depth + 1);
                if i + 1 != arr.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if !map.is_empty() => {
            out.push_str("{\n");
            for (i, (k, v)) in map.iter().enumerate() {
                push_indent(out, depth + 1);
                out.push_str(&Value::String(k.clone()).to_string());
                out.push_str(": ");
                write_value(out, v, depth + 1);
                if i + 1 != map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
        other => out.push_str(&other.to_string()),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_element_is_tagged_in_order() {
        let doc = json!({"xs": ["a", "b", "c"]});
        let text = dump_with_index_comments(&doc);
        let first = text.find("/* index: 0 */").unwrap();
        let second = text.find("/* index: 1 */").unwrap();
        let third = text.find("/* index: 2 */").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn nested_arrays_are_tagged_at_every_depth() {
        let doc = json!({"a": {"b": [{"c": [{"y": ["line1", "line2"]}]}, {}, {}]}});
        let text = dump_with_index_comments(&doc);
        // Outer array tags three elements, inner arrays tag their own.
        assert_eq!(text.matches("/* index: 0 */").count(), 3);
        assert_eq!(text.matches("/* index: 1 */").count(), 2);
        assert_eq!(text.matches("/* index: 2 */").count(), 1);
    }

    #[test]
    fn stripped_output_re_parses_to_equal_data() {
        let doc = json!({"a": {"b": [{"c": [{"y": ["line1", "line2"]}]}, {}, {}]}});
        let text = dump_with_index_comments(&doc);
        let parsed: Value = serde_json::from_str(&strip_index_comments(&text)).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn empty_containers_stay_compact() {
        assert_eq!(dump_with_index_comments(&json!([])), "[]");
        assert_eq!(dump_with_index_comments(&json!({})), "{}");
    }

    #[test]
    fn string_escaping_survives() {
        let doc = json!({"quote\"key": ["a\nb"]});
        let text = dump_with_index_comments(&doc);
        let parsed: Value = serde_json::from_str(&strip_index_comments(&text)).unwrap();
        assert_eq!(parsed, doc);
    }
}

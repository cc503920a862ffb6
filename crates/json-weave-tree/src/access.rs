//! Generic get/set over nested mappings and sequences.
//!
//! Reads are total: any mismatch between a step and the container it is
//! applied to yields not-found, never an error. Writes operate on a
//! defensive copy, auto-vivify missing intermediate containers, and fail
//! hard on incompatible combinations.

use json_weave_path::{format_path, IntoPath, Path, PathStep};
use serde_json::map::Entry;
use serde_json::{Map, Value};
use thiserror::Error;

/// A write attempted through an incompatible container/step combination.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    /// The walk ran into an existing scalar it cannot descend through.
    #[error("Cannot write through scalar value at '{0}'")]
    ScalarInPath(String),
    /// An integer index was applied to a mapping.
    #[error("Cannot index into mapping at '{0}'")]
    IndexIntoMapping(String),
    /// An append step was applied to a mapping.
    #[error("Cannot append to mapping at '{0}'")]
    AppendToMapping(String),
}

/// Look up the value at `path`.
///
/// A key step on a sequence, an index step on a mapping, a negative or
/// out-of-range index, a missing key, an append step, or any step
/// applied to a scalar all yield `None`.
///
/// # Example
///
/// ```
/// use json_weave_tree::get;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": {"c": 1}}});
/// assert_eq!(get(&doc, "a.b.c"), Some(&json!(1)));
/// assert_eq!(get(&doc, "e[12].f"), None);
/// ```
pub fn get<'a>(root: &'a Value, path: impl IntoPath) -> Option<&'a Value> {
    let path = path.into_path();
    let mut current = root;
    for step in &path {
        current = match (step, current) {
            (PathStep::Key(k), Value::Object(map)) => map.get(k)?,
            (PathStep::Index(n), Value::Array(arr)) => {
                let idx = usize::try_from(*n).ok()?;
                arr.get(idx)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, returning an updated copy of `root`.
///
/// The caller's tree is never mutated. Missing intermediate containers
/// are created, their kind decided by the *next* step: an index or
/// append step vivifies a sequence, a key step a mapping. A key step on
/// a sequence never indexes existing elements — it appends a fresh
/// single-key mapping. An out-of-range (including negative) index
/// appends.
///
/// # Example
///
/// ```
/// use json_weave_tree::set;
/// use serde_json::json;
///
/// let doc = json!({"e": [{"f": 3, "g": []}, 4]});
/// let out = set(&doc, "e[].k[].r", json!("x")).unwrap();
/// assert_eq!(out["e"][2], json!({"k": [{"r": "x"}]}));
/// assert_eq!(out["e"][0], doc["e"][0]);
/// ```
pub fn set(root: &Value, path: impl IntoPath, value: Value) -> Result<Value, NavigationError> {
    let path = path.into_path();
    if path.is_empty() {
        return Ok(value);
    }
    let mut out = root.clone();
    let mut walked = Vec::new();
    set_steps(&mut out, &path, value, &mut walked)?;
    Ok(out)
}

fn set_steps(
    target: &mut Value,
    steps: &[PathStep],
    value: Value,
    walked: &mut Path,
) -> Result<(), NavigationError> {
    let [step, rest @ ..] = steps else {
        return Ok(());
    };
    walked.push(step.clone());
    let is_last = rest.is_empty();

    match target {
        Value::Object(map) => match step {
            PathStep::Key(k) => {
                if is_last {
                    map.insert(k.clone(), value);
                    return Ok(());
                }
                let child = match map.entry(k.clone()) {
                    Entry::Vacant(slot) => slot.insert(vivify_for(rest)),
                    Entry::Occupied(slot) => {
                        let existing = slot.into_mut();
                        if !existing.is_object() && !existing.is_array() {
                            return Err(NavigationError::ScalarInPath(format_path(walked)));
                        }
                        existing
                    }
                };
                set_steps(child, rest, value, walked)
            }
            PathStep::Index(_) => Err(NavigationError::IndexIntoMapping(format_path(walked))),
            PathStep::Append => Err(NavigationError::AppendToMapping(format_path(walked))),
        },
        Value::Array(arr) => match step {
            PathStep::Index(n) => {
                let in_range = usize::try_from(*n).ok().filter(|&i| i < arr.len());
                if is_last {
                    match in_range {
                        Some(i) => arr[i] = value,
                        None => arr.push(value),
                    }
                    return Ok(());
                }
                let i = match in_range {
                    Some(i) => {
                        if !arr[i].is_object() && !arr[i].is_array() {
                            return Err(NavigationError::ScalarInPath(format_path(walked)));
                        }
                        i
                    }
                    None => {
                        arr.push(vivify_for(rest));
                        arr.len() - 1
                    }
                };
                set_steps(&mut arr[i], rest, value, walked)
            }
            PathStep::Append => {
                if is_last {
                    arr.push(value);
                    return Ok(());
                }
                arr.push(vivify_for(rest));
                let end = arr.len() - 1;
                set_steps(&mut arr[end], rest, value, walked)
            }
            PathStep::Key(_) => {
                // Never index existing elements with a key; start a fresh
                // record and re-apply the key step to it.
                arr.push(Value::Object(Map::new()));
                let end = arr.len() - 1;
                walked.pop();
                set_steps(&mut arr[end], steps, value, walked)
            }
        },
        _ => Err(NavigationError::ScalarInPath(format_path(walked))),
    }
}

/// Kind of container to create for the next step of a write.
fn vivify_for(next: &[PathStep]) -> Value {
    match next.first() {
        Some(PathStep::Index(_)) | Some(PathStep::Append) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}

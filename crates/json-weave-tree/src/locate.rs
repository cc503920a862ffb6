//! Uid to path lookup.

use json_weave_path::{Path, PathStep};
use serde_json::Value;

use crate::uid::{uid_of, UID_KEY};

/// Find the path of the mapping node carrying `uid`.
///
/// Depth-first: mapping entries in insertion order (the `"$uid"` entry
/// itself is skipped), then sequence elements in index order. The first
/// match wins, which makes the result deterministic even if a duplicate
/// uid sneaks into a tree.
pub fn locate(tree: &Value, uid: &str) -> Option<Path> {
    let mut path = Vec::new();
    walk(tree, uid, &mut path)
}

fn walk(node: &Value, uid: &str, path: &mut Path) -> Option<Path> {
    match node {
        Value::Object(map) => {
            if uid_of(node) == Some(uid) {
                return Some(path.clone());
            }
            for (k, v) in map {
                if k == UID_KEY {
                    continue;
                }
                path.push(PathStep::Key(k.clone()));
                if let Some(found) = walk(v, uid, path) {
                    return Some(found);
                }
                path.pop();
            }
            None
        }
        Value::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                path.push(PathStep::Index(i as i64));
                if let Some(found) = walk(v, uid, path) {
                    return Some(found);
                }
                path.pop();
            }
            None
        }
        _ => None,
    }
}

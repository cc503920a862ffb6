//! Cycle guarding for reference edges.
//!
//! Every new reference edge must pass [`would_cycle`] before it is
//! committed; [`link`] is the guarded commit. The walk keeps a visited
//! set of paths and rejects any revisit, which is deliberately
//! conservative: a diamond-shaped (convergent but acyclic) reference
//! graph is rejected the same as a true cycle.

use std::collections::HashSet;

use json_weave_path::{format_path, is_prefix, IntoPath, Path, PathStep};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::access::{get, set, NavigationError};
use crate::locate::locate;
use crate::refs::{extract_references, RefStyle, Reference};

/// Rejection of a reference edge.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinkError {
    /// No node in the tree carries the requested uid.
    #[error("No node with uid '{0}' in tree")]
    UnknownUid(String),
    /// The edge would create a cycle or a self/ancestor reference.
    #[error("Reference at '{at}' to '{target}' would create a cycle")]
    Circular { at: String, target: String },
    /// The marker could not be written at the source path.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Would an edge from `source` to `target` create a cycle?
///
/// True when `target` equals or is an ancestor (path prefix) of
/// `source`, or when following the markers reachable from `target`'s
/// subtree revisits any path already seen in the walk.
pub fn would_cycle(target: &[PathStep], source: &[PathStep], tree: &Value) -> bool {
    if is_prefix(target, source) {
        return true;
    }
    let mut visited: HashSet<Path> = HashSet::new();
    visited.insert(target.to_vec());
    revisits(tree, target, &mut visited)
}

fn revisits(tree: &Value, at: &[PathStep], visited: &mut HashSet<Path>) -> bool {
    let Some(subtree) = get(tree, at) else {
        return false;
    };
    for reference in extract_references(subtree) {
        let Some(next) = locate(tree, &reference.target) else {
            continue;
        };
        if !visited.insert(next.clone()) {
            debug!(path = %format_path(&next), "reference walk revisited a path");
            return true;
        }
        if revisits(tree, &next, visited) {
            return true;
        }
    }
    false
}

/// Commit a reference edge: write a marker for `uid` at `source`.
///
/// Rejects unknown uids and edges that [`would_cycle`]; otherwise
/// returns an updated copy of the tree with the marker in place.
pub fn link(
    tree: &Value,
    source: impl IntoPath,
    uid: &str,
    style: RefStyle,
) -> Result<Value, LinkError> {
    let source = source.into_path();
    let target = locate(tree, uid).ok_or_else(|| LinkError::UnknownUid(uid.to_string()))?;
    if would_cycle(&target, &source, tree) {
        return Err(LinkError::Circular {
            at: format_path(&source),
            target: format_path(&target),
        });
    }
    Ok(set(tree, source, Reference::new(uid).to_value(style))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_weave_path::parse_path;
    use serde_json::json;

    #[test]
    fn self_reference_is_always_rejected() {
        let tree = json!({"a": {"b": 1}});
        let p = parse_path("a.b");
        assert!(would_cycle(&p, &p, &tree));
        assert!(would_cycle(&[], &[], &tree));
    }

    #[test]
    fn ancestor_reference_is_rejected() {
        let tree = json!({"a": {"b": {"c": 1}}});
        assert!(would_cycle(&parse_path("a"), &parse_path("a.b.c"), &tree));
        assert!(!would_cycle(&parse_path("a.b.c"), &parse_path("a"), &tree));
    }

    #[test]
    fn marker_chain_back_to_target_is_rejected() {
        // x references y, y references x: linking anything to x cycles.
        let tree = json!({
            "x": {"$uid": "ux", "r": {"$ref": "uy"}},
            "y": {"$uid": "uy", "r": {"$ref": "ux"}},
            "z": {"$uid": "uz"}
        });
        assert!(would_cycle(&parse_path("x"), &parse_path("z.out"), &tree));
    }

    #[test]
    fn unrelated_edge_is_allowed() {
        let tree = json!({
            "x": {"$uid": "ux", "n": 1},
            "y": {"$uid": "uy", "r": {"$ref": "ux"}}
        });
        assert!(!would_cycle(&parse_path("x"), &parse_path("out"), &tree));
    }

    #[test]
    fn diamond_revisit_is_conservatively_rejected() {
        // Two distinct markers under the target lead to the same node.
        let tree = json!({
            "t": {"$uid": "ut", "a": {"$ref": "shared"}, "b": {"$ref": "shared"}},
            "s": {"$uid": "shared", "n": 1}
        });
        assert!(would_cycle(&parse_path("t"), &parse_path("elsewhere"), &tree));
    }

    #[test]
    fn link_writes_marker_or_rejects() {
        let tree = json!({
            "lib": {"$uid": "u-lib", "n": 1},
            "doc": {"$uid": "u-doc"}
        });

        let out = link(&tree, "doc.uses", "u-lib", RefStyle::Object).unwrap();
        assert_eq!(out["doc"]["uses"], json!({"$ref": "u-lib"}));

        assert_eq!(
            link(&tree, "out", "nope", RefStyle::Object),
            Err(LinkError::UnknownUid("nope".into()))
        );

        // Writing the library into itself is a self/ancestor edge.
        assert!(matches!(
            link(&tree, "lib.child", "u-lib", RefStyle::Object),
            Err(LinkError::Circular { .. })
        ));
    }

    #[test]
    fn dangling_markers_are_ignored_by_the_walk() {
        let tree = json!({
            "t": {"$uid": "ut", "r": {"$ref": "gone"}}
        });
        assert!(!would_cycle(&parse_path("t"), &parse_path("s"), &tree));
    }
}

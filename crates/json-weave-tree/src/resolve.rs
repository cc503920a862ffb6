//! Reference resolution — the first-occurrence deduplication pass.
//!
//! One [`Resolver`] renders one scoped view against the canonical
//! document. The first position that encounters a given uid becomes the
//! canonical holder of its content; every later mention collapses into a
//! path-reference pointing at that position. Within a pass no uid is
//! ever registered at two different first-occurrence paths.

use std::collections::HashMap;

use json_weave_path::{format_path, Path, PathStep};
use serde_json::{Map, Value};
use tracing::trace;

use crate::access::get;
use crate::locate::locate;
use crate::refs::{RefStyle, Reference};
use crate::uid::{uid_of, UID_KEY};

/// A single resolve pass over one scoped view.
pub struct Resolver<'a> {
    all_data: &'a Value,
    style: RefStyle,
    resolved: HashMap<String, Path>,
}

impl<'a> Resolver<'a> {
    /// A resolver over the canonical document, emitting object-form
    /// markers.
    pub fn new(all_data: &'a Value) -> Self {
        Self::with_style(all_data, RefStyle::default())
    }

    /// A resolver with an explicit marker emission form.
    pub fn with_style(all_data: &'a Value, style: RefStyle) -> Self {
        Self { all_data, style, resolved: HashMap::new() }
    }

    /// Uids registered so far, with their first-occurrence paths.
    pub fn first_occurrences(&self) -> &HashMap<String, Path> {
        &self.resolved
    }

    /// Render `node` under the caller's scoped view `path_data`,
    /// deduplicating repeated content into path-references.
    ///
    /// `path_data` shares the canonical document's path space; it is
    /// used to judge whether a referenced value is already reachable
    /// from what the caller holds, without re-fetching the document.
    pub fn resolve(&mut self, node: &Value, path_data: &Value) -> Value {
        let mut current = Vec::new();
        self.resolve_at(node, &mut current, path_data)
    }

    fn resolve_at(&mut self, node: &Value, current: &mut Path, path_data: &Value) -> Value {
        if let Some(reference) = Reference::parse(node) {
            return self.resolve_marker(&reference, node, current, path_data);
        }
        match node {
            Value::Object(map) => {
                if let Some(uid) = uid_of(node) {
                    match self.resolved.get(uid).cloned() {
                        // Content already materialized elsewhere in this
                        // pass: collapse to a pointer.
                        Some(prior) if prior != *current => {
                            return Reference::new(format_path(&prior)).to_value(self.style);
                        }
                        Some(_) => {}
                        None => {
                            trace!(uid, path = %format_path(current), "first occurrence");
                            self.resolved.insert(uid.to_string(), current.clone());
                        }
                    }
                }
                let mut out = Map::with_capacity(map.len());
                for (k, v) in map {
                    if k == UID_KEY {
                        out.insert(k.clone(), v.clone());
                        continue;
                    }
                    current.push(PathStep::Key(k.clone()));
                    let rendered = self.resolve_at(v, current, path_data);
                    current.pop();
                    out.insert(k.clone(), rendered);
                }
                Value::Object(out)
            }
            Value::Array(arr) => {
                let mut out = Vec::with_capacity(arr.len());
                for (i, v) in arr.iter().enumerate() {
                    current.push(PathStep::Index(i as i64));
                    out.push(self.resolve_at(v, current, path_data));
                    current.pop();
                }
                Value::Array(out)
            }
            other => other.clone(),
        }
    }

    fn resolve_marker(
        &mut self,
        reference: &Reference,
        original: &Value,
        current: &mut Path,
        path_data: &Value,
    ) -> Value {
        if let Some(prior) = self.resolved.get(&reference.target) {
            return Reference::new(format_path(prior)).to_value(self.style);
        }

        let all_data = self.all_data;
        let Some(target_path) = locate(all_data, &reference.target) else {
            // Dangling marker; cleaning is a separate pass.
            return original.clone();
        };
        let canonical = get(all_data, target_path.as_slice());
        let in_view = get(path_data, target_path.as_slice());

        if in_view.is_some() && in_view == canonical {
            // The caller's view already reaches the canonical content:
            // the target itself is the first occurrence.
            self.resolved
                .insert(reference.target.clone(), target_path.clone());
            return Reference::new(format_path(&target_path)).to_value(self.style);
        }

        // Unreachable or stale from the caller's view: this position
        // becomes the canonical owner and receives a deep-resolved copy.
        trace!(
            uid = %reference.target,
            path = %format_path(current),
            "splicing canonical content at marker position"
        );
        self.resolved.insert(reference.target.clone(), current.clone());
        match canonical {
            Some(v) => {
                let v = v.clone();
                self.resolve_at(&v, current, path_data)
            }
            None => original.clone(),
        }
    }
}

//! Uid annotation of mapping nodes.
//!
//! Every mapping node carries an identifier under the reserved `"$uid"`
//! key while a tree is inside the system; identifiers are assigned once,
//! kept for the node's lifetime, and stripped before the tree crosses
//! the system boundary. Sequences are containers, not identified nodes —
//! they are traversed but never annotated themselves.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{Map, Value};

/// Reserved key holding a node's identifier.
pub const UID_KEY: &str = "$uid";

/// Length of generated identifiers.
const UID_LEN: usize = 21;

/// Source of fresh node identifiers.
///
/// Injectable so tests can supply deterministic sequences.
pub trait UidGenerator {
    fn generate(&mut self) -> String;
}

/// Default generator — high-entropy random alphanumeric identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUidGenerator;

impl UidGenerator for RandomUidGenerator {
    fn generate(&mut self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(UID_LEN)
            .map(char::from)
            .collect()
    }
}

/// Deterministic generator for tests: `prefix-0`, `prefix-1`, …
#[derive(Debug, Clone)]
pub struct SequenceUidGenerator {
    prefix: String,
    next: u64,
}

impl SequenceUidGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 0 }
    }
}

impl UidGenerator for SequenceUidGenerator {
    fn generate(&mut self) -> String {
        let uid = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        uid
    }
}

/// The identifier of a mapping node, if it carries one.
pub fn uid_of(node: &Value) -> Option<&str> {
    node.as_object()?.get(UID_KEY)?.as_str()
}

/// Deep copy of `tree` with an identifier on every mapping node.
///
/// Nodes that already carry `"$uid"` keep it, so annotating twice is a
/// no-op on the second pass.
pub fn annotate(tree: &Value, gen: &mut dyn UidGenerator) -> Value {
    match tree {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len() + 1);
            for (k, v) in map {
                if k == UID_KEY {
                    out.insert(k.clone(), v.clone());
                } else {
                    out.insert(k.clone(), annotate(v, gen));
                }
            }
            if !out.contains_key(UID_KEY) {
                out.insert(UID_KEY.to_string(), Value::String(gen.generate()));
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| annotate(v, gen)).collect()),
        other => other.clone(),
    }
}

/// Deep copy of `tree` with `"$uid"` removed at every depth.
///
/// Round-trips an annotated tree back to its pre-annotation structure.
pub fn strip(tree: &Value) -> Value {
    match tree {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| k.as_str() != UID_KEY)
                .map(|(k, v)| (k.clone(), strip(v)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.iter().map(strip).collect()),
        other => other.clone(),
    }
}

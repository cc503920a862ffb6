//! json-weave — path-addressable manipulation of nested JSON data.
//!
//! Three layers, re-exported here under one roof:
//!
//! - [`json_weave_path`]: the path expression grammar (`a[0].b['x.y'][]`)
//!   and data-path → schema-path translation.
//! - [`json_weave_tree`]: get/set with auto-vivification, uid annotation,
//!   reference deduplication with cycle guarding, and dangling-marker
//!   cleanup.
//! - [`json_weave_schema`]: schema augmentation with the built-in
//!   `image`/`document`/`reference` shapes and reference-following
//!   validation.
//!
//! # Example
//!
//! ```
//! use json_weave::{annotate, get, set, SequenceUidGenerator};
//! use serde_json::json;
//!
//! let doc = set(&json!({}), "pages[].title", json!("home")).unwrap();
//! assert_eq!(get(&doc, "pages[0].title"), Some(&json!("home")));
//!
//! let mut gen = SequenceUidGenerator::new("n");
//! let doc = annotate(&doc, &mut gen);
//! assert!(doc["pages"][0]["$uid"].is_string());
//! ```

pub mod cli;

pub use json_weave_path::{
    format_path, is_prefix, parse_path, parse_path_strict, to_schema_path, IntoPath, ParseError,
    Path, PathStep,
};
pub use json_weave_schema::{
    augment, infer_schema, validate, validate_with_references, FaultPolicy, Report,
    BUILTIN_TYPES,
};
pub use json_weave_tree::{
    annotate, clean_dangling, dump_with_index_comments, extract_references, get, link, locate,
    set, strip, strip_index_comments, tree_sha256, uid_of, would_cycle, LinkError,
    NavigationError, RandomUidGenerator, RefStyle, Reference, Resolver, SequenceUidGenerator,
    UidGenerator, REF_KEY, REF_PREFIX, UID_KEY,
};

//! Schema validation for json-weave trees.
//!
//! Augments caller-supplied JSON Schemas with the built-in `image`,
//! `document`, and `reference` shapes, validates data against them with
//! the `jsonschema` engine, and follows reference markers so that each
//! referenced target is checked against the schema at its own location.

pub mod augment;
pub mod infer;
pub mod validate;

pub use augment::{augment, BUILTIN_TYPES};
pub use infer::infer_schema;
pub use validate::{validate, validate_with_references, FaultPolicy, Report};

//! Structural validation, with reference following.

use std::collections::HashSet;

use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use json_weave_path::{format_path, parse_path, to_schema_path, IntoPath, PathStep};
use json_weave_tree::{extract_references, get, locate, strip};

use crate::augment::augment;

/// What to do when the validation engine itself faults (for example a
/// schema it cannot compile).
///
/// The reference system can legitimately produce fragments the generic
/// engine cannot fully interpret, so the default treats an engine fault
/// as a pass. `Strict` surfaces the fault as a failure instead, which
/// tests use to assert genuine engine faults are caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    #[default]
    FailOpen,
    Strict,
}

/// Outcome of a validation request: pass/fail plus the first message
/// encountered on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub valid: bool,
    pub message: Option<String>,
}

impl Report {
    fn pass() -> Self {
        Self { valid: true, message: None }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self { valid: false, message: Some(message.into()) }
    }
}

/// Validate `data` against `schema` with the `jsonschema` engine
/// (Draft 2020-12).
///
/// A data mismatch fails the report with the engine's first message. An
/// engine fault is subject to `policy`.
pub fn validate(data: &Value, schema: &Value, policy: FaultPolicy) -> Report {
    let mut options = jsonschema::options();
    options.with_draft(Draft::Draft202012);

    let validator = match options.build(schema) {
        Ok(v) => v,
        Err(fault) => {
            return match policy {
                FaultPolicy::FailOpen => {
                    debug!(%fault, "validation engine fault suppressed");
                    Report::pass()
                }
                FaultPolicy::Strict => Report::fail(format!("schema engine fault: {fault}")),
            }
        }
    };

    let report = match validator.iter_errors(data).next() {
        None => Report::pass(),
        Some(error) => Report::fail(error.to_string()),
    };
    report
}

/// Validate the value at `path`, following reference markers.
///
/// The schema fragment is fetched at the translated schema path and the
/// data at `path`; either missing yields a failing report. When the
/// value contains markers, every referenced target is validated against
/// the schema at its own located path first, and the marker-bearing
/// value is then validated against its own schema. The first failure
/// aborts the walk.
pub fn validate_with_references(
    path: impl IntoPath,
    schema_root: &Value,
    all_data: &Value,
    policy: FaultPolicy,
) -> Report {
    let path = path.into_path();
    let mut seen = HashSet::new();
    validate_at(&path, schema_root, all_data, policy, &mut seen)
}

fn validate_at(
    path: &[PathStep],
    schema_root: &Value,
    all_data: &Value,
    policy: FaultPolicy,
    seen: &mut HashSet<String>,
) -> Report {
    let schema_path = to_schema_path(path);
    let Some(schema) = get(schema_root, schema_path.as_slice()) else {
        return Report::fail(format!("No schema found at '{}'", format_path(&schema_path)));
    };
    let Some(data) = get(all_data, path) else {
        return Report::fail(format!("No data found at '{}'", format_path(path)));
    };

    for reference in extract_references(data) {
        if !seen.insert(reference.target.clone()) {
            continue;
        }
        let Some(target_path) = target_path_of(all_data, &reference.target) else {
            return Report::fail(format!(
                "No data found for reference '{}'",
                reference.target
            ));
        };
        let report = validate_at(&target_path, schema_root, all_data, policy, seen);
        if !report.valid {
            return report;
        }
    }

    validate(&strip(data), &augment(schema), policy)
}

/// Resolve a marker target — a uid, or a path expression produced by a
/// resolve pass — to the path it denotes.
fn target_path_of(all_data: &Value, target: &str) -> Option<Vec<PathStep>> {
    if let Some(path) = locate(all_data, target) {
        return Some(path);
    }
    let path = parse_path(target);
    get(all_data, path.as_slice()).map(|_| path)
}

//! Data-path to schema-path translation.

use crate::types::{Path, PathStep};

/// Translate a data path into the path of its describing schema fragment.
///
/// Each key step becomes a `properties.<key>` hop. A run of index or
/// append steps collapses into a single `items` hop, because a schema
/// array describes one item shape for every element — including skipped
/// and appended positions.
///
/// # Example
///
/// ```
/// use json_weave_path::{parse_path, to_schema_path, format_path};
///
/// let schema_path = to_schema_path(&parse_path("a[0][1].b"));
/// assert_eq!(format_path(&schema_path), "properties.a.items.properties.b");
/// ```
pub fn to_schema_path(path: &[PathStep]) -> Path {
    let mut out = Vec::new();
    let mut in_items = false;
    for step in path {
        match step {
            PathStep::Key(k) => {
                out.push(PathStep::key("properties"));
                out.push(PathStep::Key(k.clone()));
                in_items = false;
            }
            PathStep::Index(_) | PathStep::Append => {
                if !in_items {
                    out.push(PathStep::key("items"));
                    in_items = true;
                }
            }
        }
    }
    out
}

//! Shared logic for the `weave-*` command line tools.

use serde_json::Value;
use thiserror::Error;

use json_weave_tree::{annotate, get, RandomUidGenerator, Resolver};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid JSON document: {0}")]
    InvalidJson(String),
    #[error("No value at path '{0}'")]
    NotFound(String),
}

fn read_document(text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::InvalidJson(e.to_string()))
}

fn render(value: &Value) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidJson(e.to_string()))
}

/// Look up `path` in the JSON document `text` and pretty-print the hit.
pub fn lookup_path(text: &str, path: &str) -> Result<String, CliError> {
    let doc = read_document(text)?;
    let found = get(&doc, path).ok_or_else(|| CliError::NotFound(path.to_string()))?;
    render(found)
}

/// Assign uids to every mapping node of the document.
pub fn annotate_document(text: &str) -> Result<String, CliError> {
    let doc = read_document(text)?;
    let mut gen = RandomUidGenerator;
    render(&annotate(&doc, &mut gen))
}

/// Run a resolve pass over the whole document, collapsing repeated
/// content into path-references.
pub fn resolve_document(text: &str) -> Result<String, CliError> {
    let doc = read_document(text)?;
    let mut resolver = Resolver::new(&doc);
    let resolved = resolver.resolve(&doc, &doc);
    render(&resolved)
}

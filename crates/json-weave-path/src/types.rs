//! Path step types.

/// A single step of a path into a nested tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Mapping key access: `key`, `['key']`.
    Key(String),
    /// Sequence index access: `[0]`, `[-1]`. Negative and out-of-range
    /// indices never resolve on read; on write they append.
    Index(i64),
    /// The append position: `[]`. Write-only; reading it is never found.
    Append,
}

/// An ordered sequence of path steps.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// Shorthand for a key step.
    pub fn key(k: impl Into<String>) -> Self {
        PathStep::Key(k.into())
    }
}

/// Returns `true` when `prefix` is a leading run of `path` (or equal to it).
pub fn is_prefix(prefix: &[PathStep], path: &[PathStep]) -> bool {
    prefix.len() <= path.len() && prefix == &path[..prefix.len()]
}

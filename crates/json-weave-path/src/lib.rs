//! Path expressions for nested JSON trees.
//!
//! A path addresses a position inside an arbitrarily nested tree of
//! mappings and sequences. The string grammar is `.`-separated or
//! directly adjacent tokens:
//!
//! - `key` / `.key` — a mapping key
//! - `[N]` — an integer sequence index (sign optional)
//! - `['k']` / `["k"]` — a quoted mapping key (backslash-escaped quotes)
//! - `[]` — the append position (write-only)
//!
//! # Example
//!
//! ```
//! use json_weave_path::{parse_path, format_path, PathStep};
//!
//! let path = parse_path("a[0].b[3].c");
//! assert_eq!(path, vec![
//!     PathStep::Key("a".into()),
//!     PathStep::Index(0),
//!     PathStep::Key("b".into()),
//!     PathStep::Index(3),
//!     PathStep::Key("c".into()),
//! ]);
//! assert_eq!(format_path(&path), "a[0].b[3].c");
//! ```

pub mod format;
pub mod parse;
pub mod schema;
pub mod types;

pub use format::format_path;
pub use parse::{parse_path, parse_path_strict, ParseError};
pub use schema::to_schema_path;
pub use types::{is_prefix, Path, PathStep};

/// Conversion into a parsed [`Path`].
///
/// String inputs run through [`parse_path`]; pre-parsed step sequences
/// pass through unchanged.
pub trait IntoPath {
    fn into_path(self) -> Path;
}

impl IntoPath for &str {
    fn into_path(self) -> Path {
        parse_path(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Path {
        parse_path(&self)
    }
}

impl IntoPath for Path {
    fn into_path(self) -> Path {
        self
    }
}

impl IntoPath for &[PathStep] {
    fn into_path(self) -> Path {
        self.to_vec()
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Path {
        self.clone()
    }
}

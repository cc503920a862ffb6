//! Tree manipulation core: path-addressable access into nested JSON
//! values, uid annotation of mapping nodes, and a reference graph that
//! deduplicates repeated subtrees into lightweight pointers.
//!
//! The typical session: a raw tree is annotated with uids once, mutated
//! through [`set`] and [`link`] while [`would_cycle`] guards every new
//! reference edge, deduplicated with [`Resolver::resolve`], and stripped
//! of uids before it leaves the system boundary.

pub mod access;
pub mod cycle;
pub mod dump;
pub mod hash;
pub mod locate;
pub mod refs;
pub mod resolve;
pub mod uid;

pub use access::{get, set, NavigationError};
pub use cycle::{link, would_cycle, LinkError};
pub use dump::{dump_with_index_comments, strip_index_comments};
pub use hash::tree_sha256;
pub use locate::locate;
pub use refs::{clean_dangling, extract_references, RefStyle, Reference, REF_KEY, REF_PREFIX};
pub use resolve::Resolver;
pub use uid::{annotate, strip, uid_of, RandomUidGenerator, SequenceUidGenerator, UidGenerator, UID_KEY};

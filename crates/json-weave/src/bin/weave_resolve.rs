//! `weave-resolve` — deduplicate repeated content in a document.
//!
//! Usage:
//!   weave-resolve < document.json
//!
//! Runs one resolve pass over the document read from stdin: the first
//! occurrence of each uid keeps its content, every later mention
//! becomes a path-reference.

use json_weave::cli::resolve_document;
use std::io::{self, Read, Write};

fn main() {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match resolve_document(buf.trim()) {
        Ok(result) => {
            io::stdout().write_all(result.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

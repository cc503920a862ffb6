//! `weave-annotate` — assign uids to every mapping node of a document.
//!
//! Usage:
//!   weave-annotate < document.json
//!
//! The document is read from stdin; the annotated document is printed
//! to stdout.

use json_weave::cli::annotate_document;
use std::io::{self, Read, Write};

fn main() {
    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match annotate_document(buf.trim()) {
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

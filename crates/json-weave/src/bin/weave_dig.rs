//! `weave-dig` — look up a path expression in a JSON document.
//!
//! Usage:
//!   weave-dig '<path>'
//!
//! The document is read from stdin. The path is the first argument,
//! e.g. `a[0].b['x.y']`.

use json_weave::cli::lookup_path;
use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a path expression.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match lookup_path(buf.trim(), &path) {
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

//! Path expression scanner.

use thiserror::Error;
use tracing::debug;

use crate::types::{Path, PathStep};

/// Error produced by [`parse_path_strict`] on a malformed token.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A `[` with no matching `]`.
    #[error("Unterminated '[' in path expression")]
    UnterminatedBracket,
    /// A quoted key with no closing quote.
    #[error("Unterminated quoted key in path expression")]
    UnterminatedQuote,
    /// Bracket contents that are neither an index, a quoted key, nor empty.
    #[error("Malformed bracket token '{0}' in path expression")]
    MalformedToken(String),
}

/// Parse a path expression, dropping malformed tokens.
///
/// Tokens that match no rule of the grammar are skipped; each drop emits
/// a `tracing` debug event. Use [`parse_path_strict`] to get a hard
/// failure instead.
///
/// # Example
///
/// ```
/// use json_weave_path::{parse_path, PathStep};
///
/// assert_eq!(
///     parse_path("a['x.y'][2][]"),
///     vec![
///         PathStep::Key("a".into()),
///         PathStep::Key("x.y".into()),
///         PathStep::Index(2),
///         PathStep::Append,
///     ]
/// );
/// ```
pub fn parse_path(input: &str) -> Path {
    let mut steps = Vec::new();
    for token in scan(input) {
        match token {
            Ok(step) => steps.push(step),
            Err(err) => debug!(input, %err, "dropping malformed path token"),
        }
    }
    steps
}

/// Parse a path expression, failing on the first malformed token.
pub fn parse_path_strict(input: &str) -> Result<Path, ParseError> {
    scan(input).into_iter().collect()
}

/// Tokenize `input` into path steps, keeping malformed tokens as errors.
fn scan(input: &str) -> Vec<Result<PathStep, ParseError>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '.' => i += 1,
            '[' => {
                let (token, next) = scan_bracket(&chars, i);
                tokens.push(token);
                i = next;
            }
            _ => {
                let start = i;
                while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    i += 1;
                }
                let key: String = chars[start..i].iter().collect();
                tokens.push(Ok(PathStep::Key(key)));
            }
        }
    }

    tokens
}

/// Scan one bracket token starting at `chars[open] == '['`.
///
/// Returns the parsed step (or the error for a malformed token) and the
/// index of the first character after the token.
fn scan_bracket(chars: &[char], open: usize) -> (Result<PathStep, ParseError>, usize) {
    let mut i = open + 1;

    // Quoted key: ['...'] or ["..."], backslash-escaped quotes allowed.
    if let Some(&quote) = chars.get(i) {
        if quote == '\'' || quote == '"' {
            i += 1;
            let mut key = String::new();
            loop {
                match chars.get(i) {
                    None => return (Err(ParseError::UnterminatedQuote), chars.len()),
                    Some('\\') if chars.get(i + 1) == Some(&quote) => {
                        key.push(quote);
                        i += 2;
                    }
                    Some(&c) if c == quote => {
                        i += 1;
                        break;
                    }
                    Some(&c) => {
                        key.push(c);
                        i += 1;
                    }
                }
            }
            return match chars.get(i) {
                Some(']') => (Ok(PathStep::Key(key)), i + 1),
                _ => {
                    let close = close_bracket(chars, i);
                    (Err(ParseError::MalformedToken(token_text(chars, open, close))), close)
                }
            };
        }
    }

    // Unquoted contents: empty is the append marker, a signed integer is
    // an index, anything else is malformed.
    let Some(close) = chars[i..].iter().position(|&c| c == ']').map(|p| i + p) else {
        return (Err(ParseError::UnterminatedBracket), chars.len());
    };
    let contents: String = chars[i..close].iter().collect();

    let step = if contents.is_empty() {
        Ok(PathStep::Append)
    } else {
        match contents.parse::<i64>() {
            Ok(n) => Ok(PathStep::Index(n)),
            Err(_) => Err(ParseError::MalformedToken(token_text(chars, open, close + 1))),
        }
    };
    (step, close + 1)
}

/// Advance past the first `]` at or after `i`, or to the end of input.
fn close_bracket(chars: &[char], i: usize) -> usize {
    chars[i..]
        .iter()
        .position(|&c| c == ']')
        .map(|p| i + p + 1)
        .unwrap_or(chars.len())
}

fn token_text(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end.min(chars.len())].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathStep::{Append, Index, Key};

    #[test]
    fn dotted_keys() {
        assert_eq!(
            parse_path("a.b.c"),
            vec![Key("a".into()), Key("b".into()), Key("c".into())]
        );
    }

    #[test]
    fn mixed_keys_and_indices() {
        assert_eq!(
            parse_path("a[0].b[3].c"),
            vec![
                Key("a".into()),
                Index(0),
                Key("b".into()),
                Index(3),
                Key("c".into()),
            ]
        );
    }

    #[test]
    fn signed_indices() {
        assert_eq!(parse_path("[+2]"), vec![Index(2)]);
        assert_eq!(parse_path("[-1]"), vec![Index(-1)]);
    }

    #[test]
    fn append_markers() {
        assert_eq!(
            parse_path("e[].k[].r"),
            vec![Key("e".into()), Append, Key("k".into()), Append, Key("r".into())]
        );
    }

    #[test]
    fn quoted_keys() {
        assert_eq!(parse_path("['a.b']"), vec![Key("a.b".into())]);
        assert_eq!(parse_path("[\"x[0]\"]"), vec![Key("x[0]".into())]);
        assert_eq!(parse_path(r"['it\'s']"), vec![Key("it's".into())]);
    }

    #[test]
    fn quoted_key_keeps_other_backslashes() {
        assert_eq!(parse_path(r"['a\b']"), vec![Key(r"a\b".into())]);
    }

    #[test]
    fn adjacent_tokens_without_dots() {
        assert_eq!(
            parse_path("a[0]b"),
            vec![Key("a".into()), Index(0), Key("b".into())]
        );
    }

    #[test]
    fn malformed_tokens_are_dropped() {
        assert_eq!(parse_path("a.[junk].b"), vec![Key("a".into()), Key("b".into())]);
        assert_eq!(parse_path("a[1.5]"), vec![Key("a".into())]);
        assert_eq!(parse_path("a[3"), vec![Key("a".into())]);
        assert_eq!(parse_path("['open.b"), Vec::<PathStep>::new());
    }

    #[test]
    fn strict_parse_surfaces_malformed_tokens() {
        assert_eq!(
            parse_path_strict("a[junk]"),
            Err(ParseError::MalformedToken("[junk]".into()))
        );
        assert_eq!(parse_path_strict("a[3"), Err(ParseError::UnterminatedBracket));
        assert_eq!(parse_path_strict("['x"), Err(ParseError::UnterminatedQuote));
        assert!(parse_path_strict("a[0].b").is_ok());
    }

    #[test]
    fn empty_expression() {
        assert_eq!(parse_path(""), Vec::<PathStep>::new());
        assert_eq!(parse_path("..."), Vec::<PathStep>::new());
    }
}

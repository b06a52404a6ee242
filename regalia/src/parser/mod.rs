//! # Pattern parser
//! This module parses the textual regular-expression syntax into a
//! [Pattern](crate::regex::Pattern) tree. The grammar is the usual one:
//!
//! - alternation with `|`, concatenation by juxtaposition
//! - grouping with `(...)`; `(?:...)` and `(?P<name>...)` are accepted and
//!   treated exactly like plain groups, since captures carry no meaning in a
//!   language algebra
//! - multipliers `?`, `*`, `+`, `{n}`, `{n,}` and `{n,m}`
//! - character classes `[abc]`, `[^abc]`, ranges `a-z` (strictly
//!   increasing), the shorthands `\w` `\d` `\s` `\W` `\D` `\S`, and `.` for
//!   any character
//! - escapes `\t` `\n` `\r` `\f` `\v`, hex escapes `\xHH` with exactly two
//!   hex digits, and `\` before any special character
//!
//! There are no anchors: a pattern always describes whole words.
//!
//! ```
//! use regalia::parser;
//!
//! let pattern = parser::pattern(r"[a-c]+\d{2}").unwrap();
//! let dfa = pattern.to_dfa();
//! assert!(dfa.accepts_str("abc42"));
//! assert!(!dfa.accepts_str("abc4"));
//! ```
//!
//! The whole input must parse; trailing garbage is an error carrying the
//! byte index where parsing stopped:
//!
//! ```
//! use regalia::parser::{self, ParseError};
//!
//! assert_eq!(parser::pattern("ab)c"), Err(ParseError::UnparsedInput(2)));
//! ```

mod pattern;

use crate::regex::Pattern;
use nom::combinator::all_consuming;
use nom::Finish;
use thiserror::Error;

/// Terminal parse failure. Backtracking between grammar alternatives happens
/// internally; the only error that reaches the caller is the whole input not
/// being a pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not parse the pattern beyond byte {0}")]
    UnparsedInput(usize),
}

/// Parses a whole string as a pattern. The empty string is a valid pattern
/// (it matches the empty word); an unparsable remainder is an error.
pub fn pattern(input: &str) -> Result<Pattern, ParseError> {
    all_consuming(pattern::full_pattern)(input)
        .finish()
        .map(|(_, pattern)| pattern)
        .map_err(|error| ParseError::UnparsedInput(input.len() - error.input.len()))
}

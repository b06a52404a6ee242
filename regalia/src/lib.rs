//!# regalia
//!
//! `regalia` is a Rust library for computing with regular languages. A
//! language is represented as an immutable deterministic finite automaton
//! ([Dfa](dfa::Dfa)), and the usual algebra over languages is closed:
//! concatenation, Kleene star, repetition, union, intersection, difference,
//! symmetric difference, complement, reversal and minimization all take DFAs
//! and return fresh, minimal DFAs. A regular-expression front-end parses the
//! familiar textual syntax into a [Pattern](regex::Pattern) tree which
//! compiles down to a DFA.
//!
//! ## Usage
//!
//! ```rust
//! use regalia::parser;
//!
//! // Patterns describe languages, DFAs answer questions about them
//! let even_as = parser::pattern("(b*ab*a)*b*").unwrap();
//! let dfa = even_as.to_dfa();
//! assert!(dfa.accepts_str("abba"));
//! assert!(dfa.accepts_str(""));
//! assert!(!dfa.accepts_str("aba"));
//!
//! // The algebra is closed: combine languages, then keep asking questions.
//! // Binary operations need a common alphabet, so compile both patterns
//! // over one.
//! let alphabet = "ab".chars().collect();
//! let even_as = parser::pattern("(b*ab*a)*b*").unwrap().to_dfa_over(&alphabet);
//! let short = parser::pattern("[ab]{0,3}").unwrap().to_dfa_over(&alphabet);
//! let both = even_as.intersection(&short).unwrap();
//!
//! // Words come out shortest first, ties broken by symbol order
//! let words: Vec<String> = both
//!     .strings()
//!     .map(|w| w.into_iter().map(|s| s.to_string()).collect())
//!     .collect();
//! assert_eq!(words, vec!["", "b", "aa", "bb", "aab", "aba", "baa", "bbb"]);
//! ```
//!
//! ## Alphabets and "anything else"
//!
//! Every DFA carries its own finite alphabet of [Symbol](dfa::Symbol)s. The
//! distinguished symbol [Symbol::AnyElse](dfa::Symbol::AnyElse) stands for
//! every character the alphabet does not name: feeding such a character to a
//! DFA whose alphabet carries the sentinel follows the sentinel's
//! transition, so a pattern like `[^ab]` behaves correctly on the infinitely
//! many characters it never names. Wherever symbols are enumerated — state
//! crawling, word enumeration, tables — they appear in sorted order with the
//! sentinel last, which makes every operation deterministic.
//!
//! ## Operations
//!
//! This library supports:
//!
//! * [Parsing regular expressions](parser::pattern) into
//!   [Pattern](regex::Pattern) trees, and rendering them back to text
//! * [Compiling patterns to DFAs](regex::Pattern::to_dfa), over the
//!   pattern's own alphabet or [a shared one](regex::Pattern::to_dfa_over)
//! * Checking [word acceptance](dfa::Dfa::accepts), also
//!   [step by step](dfa::Dfa::evaluator)
//! * The closed algebra: [concatenation](dfa::Dfa::concat),
//!   [star](dfa::Dfa::star), [repetition](dfa::Dfa::repeat),
//!   [union](dfa::Dfa::union), [intersection](dfa::Dfa::intersection),
//!   [difference](dfa::Dfa::difference),
//!   [symmetric difference](dfa::Dfa::symmetric_difference),
//!   [complement](dfa::Dfa::complement) and [reversal](dfa::Dfa::reversed)
//! * [Minimization](dfa::Dfa::minimized) by Brzozowski double reversal
//! * Analysis: [emptiness](dfa::Dfa::is_empty), [liveness](dfa::Dfa::is_live)
//!   and [equivalence](dfa::Dfa::equivalent_to)
//! * [Enumerating accepted words](dfa::Dfa::strings) lazily, shortest first
//! * Rendering a DFA [as a table](dfa::Dfa::to_table) for debugging

pub mod dfa;
pub mod parser;
pub mod regex;
mod table;

#[cfg(test)]
mod tests;

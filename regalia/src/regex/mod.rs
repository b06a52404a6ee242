//! # Pattern trees
//! This module contains the abstract syntax of regular expressions as
//! produced by the [parser](crate::parser): a [Pattern] is an alternation of
//! [Conc]s, a [Conc] a concatenation of [Mult]s, and a [Mult] applies a
//! [Multiplier] to either a parenthesized sub-pattern or a [Charclass].
//!
//! A pattern describes a language but cannot answer questions about it; for
//! that it is compiled to a [Dfa] with [Pattern::to_dfa], which recursively
//! maps alternation to [Dfa::union], concatenation to [Dfa::concat] and
//! multipliers to [Dfa::repeat]/[Dfa::star]:
//!
//! ```
//! use regalia::parser;
//!
//! let pattern = parser::pattern("(ab)+|c{2}").unwrap();
//! let dfa = pattern.to_dfa();
//! assert!(dfa.accepts_str("abab"));
//! assert!(dfa.accepts_str("cc"));
//! assert!(!dfa.accepts_str("abc"));
//! ```
//!
//! By default the compilation alphabet is every character the pattern names
//! plus [Symbol::AnyElse], so the resulting automaton behaves sensibly on
//! characters the pattern never mentions. [Pattern::to_dfa_over] compiles
//! against a caller-chosen alphabet instead, which is what makes patterns
//! compiled separately composable under the binary [Dfa] operations.
//!
//! Patterns render back to source form with [Display], one canonical escape
//! per character.

use crate::dfa::{Alphabet, Dfa, Symbol};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub mod charclass;
pub mod multiplier;

pub use charclass::Charclass;
pub use multiplier::{Bound, Multiplier, ONE, PLUS, QM, STAR};

/// An alternation of one or more concatenations; the root of a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    concs: Vec<Conc>,
}

/// A concatenation of multiplied atoms. The empty concatenation is ε.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conc {
    mults: Vec<Mult>,
}

/// A multiplicand with its multiplier, e.g. `a{2,4}` or `(ab)*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mult {
    multiplicand: Multiplicand,
    multiplier: Multiplier,
}

/// The thing a multiplier applies to: a parenthesized sub-pattern or a
/// character class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Multiplicand {
    Group(Pattern),
    Class(Charclass),
}

impl Pattern {
    /// `None` if `concs` is empty; a pattern always has at least one
    /// alternative.
    pub fn new(concs: Vec<Conc>) -> Option<Self> {
        (!concs.is_empty()).then_some(Self { concs })
    }

    pub fn concs(&self) -> &[Conc] {
        self.concs.as_slice()
    }

    /// The alphabet this pattern compiles against by default: every
    /// character it names anywhere, plus the [Symbol::AnyElse] column that
    /// cofinite classes step on.
    pub fn alphabet(&self) -> Alphabet {
        let mut chars = BTreeSet::new();
        self.collect_chars(&mut chars);
        chars
            .into_iter()
            .map(Symbol::Char)
            .chain([Symbol::AnyElse])
            .collect()
    }

    /// Compiles this pattern to a minimal [Dfa] over [Pattern::alphabet].
    pub fn to_dfa(&self) -> Dfa {
        self.to_dfa_over(&self.alphabet())
    }

    /// Compiles this pattern against a caller-chosen alphabet, which must
    /// contain every character the pattern names for the result to be
    /// faithful.
    pub fn to_dfa_over(&self, alphabet: &Alphabet) -> Dfa {
        self.concs
            .iter()
            .fold(Dfa::null(alphabet.clone()), |acc, conc| {
                acc.union(&conc.to_dfa_over(alphabet))
                    .expect("the alphabet is shared")
            })
    }

    fn collect_chars(&self, into: &mut BTreeSet<char>) {
        for conc in &self.concs {
            for mult in &conc.mults {
                match &mult.multiplicand {
                    Multiplicand::Group(pattern) => pattern.collect_chars(into),
                    Multiplicand::Class(class) => into.extend(class.chars()),
                }
            }
        }
    }
}

impl Conc {
    pub fn new(mults: Vec<Mult>) -> Self {
        Self { mults }
    }

    pub fn mults(&self) -> &[Mult] {
        self.mults.as_slice()
    }

    fn to_dfa_over(&self, alphabet: &Alphabet) -> Dfa {
        self.mults
            .iter()
            .fold(Dfa::epsilon(alphabet.clone()), |acc, mult| {
                acc.concat(&mult.to_dfa_over(alphabet))
                    .expect("the alphabet is shared")
            })
    }
}

impl Mult {
    pub fn new(multiplicand: Multiplicand, multiplier: Multiplier) -> Self {
        Self {
            multiplicand,
            multiplier,
        }
    }

    pub fn multiplicand(&self) -> &Multiplicand {
        &self.multiplicand
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// `lower` mandatory copies, then either `upper - lower` optional copies
    /// or a star when the upper bound is infinite.
    fn to_dfa_over(&self, alphabet: &Alphabet) -> Dfa {
        let unit = match &self.multiplicand {
            Multiplicand::Group(pattern) => pattern.to_dfa_over(alphabet),
            Multiplicand::Class(class) => class.to_dfa_over(alphabet),
        };
        let lower = match self.multiplier.lower() {
            Bound::Finite(lower) => lower,
            Bound::Inf => unreachable!("the lower bound is always finite"),
        };
        let mandatory = unit.repeat(lower);
        match self.multiplier.upper() {
            Bound::Inf => mandatory
                .concat(&unit.star())
                .expect("the alphabet is shared"),
            Bound::Finite(upper) => {
                let optional = unit
                    .union(&Dfa::epsilon(alphabet.clone()))
                    .expect("the alphabet is shared");
                mandatory
                    .concat(&optional.repeat(upper - lower))
                    .expect("the alphabet is shared")
            }
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut concs = self.concs.iter();
        if let Some(first) = concs.next() {
            write!(f, "{first}")?;
            for conc in concs {
                write!(f, "|{conc}")?;
            }
        }
        Ok(())
    }
}

impl Display for Conc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.mults.iter().try_for_each(|mult| write!(f, "{mult}"))
    }
}

impl Display for Mult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.multiplicand {
            Multiplicand::Group(pattern) => write!(f, "({pattern})")?,
            Multiplicand::Class(class) => write!(f, "{class}")?,
        }
        write!(f, "{}", self.multiplier)
    }
}

//! # Deterministic finite automata
//! This module contains [Dfa], an immutable representation of a regular
//! language, together with the closed algebra over such languages:
//! concatenation, Kleene star, repetition, union, intersection, difference,
//! symmetric difference, complement, reversal and minimization, plus the
//! analysis operations (emptiness, liveness, equivalence and word
//! enumeration).
//!
//! ## Construction
//! A [Dfa] is built either from a parsed pattern (see
//! [Pattern::to_dfa](crate::regex::Pattern::to_dfa)), from one of the
//! primitive constructors [Dfa::null] and [Dfa::epsilon], or explicitly with
//! [Dfa::try_new], which checks the structural invariants and rejects
//! anything malformed:
//!
//! ```
//! use regalia::dfa::{Alphabet, Dfa, Symbol};
//!
//! // Two states over {a, b}: state 0 steps to state 1 on 'a' and state 1
//! // is final, so the language is exactly {"a"}.
//! let dfa = Dfa::try_new(
//!     "ab".chars().collect(),
//!     2,
//!     0,
//!     [1],
//!     [(0, Symbol::Char('a'), 1)],
//! )
//! .unwrap();
//! assert!(dfa.accepts_str("a"));
//! assert!(!dfa.accepts_str("b"));
//! assert!(!dfa.accepts_str("aa"));
//! ```
//!
//! Note that the transition table may be partial: a state without a
//! transition on some symbol implicitly steps into a dead state, which is
//! non-final and loops on every symbol forever. The algebra takes care to
//! treat that dead state as if it were real, which is what makes
//! [Dfa::complement] correct.
//!
//! ## The algebra
//! Every operation returns a fresh, already-minimized DFA and shares no
//! mutable structure with its operands (alphabets are shared by reference,
//! but they are immutable). Binary operations require both operands to have
//! the same alphabet and fail with [DfaError::AlphabetMismatch] otherwise:
//!
//! ```
//! use regalia::parser;
//!
//! let alphabet = "ab".chars().collect();
//! let a_start = parser::pattern("a[ab]*").unwrap().to_dfa_over(&alphabet);
//! let b_end = parser::pattern("[ab]*b").unwrap().to_dfa_over(&alphabet);
//!
//! let both = a_start.intersection(&b_end).unwrap();
//! assert!(both.accepts_str("ab"));
//! assert!(!both.accepts_str("ba"));
//!
//! // Complementing twice gets us back where we started
//! let round_trip = both.complement().complement();
//! assert!(round_trip.equivalent_to(&both).unwrap());
//! ```
//!
//! All of the operations are built on one generic subset-construction
//! driver, which numbers states breadth-first while visiting symbols in
//! sorted order. Running the same operation on the same operands therefore
//! yields bit-identical results, which the test suite relies on.
//!
//! ## Analysis
//! [Dfa::is_empty] tells whether the language has no words at all,
//! [Dfa::is_live] whether a given state can still reach a final state, and
//! [Dfa::equivalent_to] whether two automata accept the same language (by
//! checking that their symmetric difference is empty). [Dfa::strings]
//! enumerates the accepted words lazily, shortest first:
//!
//! ```
//! use regalia::parser;
//!
//! let dfa = parser::pattern("b|ab").unwrap().to_dfa();
//! let words: Vec<String> = dfa
//!     .strings()
//!     .map(|w| w.into_iter().map(|s| s.to_string()).collect())
//!     .collect();
//! assert_eq!(words, vec!["b", "ab"]);
//! ```

use crate::table::Table;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

mod crawl;
pub mod eval;
mod strings;
mod symbol;

use crawl::crawl;
pub use eval::DfaEvaluator;
pub use strings::Strings;
pub use symbol::{Alphabet, Symbol};

/// Tag for the left operand's substates in the concatenation construction.
const LEFT: u8 = 0;
/// Tag for the right operand's substates in the concatenation construction.
const RIGHT: u8 = 1;

/// A deterministic finite automaton over an [Alphabet], representing a
/// regular language. Immutable: every operation leaves its operands intact
/// and returns a fresh automaton. See the [module-level
/// documentation](crate::dfa) for an overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Alphabet,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial: usize,
}

/// A state in a [Dfa]: whether it accepts, and one transition slot per
/// alphabet symbol in sorted order. `None` is the implicit dead state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) accepting: bool,
    pub(crate) transitions: Vec<Option<usize>>,
}

impl DfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Transition targets, one per alphabet symbol in the alphabet's sorted
    /// order. `None` means the implicit dead state.
    pub fn transitions(&self) -> &[Option<usize>] {
        self.transitions.as_slice()
    }
}

/// Structural problems detected when building a [Dfa], plus the alphabet
/// disagreement rejected by every binary operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DfaError {
    #[error("initial state {0} is not a state")]
    InitialNotAState(usize),
    #[error("final state {0} is not a state")]
    FinalNotAState(usize),
    #[error("transition from {0}, which is not a state")]
    TransitionSourceNotAState(usize),
    #[error("transition from state {0} on '{1}' leads to {2}, which is not a state")]
    TransitionTargetNotAState(usize, Symbol, usize),
    #[error("transition from state {0} on '{1}', which is not in the alphabet")]
    TransitionSymbolNotInAlphabet(usize, Symbol),
    #[error("the alphabets of the two automata disagree")]
    AlphabetMismatch,
}

impl Dfa {
    /// Builds a DFA from its parts, validating every structural invariant.
    /// States are `0..state_count`. `transitions` is a sparse list of
    /// `(from, symbol, to)` entries; a later entry for the same `(from,
    /// symbol)` pair overwrites an earlier one, and missing entries denote
    /// the implicit dead state.
    pub fn try_new(
        alphabet: Alphabet,
        state_count: usize,
        initial: usize,
        finals: impl IntoIterator<Item = usize>,
        transitions: impl IntoIterator<Item = (usize, Symbol, usize)>,
    ) -> Result<Self, DfaError> {
        use DfaError::*;

        if initial >= state_count {
            return Err(InitialNotAState(initial));
        }

        let mut states: Vec<DfaState> = (0..state_count)
            .map(|_| DfaState {
                accepting: false,
                transitions: vec![None; alphabet.len()],
            })
            .collect();

        for state in finals {
            states
                .get_mut(state)
                .ok_or(FinalNotAState(state))?
                .accepting = true;
        }

        for (from, symbol, to) in transitions {
            if !alphabet.contains(symbol) {
                return Err(TransitionSymbolNotInAlphabet(from, symbol));
            }
            if to >= state_count {
                return Err(TransitionTargetNotAState(from, symbol, to));
            }
            let col = alphabet
                .index_of(symbol)
                .expect("symbol was checked against the alphabet");
            states
                .get_mut(from)
                .ok_or(TransitionSourceNotAState(from))?
                .transitions[col] = Some(to);
        }

        Ok(Dfa {
            alphabet,
            states,
            initial,
        })
    }

    /// The automaton accepting the empty language ∅: a single non-final
    /// state looping on every symbol.
    pub fn null(alphabet: Alphabet) -> Self {
        let state = DfaState {
            accepting: false,
            transitions: vec![Some(0); alphabet.len()],
        };
        Dfa {
            alphabet,
            states: vec![state],
            initial: 0,
        }
    }

    /// The automaton accepting exactly the empty word: a final initial state
    /// stepping into a dead state on every symbol.
    pub fn epsilon(alphabet: Alphabet) -> Self {
        let states = vec![
            DfaState {
                accepting: true,
                transitions: vec![Some(1); alphabet.len()],
            },
            DfaState {
                accepting: false,
                transitions: vec![Some(1); alphabet.len()],
            },
        ];
        Dfa {
            alphabet,
            states,
            initial: 0,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn states(&self) -> &[DfaState] {
        self.states.as_slice()
    }

    /// Index of the initial state.
    pub fn initial(&self) -> usize {
        self.initial
    }

    /// Checks whether this automaton accepts the given word. Symbols outside
    /// the alphabet read as [Symbol::AnyElse] when the alphabet has that
    /// column, and kill the word otherwise.
    pub fn accepts(&self, word: impl IntoIterator<Item = Symbol>) -> bool {
        let mut eval = self.evaluator();
        eval.step_multiple(word);
        eval.is_accepting()
    }

    /// Checks whether this automaton accepts the given text, reading each
    /// `char` as one symbol.
    ///
    /// ```
    /// use regalia::parser;
    ///
    /// let dfa = parser::pattern("a*b").unwrap().to_dfa();
    /// assert!(dfa.accepts_str("b"));
    /// assert!(dfa.accepts_str("aaab"));
    /// assert!(!dfa.accepts_str("ba"));
    /// ```
    pub fn accepts_str(&self, word: &str) -> bool {
        self.accepts(word.chars().map(Symbol::Char))
    }

    /// Gets an evaluator, which steps through this automaton one symbol at a
    /// time.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Concatenation: accepts any word that splits into a prefix this
    /// automaton accepts and a suffix `other` accepts. Fails if the
    /// alphabets differ.
    ///
    /// Every split must be tracked at once, so the construction follows sets
    /// of tagged substates; a left substate that lands on a final state
    /// spawns the right operand's initial state alongside it.
    ///
    /// ```
    /// use regalia::parser;
    ///
    /// let alphabet = "ab".chars().collect();
    /// let left = parser::pattern("a*").unwrap().to_dfa_over(&alphabet);
    /// let right = parser::pattern("b").unwrap().to_dfa_over(&alphabet);
    /// let joined = left.concat(&right).unwrap();
    /// assert!(joined.accepts_str("aab"));
    /// assert!(joined.accepts_str("b"));
    /// assert!(!joined.accepts_str("aaba"));
    /// ```
    pub fn concat(&self, other: &Dfa) -> Result<Dfa, DfaError> {
        if self.alphabet != other.alphabet {
            return Err(DfaError::AlphabetMismatch);
        }

        let mut initial = BTreeSet::from([(LEFT, self.initial)]);
        if self.states[self.initial].accepting {
            initial.insert((RIGHT, other.initial));
        }

        let crawled = crawl(
            self.alphabet.clone(),
            initial,
            |meta: &BTreeSet<(u8, usize)>| {
                meta.iter().any(|&(tag, state)| {
                    if tag == LEFT {
                        self.states[state].accepting && other.states[other.initial].accepting
                    } else {
                        other.states[state].accepting
                    }
                })
            },
            |meta, col| {
                let mut next = BTreeSet::new();
                for &(tag, state) in meta {
                    let side = if tag == LEFT { self } else { other };
                    if let Some(target) = side.states[state].transitions[col] {
                        next.insert((tag, target));
                        if tag == LEFT && self.states[target].accepting {
                            next.insert((RIGHT, other.initial));
                        }
                    }
                }
                next
            },
        );
        Ok(crawled.minimized())
    }

    /// Kleene star: accepts zero or more repetitions of any words this
    /// automaton accepts, including the empty word.
    ///
    /// Wiring final states straight back to the start would accept too much
    /// (`(b*ab)*` would take `abb`). Instead a fresh "omega" state outside
    /// the state set is the only final state, re-entered whenever a
    /// repetition completes.
    pub fn star(&self) -> Dfa {
        let omega = self.states.len();

        let crawled = crawl(
            self.alphabet.clone(),
            BTreeSet::from([omega]),
            |meta: &BTreeSet<usize>| meta.contains(&omega),
            |meta, col| {
                let mut next = BTreeSet::new();
                for &state in meta {
                    // omega stands in for the initial state
                    let state = if state == omega { self.initial } else { state };
                    if let Some(target) = self.states[state].transitions[col] {
                        next.insert(target);
                        if self.states[target].accepting {
                            next.insert(omega);
                        }
                    }
                }
                next
            },
        );
        crawled.minimized()
    }

    /// Repetition: concatenates `count` copies of this automaton.
    /// `repeat(0)` is [Dfa::epsilon].
    ///
    /// ```
    /// use regalia::parser;
    ///
    /// let dfa = parser::pattern("ab").unwrap().to_dfa();
    /// let three = dfa.repeat(3);
    /// assert!(three.accepts_str("ababab"));
    /// assert!(!three.accepts_str("abab"));
    /// ```
    pub fn repeat(&self, count: usize) -> Dfa {
        if count == 0 {
            return Dfa::epsilon(self.alphabet.clone());
        }
        let mut result = self.clone();
        for _ in 1..count {
            result = result.concat(self).expect("the alphabet is shared");
        }
        result.minimized()
    }

    /// Union: accepts the words accepted by either operand (or both). Fails
    /// if the alphabets differ.
    pub fn union(&self, other: &Dfa) -> Result<Dfa, DfaError> {
        self.product(other, |a, b| a || b)
    }

    /// Intersection: accepts the words accepted by both operands. Fails if
    /// the alphabets differ.
    pub fn intersection(&self, other: &Dfa) -> Result<Dfa, DfaError> {
        self.product(other, |a, b| a && b)
    }

    /// Difference: accepts the words this automaton accepts and `other` does
    /// not. Fails if the alphabets differ.
    pub fn difference(&self, other: &Dfa) -> Result<Dfa, DfaError> {
        self.product(other, |a, b| a && !b)
    }

    /// Symmetric difference: accepts the words accepted by exactly one of
    /// the operands. Fails if the alphabets differ.
    pub fn symmetric_difference(&self, other: &Dfa) -> Result<Dfa, DfaError> {
        self.product(other, |a, b| a != b)
    }

    /// Runs both automata in lock-step and lets `combine` decide which
    /// composite states accept. A side drops out of the composite state when
    /// it falls into its dead state; `(None, None)` is the composite dead
    /// state itself.
    fn product(&self, other: &Dfa, combine: impl Fn(bool, bool) -> bool) -> Result<Dfa, DfaError> {
        if self.alphabet != other.alphabet {
            return Err(DfaError::AlphabetMismatch);
        }

        let crawled = crawl(
            self.alphabet.clone(),
            (Some(self.initial), Some(other.initial)),
            |&(left, right): &(Option<usize>, Option<usize>)| {
                combine(
                    left.map_or(false, |s| self.states[s].accepting),
                    right.map_or(false, |s| other.states[s].accepting),
                )
            },
            |&(left, right), col| {
                (
                    left.and_then(|s| self.states[s].transitions[col]),
                    right.and_then(|s| other.states[s].transitions[col]),
                )
            },
        );
        Ok(crawled.minimized())
    }

    /// Complement: accepts exactly the words this automaton rejects.
    ///
    /// The implicit dead state must be treated as a real state here: it
    /// rejects everything, so its reification (the `None` meta-state) is
    /// final in the complement and loops on every symbol.
    ///
    /// ```
    /// use regalia::parser;
    ///
    /// let alphabet = "ab".chars().collect();
    /// let dfa = parser::pattern("a*").unwrap().to_dfa_over(&alphabet);
    /// let inverse = dfa.complement();
    /// assert!(inverse.accepts_str("b"));
    /// assert!(inverse.accepts_str("ab"));
    /// assert!(!inverse.accepts_str(""));
    /// assert!(!inverse.accepts_str("aaa"));
    /// ```
    pub fn complement(&self) -> Dfa {
        let crawled = crawl(
            self.alphabet.clone(),
            Some(self.initial),
            |state: &Option<usize>| !state.map_or(false, |s| self.states[s].accepting),
            |state, col| state.and_then(|s| self.states[s].transitions[col]),
        );
        crawled.minimized()
    }

    /// Reversal: accepts the mirror image of every word this automaton
    /// accepts. The crawl starts from the set of final states and follows
    /// transitions backwards; a state-set accepts when it contains this
    /// automaton's initial state.
    ///
    /// The result is *not* minimized, since minimization is itself two
    /// reversals.
    pub fn reversed(&self) -> Dfa {
        let finals: BTreeSet<usize> = (0..self.states.len())
            .filter(|&s| self.states[s].accepting)
            .collect();

        crawl(
            self.alphabet.clone(),
            finals,
            |meta: &BTreeSet<usize>| meta.contains(&self.initial),
            |meta, col| {
                (0..self.states.len())
                    .filter(|&p| {
                        self.states[p].transitions[col].map_or(false, |t| meta.contains(&t))
                    })
                    .collect()
            },
        )
    }

    /// Minimization by double reversal (Brzozowski): reversing twice yields
    /// the unique minimal automaton for the language.
    ///
    /// ```
    /// use regalia::dfa::{Dfa, Symbol};
    ///
    /// // Two states bouncing between each other on 'a', both final: the
    /// // language is a*, and the states are interchangeable
    /// let dfa = Dfa::try_new(
    ///     "a".chars().collect(),
    ///     2,
    ///     0,
    ///     [0, 1],
    ///     [(0, Symbol::Char('a'), 1), (1, Symbol::Char('a'), 0)],
    /// )
    /// .unwrap();
    /// let minimal = dfa.minimized();
    /// assert_eq!(minimal.states().len(), 1);
    /// assert!(minimal.equivalent_to(&dfa).unwrap());
    /// ```
    pub fn minimized(&self) -> Dfa {
        self.reversed().reversed()
    }

    /// A state is live if some final state is reachable from it through
    /// zero or more transitions.
    pub fn is_live(&self, state: usize) -> bool {
        let mut reachable = vec![state];
        let mut seen = HashSet::from([state]);
        let mut i = 0;
        while i < reachable.len() {
            let current = reachable[i];
            if self.states[current].accepting {
                return true;
            }
            for &target in self.states[current].transitions.iter().flatten() {
                if seen.insert(target) {
                    reachable.push(target);
                }
            }
            i += 1;
        }
        false
    }

    /// Whether this automaton accepts no words at all. Note that an
    /// automaton over an empty alphabet whose initial state is final is not
    /// empty: it accepts the empty word.
    pub fn is_empty(&self) -> bool {
        !self.is_live(self.initial)
    }

    /// Whether both automata accept the same language, i.e. whether their
    /// symmetric difference is empty. Fails if the alphabets differ.
    pub fn equivalent_to(&self, other: &Dfa) -> Result<bool, DfaError> {
        Ok(self.symmetric_difference(other)?.is_empty())
    }

    /// Enumerates the accepted words lazily, ordered by length and then by
    /// sorted symbol order. See [Strings].
    pub fn strings(&self) -> Strings<'_> {
        Strings::new(self)
    }

    /// Renders this automaton as a table for debugging, one row per state:
    /// an initial-state marker, the state number, a `final?` column, and the
    /// transition on each symbol in sorted order (dead transitions show as
    /// blank cells).
    pub fn to_table(&self) -> String {
        self.gen_table("→")
    }

    /// [Dfa::to_table] with `->` as the initial-state marker.
    pub fn ascii_table(&self) -> String {
        self.gen_table("->")
    }

    fn gen_table(&self, arrow: &str) -> String {
        let mut table = Table::default();

        let mut head = vec![String::new(), String::new(), "final?".to_string()];
        head.extend(self.alphabet.symbols().iter().map(Symbol::to_string));
        table.push_row(head);

        for (idx, state) in self.states.iter().enumerate() {
            let mut row = vec![
                if idx == self.initial {
                    arrow.to_string()
                } else {
                    String::new()
                },
                idx.to_string(),
                state.accepting.to_string(),
            ];
            row.extend(
                state
                    .transitions
                    .iter()
                    .map(|target| target.map(|t| t.to_string()).unwrap_or_default()),
            );
            table.push_row(row);
        }
        table.to_string(" ")
    }
}

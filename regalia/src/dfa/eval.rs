use super::{Dfa, DfaState, Symbol};

/// Keeps track of the current state while feeding a DFA one symbol at a time.
/// The evaluator enters the implicit dead state, and stays there, once a
/// transition is missing or a symbol falls outside an alphabet that has no
/// [Symbol::AnyElse] column.
///
/// ```
/// use regalia::dfa::Symbol;
/// use regalia::parser;
///
/// let dfa = parser::pattern("ab*").unwrap().to_dfa();
/// let mut eval = dfa.evaluator();
/// eval.step(Symbol::Char('a'));
/// assert!(eval.is_accepting());
/// eval.step(Symbol::Char('b'));
/// assert!(eval.is_accepting());
/// ```
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state().map_or(false, DfaState::is_accepting)
    }

    /// The state the evaluator is in, or `None` once it is dead.
    pub fn current_state(&self) -> Option<&'a DfaState> {
        self.current.map(|state| &self.dfa.states[state])
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        self.current
    }

    /// Consumes one symbol and returns the state stepped into.
    pub fn step(&mut self, symbol: Symbol) -> Option<&'a DfaState> {
        self.current = self
            .current
            .zip(self.dfa.alphabet.index_of(symbol))
            .and_then(|(state, col)| self.dfa.states[state].transitions[col]);
        self.current_state()
    }

    /// Consumes a sequence of symbols and returns the state stepped into.
    pub fn step_multiple(
        &mut self,
        symbols: impl IntoIterator<Item = Symbol>,
    ) -> Option<&'a DfaState> {
        symbols.into_iter().for_each(|symbol| {
            self.step(symbol);
        });
        self.current_state()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current: Some(dfa.initial),
        }
    }
}

use super::{Dfa, Symbol};
use std::collections::VecDeque;

/// Iterator over every word a DFA accepts, shortest first and in sorted
/// symbol order within each length. An infinite language yields forever, so
/// cap the iterator before collecting.
///
/// Words come out as vectors of [Symbol]. An alphabet containing
/// [Symbol::AnyElse] yields words containing the sentinel itself; it stands
/// for any character the alphabet does not name and has no single printable
/// form, so it is not expanded.
///
/// ```
/// use regalia::parser;
///
/// let dfa = parser::pattern("a{2,3}").unwrap().to_dfa();
/// let words: Vec<String> = dfa
///     .strings()
///     .map(|word| word.into_iter().map(|s| s.to_string()).collect())
///     .collect();
/// assert_eq!(words, vec!["aa", "aaa"]);
/// ```
pub struct Strings<'a> {
    dfa: &'a Dfa,
    live: Vec<bool>,
    queue: VecDeque<(Vec<Symbol>, usize)>,
    ready: VecDeque<Vec<Symbol>>,
}

impl<'a> Strings<'a> {
    pub(crate) fn new(dfa: &'a Dfa) -> Self {
        // Constraining the walk to live states keeps the queue from filling
        // up with prefixes that can never reach a final state.
        let live: Vec<bool> = (0..dfa.states.len()).map(|s| dfa.is_live(s)).collect();
        let mut queue = VecDeque::new();
        let mut ready = VecDeque::new();
        if live[dfa.initial] {
            if dfa.states[dfa.initial].accepting {
                ready.push_back(Vec::new());
            }
            queue.push_back((Vec::new(), dfa.initial));
        }
        Self {
            dfa,
            live,
            queue,
            ready,
        }
    }
}

impl Iterator for Strings<'_> {
    type Item = Vec<Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.ready.is_empty() {
            // Extending words strictly in FIFO order, with symbols taken in
            // sorted order, is what makes the output length-then-lex sorted.
            let (word, state) = self.queue.pop_front()?;
            for (col, &symbol) in self.dfa.alphabet.symbols().iter().enumerate() {
                if let Some(target) = self.dfa.states[state].transitions[col] {
                    if !self.live[target] {
                        continue;
                    }
                    let mut next = word.clone();
                    next.push(symbol);
                    if self.dfa.states[target].accepting {
                        self.ready.push_back(next.clone());
                    }
                    self.queue.push_back((next, target));
                }
            }
        }
        self.ready.pop_front()
    }
}

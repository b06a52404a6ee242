use super::{Alphabet, Dfa, DfaState};
use std::collections::HashMap;
use std::hash::Hash;

/// Explores the meta-state space reachable from `initial`, numbering each
/// newly seen meta-state in discovery order, and returns the result as a DFA
/// with states `0..n` where `0` is the initial state.
///
/// `follow` receives the column index of the symbol in the sorted alphabet;
/// every operation built on this driver gives all its operands the same
/// alphabet, so column indices agree across them. The produced transition
/// table is total over the alphabet. Because symbols are visited in sorted
/// order and meta-states are numbered by first encounter, identical inputs
/// always produce identical DFAs.
///
/// Terminates exactly when the reachable meta-state space is finite, which
/// holds for every caller in this crate.
pub(crate) fn crawl<M>(
    alphabet: Alphabet,
    initial: M,
    mut is_final: impl FnMut(&M) -> bool,
    mut follow: impl FnMut(&M, usize) -> M,
) -> Dfa
where
    M: Eq + Hash + Clone,
{
    let mut metas = vec![initial.clone()];
    let mut indices = HashMap::from([(initial, 0)]);
    let mut states = Vec::new();

    let mut i = 0;
    while i < metas.len() {
        let meta = metas[i].clone();
        let accepting = is_final(&meta);
        let transitions = (0..alphabet.len())
            .map(|col| {
                let next = follow(&meta, col);
                let target = match indices.get(&next) {
                    Some(&j) => j,
                    None => {
                        let j = metas.len();
                        indices.insert(next.clone(), j);
                        metas.push(next);
                        j
                    }
                };
                Some(target)
            })
            .collect();
        states.push(DfaState {
            accepting,
            transitions,
        });
        i += 1;
    }

    Dfa {
        alphabet,
        states,
        initial: 0,
    }
}

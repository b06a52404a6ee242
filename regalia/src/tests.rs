use crate::dfa::{Alphabet, Dfa, DfaError, Symbol};
use crate::parser::{self, ParseError};
use crate::regex::{Bound, Charclass, Multiplier, ONE, PLUS, QM, STAR};
use ::regex::Regex as LibRegex;
use proptest::prelude::*;
use rand::prelude::*;
use std::collections::BTreeSet;

const ALPHABET: &str = "abc";

fn alphabet(chars: &str) -> Alphabet {
    chars.chars().collect()
}

fn text(word: &[Symbol]) -> String {
    word.iter().map(|s| s.to_string()).collect()
}

fn compile(pattern: &str) -> Dfa {
    parser::pattern(pattern).unwrap().to_dfa()
}

fn compile_over(pattern: &str, chars: &str) -> Dfa {
    parser::pattern(pattern)
        .unwrap()
        .to_dfa_over(&alphabet(chars))
}

#[test]
fn star_then_literal() {
    let dfa = compile("a*b");
    for accepted in ["b", "ab", "aaab"] {
        assert!(dfa.accepts_str(accepted), "should accept {accepted:?}");
    }
    for rejected in ["", "a", "ba"] {
        assert!(!dfa.accepts_str(rejected), "should reject {rejected:?}");
    }
}

#[test]
fn alternation_star_accepts_everything() {
    let dfa = compile("(a|b)*");
    for word in ["", "a", "b", "abba", "bbbbab"] {
        assert!(dfa.accepts_str(word), "should accept {word:?}");
    }
}

#[test]
fn bounded_repetition_words() {
    let dfa = compile("a{2,3}");
    let words: Vec<String> = dfa.strings().map(|w| text(&w)).collect();
    assert_eq!(words, vec!["aa", "aaa"]);
}

#[test]
fn disjoint_intersection_is_empty() {
    let ab = compile_over("ab", "ab");
    let ba = compile_over("ba", "ab");
    assert!(ab.intersection(&ba).unwrap().is_empty());
}

#[test]
fn complement_over_two_letters() {
    let not_a_star = compile_over("a*", "ab").complement();
    for accepted in ["b", "ab", "ba"] {
        assert!(not_a_star.accepts_str(accepted), "should accept {accepted:?}");
    }
    for rejected in ["", "a", "aaa"] {
        assert!(!not_a_star.accepts_str(rejected), "should reject {rejected:?}");
    }
}

#[test]
fn reversal_mirrors_words() {
    let reversed = compile("abc").reversed();
    assert!(reversed.accepts_str("cba"));
    assert!(!reversed.accepts_str("abc"));
    let words: Vec<String> = reversed.strings().map(|w| text(&w)).collect();
    assert_eq!(words, vec!["cba"]);
}

#[test]
fn star_does_not_accept_chance_prefixes() {
    // Looping final states straight back to the start would accept "abb"
    let dfa = compile_over("(b*ab)*", "ab");
    assert!(dfa.accepts_str(""));
    assert!(dfa.accepts_str("bab"));
    assert!(dfa.accepts_str("abbab"));
    assert!(!dfa.accepts_str("a"));
    assert!(!dfa.accepts_str("ba"));
    assert!(!dfa.accepts_str("abb"));
}

#[test]
fn concatenation_tracks_every_split() {
    let joined = compile_over("a*", "a")
        .concat(&compile_over("aa", "a"))
        .unwrap();
    assert!(joined.accepts_str("aa"));
    assert!(joined.accepts_str("aaa"));
    assert!(joined.accepts_str("aaaa"));
    assert!(!joined.accepts_str(""));
    assert!(!joined.accepts_str("a"));
}

#[test]
fn null_and_epsilon() {
    let sigma = alphabet("ab");
    let null = Dfa::null(sigma.clone());
    assert!(null.is_empty());
    assert_eq!(null.strings().next(), None);

    let epsilon = Dfa::epsilon(sigma);
    assert!(!epsilon.is_empty());
    assert!(epsilon.accepts_str(""));
    assert!(!epsilon.accepts_str("a"));
    let words: Vec<Vec<Symbol>> = epsilon.strings().collect();
    assert_eq!(words, vec![Vec::new()]);
}

#[test]
fn empty_alphabet_epsilon_is_not_empty() {
    let epsilon = Dfa::epsilon(Alphabet::new([]));
    assert!(!epsilon.is_empty());
    assert!(epsilon.accepts_str(""));
}

#[test]
fn construction_validates_invariants() {
    let sigma = alphabet("ab");
    let a = Symbol::Char('a');
    assert_eq!(
        Dfa::try_new(sigma.clone(), 0, 0, [], []).unwrap_err(),
        DfaError::InitialNotAState(0)
    );
    assert_eq!(
        Dfa::try_new(sigma.clone(), 2, 0, [2], []).unwrap_err(),
        DfaError::FinalNotAState(2)
    );
    assert_eq!(
        Dfa::try_new(sigma.clone(), 2, 0, [1], [(0, a, 7)]).unwrap_err(),
        DfaError::TransitionTargetNotAState(0, a, 7)
    );
    assert_eq!(
        Dfa::try_new(sigma.clone(), 2, 0, [1], [(0, Symbol::Char('z'), 1)]).unwrap_err(),
        DfaError::TransitionSymbolNotInAlphabet(0, Symbol::Char('z'))
    );
    assert_eq!(
        Dfa::try_new(sigma, 2, 0, [1], [(5, a, 1)]).unwrap_err(),
        DfaError::TransitionSourceNotAState(5)
    );
}

#[test]
fn unknown_symbols_read_as_any_else() {
    let any = compile(".");
    assert!(any.accepts_str("z"));
    assert!(any.accepts_str("a"));
    assert!(!any.accepts_str("zz"));

    let not_ab = compile("[^ab]");
    assert!(not_ab.accepts_str("q"));
    assert!(!not_ab.accepts_str("a"));
}

#[test]
fn unknown_symbols_without_sentinel_are_dead() {
    let dfa = compile_over("a*", "a");
    assert!(dfa.accepts_str("aa"));
    assert!(!dfa.accepts_str("ab"));
}

#[test]
fn mismatched_alphabets_are_rejected() {
    let a = compile_over("a", "a");
    let b = compile_over("b", "b");
    assert_eq!(a.union(&b).unwrap_err(), DfaError::AlphabetMismatch);
    assert_eq!(a.concat(&b).unwrap_err(), DfaError::AlphabetMismatch);
    assert_eq!(a.equivalent_to(&b).unwrap_err(), DfaError::AlphabetMismatch);
}

#[test]
fn enumeration_is_length_then_lex() {
    let dfa = compile_over("(a|b){1,2}", "ab");
    let words: Vec<String> = dfa.strings().map(|w| text(&w)).collect();
    assert_eq!(words, vec!["a", "b", "aa", "ab", "ba", "bb"]);
}

#[test]
fn enumeration_materializes_the_sentinel() {
    let words: Vec<Vec<Symbol>> = compile("[^a]").strings().collect();
    assert_eq!(words, vec![vec![Symbol::AnyElse]]);
}

#[test]
fn infinite_enumeration_is_lazy() {
    let words: Vec<String> = compile_over("a*", "a")
        .strings()
        .take(4)
        .map(|w| text(&w))
        .collect();
    assert_eq!(words, vec!["", "a", "aa", "aaa"]);
}

#[test]
fn evaluator_steps_through_states() {
    let dfa = compile_over("ab", "ab");
    let mut eval = dfa.evaluator();
    assert!(!eval.is_accepting());
    eval.step(Symbol::Char('a'));
    assert!(!eval.is_accepting());
    eval.step(Symbol::Char('b'));
    assert!(eval.is_accepting());
    // Overshooting lands in the dead state for good
    eval.step(Symbol::Char('a'));
    assert!(!eval.is_accepting());
    assert_eq!(eval.current_state_idx(), None);
}

#[test]
fn table_lists_states_and_symbols() {
    let dfa = compile_over("ab", "ab");
    let table = dfa.ascii_table();
    assert!(table.contains("final?"));
    assert!(table.contains("->"));
    assert_eq!(table.lines().count(), dfa.states().len() + 1);
    assert!(dfa.to_table().contains('→'));
}

#[test]
fn equivalent_patterns() {
    let a = compile_over("(a|b)*", "ab");
    let b = compile_over("(a*b*)*", "ab");
    assert!(a.equivalent_to(&b).unwrap());
    let c = compile_over("a(a|b)*", "ab");
    assert!(!a.equivalent_to(&c).unwrap());
}

#[test]
fn parser_requires_full_consumption() {
    assert_eq!(parser::pattern("a)b"), Err(ParseError::UnparsedInput(1)));
    assert_eq!(parser::pattern("a{2,1}"), Err(ParseError::UnparsedInput(1)));
    assert_eq!(parser::pattern("[z-a]"), Err(ParseError::UnparsedInput(0)));
    assert_eq!(parser::pattern("a{,2}"), Err(ParseError::UnparsedInput(1)));
}

#[test]
fn group_prefixes_are_transparent() {
    let plain = parser::pattern("(ab)*").unwrap();
    assert_eq!(parser::pattern("(?:ab)*").unwrap(), plain);
    assert_eq!(parser::pattern("(?P<word>ab)*").unwrap(), plain);
}

#[test]
fn escapes_and_hex_digits() {
    assert!(compile(r"\x41").accepts_str("A"));
    assert!(compile(r"\x6a").accepts_str("j"));
    assert!(compile(r"\t").accepts_str("\t"));
    assert!(compile(r"\*a").accepts_str("*a"));
    // One hex digit is not a hex escape
    assert_eq!(parser::pattern(r"\x4"), Err(ParseError::UnparsedInput(0)));
}

#[test]
fn shorthand_classes() {
    let word = compile(r"\w+");
    assert!(word.accepts_str("snake_case"));
    assert!(!word.accepts_str("kebab-case"));

    let digits = compile(r"\d{3}");
    assert!(digits.accepts_str("042"));
    assert!(!digits.accepts_str("42"));

    let not_space = compile(r"\S");
    assert!(not_space.accepts_str("x"));
    assert!(!not_space.accepts_str(" "));
}

#[test]
fn class_ranges_and_sets() {
    let dfa = compile("[a-cx]");
    for accepted in ["a", "b", "c", "x"] {
        assert!(dfa.accepts_str(accepted), "should accept {accepted:?}");
    }
    for rejected in ["d", "w", ""] {
        assert!(!dfa.accepts_str(rejected), "should reject {rejected:?}");
    }
}

#[test]
fn charclass_algebra() {
    let abc = Charclass::new("abc".chars(), false);
    let bcd = Charclass::new("bcd".chars(), false);
    assert_eq!(abc.union(&bcd), Charclass::new("abcd".chars(), false));
    assert_eq!(abc.intersection(&bcd), Charclass::new("bc".chars(), false));

    let not_bcd = bcd.negated();
    assert_eq!(abc.intersection(&not_bcd), Charclass::single('a'));
    assert_eq!(abc.union(&not_bcd), Charclass::new("d".chars(), true));
    assert_eq!(not_bcd.negated(), bcd);
}

#[test]
fn multiplier_forms() {
    assert_eq!(Multiplier::new(Bound::Finite(0), Bound::Finite(1)), Some(QM));
    assert_eq!(Multiplier::new(Bound::Finite(0), Bound::Inf), Some(STAR));
    assert_eq!(Multiplier::new(Bound::Inf, Bound::Inf), None);
    assert_eq!(Multiplier::new(Bound::Finite(2), Bound::Finite(1)), None);
    assert_eq!(PLUS.to_string(), "+");
    assert_eq!(ONE.to_string(), "");
    let at_least_two = Multiplier::new(Bound::Finite(2), Bound::Inf).unwrap();
    assert_eq!(at_least_two.to_string(), "{2,}");
}

#[test]
fn patterns_render_back_to_source() {
    for source in ["a*b", "(a|b){2,3}", "[a-c]+", "[^ab]", r"\d\w\s", "a?b+c*", ""] {
        let pattern = parser::pattern(source).unwrap();
        let rendered = pattern.to_string();
        assert_eq!(
            parser::pattern(&rendered).unwrap(),
            pattern,
            "{source:?} rendered as {rendered:?}"
        );
    }
}

#[test]
fn operations_are_deterministic() {
    let x = compile_over("(ab|ba)*", "ab");
    let y = compile_over("a*b", "ab");
    assert_eq!(x.union(&y).unwrap(), x.union(&y).unwrap());
    assert_eq!(x.concat(&y).unwrap(), x.concat(&y).unwrap());
    assert_eq!(x.star(), x.star());
    assert_eq!(x.reversed(), x.reversed());
}

proptest! {
    /// Minimization may not change the language
    #[test]
    fn minimization_preserves_the_language(dfa in dfa(8), words in words()) {
        let minimized = dfa.minimized();
        prop_assert!(minimized.equivalent_to(&dfa).unwrap());
        for word in &words {
            prop_assert_eq!(minimized.accepts_str(word), dfa.accepts_str(word));
        }
    }

    /// Minimizing twice changes nothing, not even state numbering
    #[test]
    fn minimization_is_a_fixed_point(dfa in dfa(8)) {
        let once = dfa.minimized();
        let twice = once.minimized();
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn set_operations_agree_with_acceptance(a in dfa(6), b in dfa(6), words in words()) {
        let union = a.union(&b).unwrap();
        let intersection = a.intersection(&b).unwrap();
        let difference = a.difference(&b).unwrap();
        let xor = a.symmetric_difference(&b).unwrap();
        for word in &words {
            let in_a = a.accepts_str(word);
            let in_b = b.accepts_str(word);
            prop_assert_eq!(union.accepts_str(word), in_a || in_b);
            prop_assert_eq!(intersection.accepts_str(word), in_a && in_b);
            prop_assert_eq!(difference.accepts_str(word), in_a && !in_b);
            prop_assert_eq!(xor.accepts_str(word), in_a != in_b);
        }
    }

    #[test]
    fn idempotence_and_annihilation(dfa in dfa(8)) {
        prop_assert!(dfa.union(&dfa).unwrap().equivalent_to(&dfa).unwrap());
        prop_assert!(dfa.intersection(&dfa).unwrap().equivalent_to(&dfa).unwrap());
        prop_assert!(dfa.symmetric_difference(&dfa).unwrap().is_empty());
    }

    #[test]
    fn de_morgan(a in dfa(6), b in dfa(6)) {
        let lhs = a.union(&b).unwrap().complement();
        let rhs = a.complement().intersection(&b.complement()).unwrap();
        prop_assert!(lhs.equivalent_to(&rhs).unwrap());
        prop_assert!(a.complement().complement().equivalent_to(&a).unwrap());
    }

    #[test]
    fn concatenation_identities(dfa in dfa(6)) {
        let epsilon = Dfa::epsilon(dfa.alphabet().clone());
        let null = Dfa::null(dfa.alphabet().clone());
        prop_assert!(epsilon.concat(&dfa).unwrap().equivalent_to(&dfa).unwrap());
        prop_assert!(dfa.concat(&epsilon).unwrap().equivalent_to(&dfa).unwrap());
        prop_assert!(null.concat(&dfa).unwrap().is_empty());
        prop_assert!(dfa.concat(&null).unwrap().is_empty());
    }

    #[test]
    fn star_laws(dfa in dfa(5)) {
        let star = dfa.star();
        prop_assert!(star.accepts_str(""));
        prop_assert!(star.star().equivalent_to(&star).unwrap());
        let null_star = Dfa::null(dfa.alphabet().clone()).star();
        let epsilon = Dfa::epsilon(dfa.alphabet().clone());
        prop_assert!(null_star.equivalent_to(&epsilon).unwrap());
    }

    #[test]
    fn repetition_unfolds_to_concatenation(dfa in dfa(4), count in 0usize..3) {
        let repeated = dfa.repeat(count + 1);
        let unfolded = dfa.repeat(count).concat(&dfa).unwrap();
        prop_assert!(repeated.equivalent_to(&unfolded).unwrap());
        prop_assert!(dfa.repeat(1).equivalent_to(&dfa).unwrap());
        let epsilon = Dfa::epsilon(dfa.alphabet().clone());
        prop_assert!(dfa.repeat(0).equivalent_to(&epsilon).unwrap());
    }

    #[test]
    fn reversal_is_an_involution(dfa in dfa(6), words in words()) {
        let round_trip = dfa.reversed().reversed();
        prop_assert!(round_trip.equivalent_to(&dfa).unwrap());
        let reversed = dfa.reversed();
        for word in &words {
            let backwards: String = word.chars().rev().collect();
            prop_assert_eq!(reversed.accepts_str(&backwards), dfa.accepts_str(word));
        }
    }

    #[test]
    fn enumerated_words_are_sorted_and_accepted(dfa in dfa(6)) {
        let words: Vec<Vec<Symbol>> = dfa.strings().take(30).collect();
        for word in &words {
            prop_assert!(dfa.accepts(word.iter().copied()));
        }
        for pair in words.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            let sorted = first.len() < second.len()
                || (first.len() == second.len() && first < second);
            prop_assert!(sorted, "{:?} preceded {:?}", first, second);
        }
    }

    #[test]
    fn enumeration_exhausts_short_words(dfa in dfa(6)) {
        let expected: Vec<String> = words_up_to(3)
            .into_iter()
            .filter(|word| dfa.accepts_str(word))
            .collect();
        let enumerated: Vec<String> = dfa
            .strings()
            .take_while(|word| word.len() <= 3)
            .map(|word| text(&word))
            .collect();
        prop_assert_eq!(enumerated, expected);
    }

    #[test]
    fn operations_number_states_deterministically(a in dfa(6), b in dfa(6)) {
        prop_assert_eq!(a.union(&b).unwrap(), a.union(&b).unwrap());
        prop_assert_eq!(a.concat(&b).unwrap(), a.concat(&b).unwrap());
        prop_assert_eq!(a.star(), a.star());
        prop_assert_eq!(a.minimized(), a.minimized());
    }

    #[test]
    fn pattern_compilation_agrees_with_regex_crate(
        pattern_str in random_pattern(),
        tests in prop::collection::vec("[a-e]{0,10}", 20)
    ) {
        let dfa = compile(&pattern_str);
        let lib_regex = LibRegex::new(&format!("^(?:{pattern_str})$")).unwrap();
        let known: BTreeSet<char> = pattern_str
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        for test in &tests {
            // Restrict inputs to characters the pattern names, since any
            // other character reads as the sentinel
            let input: String = test.chars().filter(|c| known.contains(c)).collect();
            prop_assert_eq!(
                dfa.accepts_str(&input),
                lib_regex.is_match(&input),
                "pattern {:?} on input {:?}",
                pattern_str,
                input
            );
        }
    }
}

prop_compose! {
    /// A DFA over `a`/`b`/`c` with a possibly partial transition table
    fn dfa(max_states: usize)
        (num_states in 1..max_states)
        (
            initial in 0..num_states,
            accepting in prop::collection::vec(any::<bool>(), num_states..=num_states),
            transitions in prop::collection::vec(
                prop::collection::vec(prop::option::of(0..num_states), ALPHABET.len()..=ALPHABET.len()),
                num_states..=num_states
            )
        )
    -> Dfa {
        let mut entries: Vec<(usize, Symbol, usize)> = transitions
            .iter()
            .enumerate()
            .flat_map(|(from, row)| {
                row.iter().enumerate().filter_map(move |(col, target)| {
                    let symbol = ALPHABET.chars().nth(col).expect("column within alphabet");
                    target.map(|to| (from, Symbol::Char(symbol), to))
                })
            })
            .collect();
        // Insertion order of the sparse transition list must not matter
        entries.shuffle(&mut thread_rng());
        let finals: Vec<usize> = accepting
            .iter()
            .enumerate()
            .filter_map(|(idx, &accepting)| accepting.then_some(idx))
            .collect();
        Dfa::try_new(ALPHABET.chars().collect(), accepting.len(), initial, finals, entries)
            .expect("generated parts are structurally valid")
    }
}

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]{0,8}", 25)
}

/// Every word over the test alphabet up to the given length, in
/// length-then-lex order.
fn words_up_to(len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..len {
        frontier = frontier
            .iter()
            .flat_map(|word| ALPHABET.chars().map(move |c| format!("{word}{c}")))
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}

fn random_pattern() -> impl Strategy<Value = String> {
    "[a-e]".prop_recursive(8, 64, 10, |inner| {
        prop_oneof![
            4 => prop::collection::vec(inner.clone(), 1..4).prop_map(|parts| parts.join("")),
            3 => prop::collection::vec(inner.clone(), 2..4)
                .prop_map(|parts| format!("({})", parts.join("|"))),
            1 => inner.clone().prop_map(|r| format!("({r})*")),
            1 => inner.clone().prop_map(|r| format!("({r})+")),
            1 => inner.clone().prop_map(|r| format!("({r})?")),
            1 => inner.prop_map(|r| format!("({r}){{0,2}}")),
        ]
    })
}

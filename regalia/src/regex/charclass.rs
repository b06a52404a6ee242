use crate::dfa::{Alphabet, Dfa, DfaState, Symbol};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Characters that must be escaped outside a character class.
pub(crate) const SPECIAL: &str = "\\[]|().?*+{}";
/// Characters that must be escaped inside a character class.
pub(crate) const CLASS_SPECIAL: &str = "\\[]^-";

const WORD: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const DIGIT: &str = "0123456789";
const SPACE: &str = "\t\n\x0B\x0C\r ";

/// A finite or cofinite set of characters: the `a`, `[abc]`, `[^abc]`, `\w`
/// and `.` leaves of a pattern. When `negated`, `chars` lists the exceptions
/// rather than the members.
///
/// ```
/// use regalia::dfa::Symbol;
/// use regalia::regex::Charclass;
///
/// let vowels = Charclass::new("aeiou".chars(), false);
/// assert!(vowels.matches(Symbol::Char('e')));
/// assert!(!vowels.negated().matches(Symbol::Char('e')));
/// // Only a cofinite class matches characters it does not name
/// assert!(vowels.negated().matches(Symbol::AnyElse));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charclass {
    chars: BTreeSet<char>,
    negated: bool,
}

impl Charclass {
    pub fn new(chars: impl IntoIterator<Item = char>, negated: bool) -> Self {
        Self {
            chars: chars.into_iter().collect(),
            negated,
        }
    }

    /// The class matching exactly one character.
    pub fn single(c: char) -> Self {
        Self::new([c], false)
    }

    /// The class matching every character (`.`).
    pub fn any() -> Self {
        Self::new([], true)
    }

    /// `\w`: word characters.
    pub fn word() -> Self {
        Self::new(WORD.chars(), false)
    }

    /// `\d`: decimal digits.
    pub fn digit() -> Self {
        Self::new(DIGIT.chars(), false)
    }

    /// `\s`: whitespace.
    pub fn whitespace() -> Self {
        Self::new(SPACE.chars(), false)
    }

    pub fn chars(&self) -> &BTreeSet<char> {
        &self.chars
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn matches(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Char(c) => self.chars.contains(&c) != self.negated,
            // The sentinel stands for characters the class never names, so
            // only a cofinite class matches it
            Symbol::AnyElse => self.negated,
        }
    }

    /// The class matching exactly the characters this one does not.
    pub fn negated(&self) -> Self {
        Self {
            chars: self.chars.clone(),
            negated: !self.negated,
        }
    }

    /// The class matching what either operand matches. Four cases, since
    /// either side may be cofinite.
    pub fn union(&self, other: &Self) -> Self {
        let (chars, negated) = match (self.negated, other.negated) {
            (false, false) => (&self.chars | &other.chars, false),
            (false, true) => (&other.chars - &self.chars, true),
            (true, false) => (&self.chars - &other.chars, true),
            (true, true) => (&self.chars & &other.chars, true),
        };
        Self { chars, negated }
    }

    /// The class matching what both operands match.
    pub fn intersection(&self, other: &Self) -> Self {
        let (chars, negated) = match (self.negated, other.negated) {
            (false, false) => (&self.chars & &other.chars, false),
            (false, true) => (&self.chars - &other.chars, false),
            (true, false) => (&other.chars - &self.chars, false),
            (true, true) => (&self.chars | &other.chars, true),
        };
        Self { chars, negated }
    }

    /// Compiles to a two-state automaton over the given alphabet: the
    /// initial state steps to the final state on every matching symbol, and
    /// the final state is dead-ended since the language is single characters.
    pub fn to_dfa_over(&self, alphabet: &Alphabet) -> Dfa {
        let transitions = alphabet
            .symbols()
            .iter()
            .map(|&symbol| self.matches(symbol).then_some(1))
            .collect();
        Dfa {
            alphabet: alphabet.clone(),
            states: vec![
                DfaState {
                    accepting: false,
                    transitions,
                },
                DfaState {
                    accepting: true,
                    transitions: vec![None; alphabet.len()],
                },
            ],
            initial: 0,
        }
    }

    fn as_shorthand(&self) -> Option<&'static str> {
        let shorthands = [
            (Self::any(), "."),
            (Self::word(), "\\w"),
            (Self::digit(), "\\d"),
            (Self::whitespace(), "\\s"),
            (Self::word().negated(), "\\W"),
            (Self::digit().negated(), "\\D"),
            (Self::whitespace().negated(), "\\S"),
        ];
        shorthands
            .into_iter()
            .find_map(|(class, text)| (*self == class).then_some(text))
    }
}

fn escape(c: char, specials: &str) -> String {
    match c {
        '\t' => "\\t".to_string(),
        '\n' => "\\n".to_string(),
        '\x0B' => "\\v".to_string(),
        '\x0C' => "\\f".to_string(),
        '\r' => "\\r".to_string(),
        c if specials.contains(c) => format!("\\{c}"),
        c if c.is_control() && (c as u32) <= 0xff => format!("\\x{:02x}", c as u32),
        c => c.to_string(),
    }
}

impl Display for Charclass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(shorthand) = self.as_shorthand() {
            return write!(f, "{shorthand}");
        }
        let interior: String = self
            .chars
            .iter()
            .map(|&c| escape(c, CLASS_SPECIAL))
            .collect();
        if self.negated {
            write!(f, "[^{interior}]")
        } else if self.chars.len() == 1 {
            let c = *self.chars.iter().next().expect("length was checked");
            write!(f, "{}", escape(c, SPECIAL))
        } else {
            write!(f, "[{interior}]")
        }
    }
}

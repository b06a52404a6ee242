use std::fmt::{Display, Formatter};

/// A repetition bound: a concrete count or unbounded.
///
/// `Ord` is derived, so [Bound::Inf] compares greater than every finite
/// bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bound {
    Finite(usize),
    Inf,
}

/// How many times a multiplicand repeats: between `lower` and `upper` times
/// inclusive. `lower` is always finite and never exceeds `upper`.
///
/// The symbolic multipliers of the surface syntax are provided as constants:
/// [QM] (`?`), [STAR] (`*`), [PLUS] (`+`) and [ONE] (no multiplier).
///
/// ```
/// use regalia::regex::{Bound, Multiplier, PLUS};
///
/// assert_eq!(Multiplier::new(Bound::Finite(1), Bound::Inf), Some(PLUS));
/// // The lower bound may not exceed the upper bound
/// assert_eq!(Multiplier::new(Bound::Finite(3), Bound::Finite(2)), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Multiplier {
    lower: Bound,
    upper: Bound,
}

/// `?`: zero or one.
pub const QM: Multiplier = Multiplier {
    lower: Bound::Finite(0),
    upper: Bound::Finite(1),
};

/// `*`: zero or more.
pub const STAR: Multiplier = Multiplier {
    lower: Bound::Finite(0),
    upper: Bound::Inf,
};

/// `+`: one or more.
pub const PLUS: Multiplier = Multiplier {
    lower: Bound::Finite(1),
    upper: Bound::Inf,
};

/// No multiplier: exactly once.
pub const ONE: Multiplier = Multiplier {
    lower: Bound::Finite(1),
    upper: Bound::Finite(1),
};

impl Multiplier {
    /// `None` unless `lower` is finite and does not exceed `upper`.
    pub fn new(lower: Bound, upper: Bound) -> Option<Self> {
        match lower {
            Bound::Finite(_) if lower <= upper => Some(Self { lower, upper }),
            _ => None,
        }
    }

    pub fn lower(&self) -> Bound {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }
}

impl Display for Multiplier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.lower, self.upper) {
            (Bound::Finite(1), Bound::Finite(1)) => Ok(()),
            (Bound::Finite(0), Bound::Finite(1)) => write!(f, "?"),
            (Bound::Finite(0), Bound::Inf) => write!(f, "*"),
            (Bound::Finite(1), Bound::Inf) => write!(f, "+"),
            (Bound::Finite(n), Bound::Finite(m)) if n == m => write!(f, "{{{n}}}"),
            (Bound::Finite(n), Bound::Inf) => write!(f, "{{{n},}}"),
            (Bound::Finite(n), Bound::Finite(m)) => write!(f, "{{{n},{m}}}"),
            (Bound::Inf, _) => unreachable!("the lower bound is always finite"),
        }
    }
}

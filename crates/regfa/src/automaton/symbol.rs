//! Symbol types for automata transitions.

use std::fmt;

/// A transition label.
///
/// Epsilon is its own variant rather than a reserved character, so alphabet enumeration can
/// exclude it by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A literal alphabet character.
    Literal(char),
    /// An empty transition, consumed without reading input.
    Epsilon,
}

impl Symbol {
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The literal character, or `None` for epsilon.
    #[inline]
    pub fn literal(self) -> Option<char> {
        match self {
            Symbol::Literal(c) => Some(c),
            Symbol::Epsilon => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Literal(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Literal(c) => write!(f, "{c}"),
            Symbol::Epsilon => f.write_str("ε"),
        }
    }
}

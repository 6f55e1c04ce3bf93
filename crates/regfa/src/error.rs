//! Error types for the compilation pipeline.

use crate::automaton::{StateId, Symbol};
use crate::regex::Token;
use thiserror::Error;

/// A pattern rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("regex cannot be empty")]
    Empty,

    #[error("invalid character detected: {0:?}")]
    InvalidCharacter(char),

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("expression cannot start with {0:?}")]
    LeadingOperator(char),

    #[error("expression cannot end with {0:?}")]
    TrailingOperator(char),

    #[error("empty group at position {position}")]
    EmptyGroup { position: usize },

    #[error("operator {operator:?} at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },
}

impl SyntaxError {
    /// Short, stable reason for the rejection.
    pub fn reason(&self) -> &'static str {
        match self {
            SyntaxError::Empty => "empty",
            SyntaxError::InvalidCharacter(_) => "invalid character",
            SyntaxError::UnbalancedParentheses => "unbalanced parentheses",
            SyntaxError::LeadingOperator(_) => "invalid leading operator",
            SyntaxError::TrailingOperator(_) => "invalid trailing operator",
            SyntaxError::EmptyGroup { .. } => "empty group",
            SyntaxError::MissingOperand { .. } => "missing operand",
        }
    }
}

/// An input that got past validation but cannot be turned into an automaton.
///
/// These are never the user's fault: they mean a stage was handed something the previous
/// stage should have refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("operand stack underflow on postfix token {token} at position {position}")]
    StackUnderflow { token: Token, position: usize },

    #[error("expected exactly one NFA fragment after construction, found {0}")]
    FragmentCount(usize),

    #[error("unmatched parenthesis in operator-explicit expression")]
    UnmatchedGroup,

    #[error("unexpected character {0:?} in operator-explicit expression")]
    UnexpectedCharacter(char),

    #[error("symbol {0} is not part of the automaton alphabet")]
    UnknownSymbol(Symbol),

    #[error("epsilon cannot be consumed as input")]
    EpsilonMove,

    #[error("NFA fragments both claim state {0}")]
    OverlappingFragments(StateId),

    #[error(
        "state {state} already moves to {existing} on {symbol:?}, refusing second target {conflicting}"
    )]
    ConflictingTransition {
        state: StateId,
        symbol: char,
        existing: StateId,
        conflicting: StateId,
    },
}

/// Any failure of [`compile`](crate::compile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("internal contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

impl CompileError {
    /// Whether this is a user syntax error rather than an internal failure.
    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Syntax(_))
    }
}

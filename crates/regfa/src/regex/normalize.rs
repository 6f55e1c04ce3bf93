//! Operator normalization: explicit concatenation and infix-to-postfix conversion.

use crate::error::ContractViolation;
use std::fmt;

/// Explicit concatenation operator.
pub const CONCAT: char = '.';

/// One token of a postfix expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(char),
    Concat,
    Alternate,
    /// Zero or more (`*`).
    Star,
    /// One or more (`+`).
    Plus,
    /// Zero or one (`?`).
    Optional,
}

impl Token {
    fn operator(c: char) -> Option<Token> {
        match c {
            CONCAT => Some(Token::Concat),
            '|' => Some(Token::Alternate),
            '*' => Some(Token::Star),
            '+' => Some(Token::Plus),
            '?' => Some(Token::Optional),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Token::Star | Token::Plus | Token::Optional => 3,
            Token::Concat => 2,
            Token::Alternate => 1,
            Token::Literal(_) => 0,
        }
    }

    /// The character this token is written as.
    pub fn as_char(self) -> char {
        match self {
            Token::Literal(c) => c,
            Token::Concat => CONCAT,
            Token::Alternate => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Optional => '?',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Make implicit concatenation explicit.
///
/// A `.` goes between two adjacent characters when the left one closes an operand
/// (alphanumeric, `)`, `*`, `+`, `?`) and the right one opens one (alphanumeric, `(`).
pub fn add_concat(pattern: &str) -> String {
    let mut result = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        result.push(c);
        if let Some(&next) = chars.peek() {
            let closes = c.is_ascii_alphanumeric() || matches!(c, ')' | '*' | '+' | '?');
            let opens = next.is_ascii_alphanumeric() || next == '(';
            if closes && opens {
                result.push(CONCAT);
            }
        }
    }

    result
}

/// Shunting-yard conversion of an operator-explicit pattern to postfix.
///
/// Postfix operators bind tighter than concatenation, which binds tighter than alternation.
/// An incoming operator pops every stacked operator of greater or equal precedence, so equal
/// operators associate to the left.
pub fn infix_to_postfix(pattern: &str) -> Result<Vec<Token>, ContractViolation> {
    // `None` marks an open parenthesis.
    let mut stack: Vec<Option<Token>> = Vec::new();
    let mut output = Vec::with_capacity(pattern.len());

    for c in pattern.chars() {
        if c.is_ascii_alphanumeric() {
            output.push(Token::Literal(c));
        } else if c == '(' {
            stack.push(None);
        } else if c == ')' {
            loop {
                match stack.pop() {
                    Some(Some(op)) => output.push(op),
                    Some(None) => break,
                    None => return Err(ContractViolation::UnmatchedGroup),
                }
            }
        } else {
            let op = Token::operator(c).ok_or(ContractViolation::UnexpectedCharacter(c))?;
            while let Some(&Some(top)) = stack.last() {
                if top.precedence() < op.precedence() {
                    break;
                }
                output.push(top);
                stack.pop();
            }
            stack.push(Some(op));
        }
    }

    while let Some(entry) = stack.pop() {
        output.push(entry.ok_or(ContractViolation::UnmatchedGroup)?);
    }

    Ok(output)
}

/// Postfix tokens back to text, e.g. `ab|*`.
pub fn postfix_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.as_char()).collect()
}

//! Syntax validation of raw patterns.

use crate::config::ValidationMode;
use crate::error::SyntaxError;

/// Binary operators: alternation and explicit concatenation.
const BINARY: &[char] = &['|', '.'];
/// Postfix operators.
const UNARY: &[char] = &['*', '+', '?'];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '|' | '*' | '+' | '?' | '(' | ')' | '.')
}

/// Can an operand end right before this character?
fn ends_operand(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ')' || UNARY.contains(&c)
}

/// Can an operand start at this character?
fn starts_operand(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '('
}

/// Check a raw pattern. The first failing check wins.
///
/// In both modes the checks run in this order: empty input, disallowed characters, parenthesis
/// balance, leading operator, trailing operator. Strict mode then also requires non-empty
/// groups and an operand on each side of every binary operator and before every postfix
/// operator.
pub fn validate(pattern: &str, mode: ValidationMode) -> Result<(), SyntaxError> {
    let chars: Vec<char> = pattern.chars().collect();

    let (Some(&first), Some(&last)) = (chars.first(), chars.last()) else {
        return Err(SyntaxError::Empty);
    };

    if let Some(&c) = chars.iter().find(|&&c| !is_allowed(c)) {
        return Err(SyntaxError::InvalidCharacter(c));
    }

    let mut depth = 0usize;
    for &c in &chars {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SyntaxError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SyntaxError::UnbalancedParentheses);
    }

    if BINARY.contains(&first) || UNARY.contains(&first) {
        return Err(SyntaxError::LeadingOperator(first));
    }

    if BINARY.contains(&last) {
        return Err(SyntaxError::TrailingOperator(last));
    }

    if mode == ValidationMode::Strict {
        check_operands(&chars)?;
    }

    Ok(())
}

/// Convenience form: validity flag plus the error message when invalid.
///
/// The message is the [`SyntaxError`] display text, which names the offending character. Call
/// [`validate`] and [`SyntaxError::reason`] for the short reason alone.
pub fn is_valid(pattern: &str, mode: ValidationMode) -> (bool, Option<String>) {
    match validate(pattern, mode) {
        Ok(()) => (true, None),
        Err(err) => (false, Some(err.to_string())),
    }
}

fn check_operands(chars: &[char]) -> Result<(), SyntaxError> {
    for (position, &c) in chars.iter().enumerate() {
        let prev = position.checked_sub(1).map(|i| chars[i]);
        let next = chars.get(position + 1).copied();

        if c == '(' && next == Some(')') {
            return Err(SyntaxError::EmptyGroup { position });
        }

        let operand_before = prev.is_some_and(ends_operand);
        let missing = if BINARY.contains(&c) {
            !operand_before || !next.is_some_and(starts_operand)
        } else if UNARY.contains(&c) {
            !operand_before
        } else {
            false
        };

        if missing {
            return Err(SyntaxError::MissingOperand {
                operator: c,
                position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(pattern: &str) -> Result<(), SyntaxError> {
        validate(pattern, ValidationMode::Strict)
    }

    fn compatible(pattern: &str) -> Result<(), SyntaxError> {
        validate(pattern, ValidationMode::Compatible)
    }

    fn missing(op: char, position: usize) -> Result<(), SyntaxError> {
        Err(SyntaxError::MissingOperand {
            operator: op,
            position,
        })
    }

    const VALID: &[&str] = &[
        "a",
        "a|b",
        "a*",
        "(a|b)*abb",
        "a+b?",
        "a.b",
        "(ab)*c",
        "a**",
        "Z09",
    ];

    #[test]
    fn test_valid_patterns() {
        for pattern in VALID {
            assert_eq!(strict(pattern), Ok(()), "{pattern}");
            assert_eq!(compatible(pattern), Ok(()), "{pattern}");
            assert_eq!(is_valid(pattern, ValidationMode::Strict), (true, None));
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(strict(""), Err(SyntaxError::Empty));
        assert_eq!(
            is_valid("", ValidationMode::Strict),
            (false, Some("regex cannot be empty".to_owned()))
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(strict("a$b"), Err(SyntaxError::InvalidCharacter('$')));
        assert_eq!(strict("a b"), Err(SyntaxError::InvalidCharacter(' ')));
        assert_eq!(strict("é"), Err(SyntaxError::InvalidCharacter('é')));
        // The character check runs before the balance check.
        assert_eq!(strict("(a-"), Err(SyntaxError::InvalidCharacter('-')));
    }

    #[test]
    fn test_is_valid_names_offending_character() {
        let (valid, message) = is_valid("a$b", ValidationMode::Strict);
        assert!(!valid);
        let message = message.unwrap();
        assert!(message.contains("'$'"), "{message}");

        let (_, message) = is_valid("(a-", ValidationMode::Compatible);
        assert_eq!(message.as_deref(), Some("invalid character detected: '-'"));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(strict("(a"), Err(SyntaxError::UnbalancedParentheses));
        assert_eq!(strict("a)"), Err(SyntaxError::UnbalancedParentheses));
        assert_eq!(strict(")a("), Err(SyntaxError::UnbalancedParentheses));
        assert_eq!(
            is_valid("(a", ValidationMode::Compatible),
            (false, Some("unbalanced parentheses".to_owned()))
        );
    }

    #[test]
    fn test_leading_operator() {
        for pattern in ["*a", "|a", ".a", "+a", "?a"] {
            let op = pattern.chars().next().unwrap();
            assert_eq!(compatible(pattern), Err(SyntaxError::LeadingOperator(op)));
        }
        assert_eq!(
            is_valid("*a", ValidationMode::Strict),
            (false, Some("expression cannot start with '*'".to_owned()))
        );
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(strict("a|"), Err(SyntaxError::TrailingOperator('|')));
        assert_eq!(strict("a."), Err(SyntaxError::TrailingOperator('.')));
        assert_eq!(strict("a?"), Ok(()));
    }

    #[test]
    fn test_strict_closes_operand_gaps() {
        assert_eq!(strict("()"), Err(SyntaxError::EmptyGroup { position: 0 }));
        assert_eq!(strict("a()"), Err(SyntaxError::EmptyGroup { position: 1 }));
        assert_eq!(strict("a||b"), missing('|', 1));
        assert_eq!(strict("(|a)"), missing('|', 1));
        assert_eq!(strict("(a|)"), missing('|', 2));
        assert_eq!(strict("a|*b"), missing('|', 1));
        assert_eq!(strict("(*a)"), missing('*', 1));
        assert_eq!(strict("a..b"), missing('.', 1));
    }

    #[test]
    fn test_compatible_keeps_operand_gaps() {
        for pattern in ["()", "a()", "a||b", "(|a)", "(a|)", "a|*b", "(*a)", "a..b"] {
            assert_eq!(compatible(pattern), Ok(()), "{pattern}");
        }
    }
}

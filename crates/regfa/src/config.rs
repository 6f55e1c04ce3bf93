//! Compilation options.

/// How much the validator checks before construction starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// The basic checks plus operand and group checks. Every pattern accepted here compiles.
    #[default]
    Strict,
    /// Only the basic checks: empty input, alphabet, parenthesis balance, leading and trailing
    /// operators. Patterns such as `a|*b` or `()` pass and then fail during construction with a
    /// [`ContractViolation`](crate::ContractViolation).
    Compatible,
}

/// Options for [`compile`](crate::compile).
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub validation: ValidationMode,
}

impl CompileOptions {
    /// Default options: strict validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation mode.
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }
}

use thiserror::Error;

/// Everything that can stop an expression from being solved.
///
/// Numeric-domain conditions (division by zero, `sqrt` of a negative value,
/// NaN) are not errors; they propagate into the result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("Unrecognized token at position {position}")]
    UnrecognizedToken { position: usize },

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Mismatched parenthesis")]
    MismatchedParenthesis,

    #[error("Malformed number '{literal}'")]
    MalformedNumber { literal: String },

    #[error("Invalid dataset index {index} ({len} datasets available)")]
    InvalidDatasetIndex { index: usize, len: usize },

    #[error("Signal length mismatch ({left} points vs {right} points)")]
    SignalLengthMismatch { left: usize, right: usize },

    #[error("Malformed expression")]
    MalformedExpression,

    #[error("Unsupported symbolic operation: {0}")]
    UnsupportedSymbolicOperation(String),

    #[error("Function '{0}' requires a dataset argument")]
    FunctionRequiresSignal(&'static str),

    #[error("Expression does not evaluate to a dataset")]
    NotASignal,

    #[error("Malformed term '{0}'")]
    MalformedTerm(String),
}

impl ExprError {
    /// True for lexical and bracket errors.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ExprError::UnrecognizedToken { .. }
                | ExprError::UnbalancedParentheses
                | ExprError::MismatchedParenthesis
                | ExprError::MalformedNumber { .. }
        )
    }
}

use crate::data::signal::Signal;

use super::error::ExprError;

/// One evaluator stack entry.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Scalar(f64),
    Signal(Signal),
    /// Raw symbolic term string, see [`super::terms`]
    Term(String),
}

/// Operand stack shared by both evaluators. Running out of operands is a
/// malformed expression, never a panic.
#[derive(Debug, Default)]
pub(crate) struct OperandStack {
    items: Vec<Operand>,
}

impl OperandStack {
    pub fn push(&mut self, operand: Operand) {
        self.items.push(operand);
    }

    pub fn pop(&mut self) -> Result<Operand, ExprError> {
        self.items.pop().ok_or(ExprError::MalformedExpression)
    }

    /// Pop the two operands of a binary operator in source order.
    pub fn pop_pair(&mut self) -> Result<(Operand, Operand), ExprError> {
        let second = self.pop()?;
        let first = self.pop()?;
        Ok((first, second))
    }

    /// The single remaining operand once the queue is exhausted.
    pub fn finish(mut self) -> Result<Operand, ExprError> {
        let result = self.pop()?;
        if !self.items.is_empty() {
            return Err(ExprError::MalformedExpression);
        }
        Ok(result)
    }
}

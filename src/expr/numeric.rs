//! Postfix evaluation over scalars and signals.

use crate::data::fft::FftWindow;
use crate::data::signal::{DatasetRegistry, Signal};
use crate::data::transforms;

use super::error::ExprError;
use super::operand::{Operand, OperandStack};
use super::token::{Function, Operator, Token};

/// Result of a numeric solve.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Signal(Signal),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Signal(_) => None,
        }
    }

    pub fn as_signal(&self) -> Option<&Signal> {
        match self {
            Value::Signal(s) => Some(s),
            Value::Scalar(_) => None,
        }
    }

    pub fn into_signal(self) -> Option<Signal> {
        match self {
            Value::Signal(s) => Some(s),
            Value::Scalar(_) => None,
        }
    }
}

/// Inputs the numeric evaluator reads but never modifies.
pub(crate) struct NumericContext<'a> {
    pub registry: &'a dyn DatasetRegistry,
    pub x_axis_factor: f64,
    #[cfg_attr(not(feature = "fft"), allow(dead_code))]
    pub fft_window: FftWindow,
}

impl NumericContext<'_> {
    pub fn evaluate(&self, queue: Vec<Token>) -> Result<Value, ExprError> {
        let mut stack = OperandStack::default();
        for token in queue {
            self.evaluate_next(token, &mut stack)?;
        }
        match stack.finish()? {
            Operand::Scalar(v) => Ok(Value::Scalar(v)),
            Operand::Signal(s) => Ok(Value::Signal(s)),
            Operand::Term(_) => Err(ExprError::MalformedExpression),
        }
    }

    fn evaluate_next(&self, token: Token, stack: &mut OperandStack) -> Result<(), ExprError> {
        let result = match token {
            Token::Number(v) => Operand::Scalar(v),
            Token::Dataset(index) => Operand::Signal(self.dataset(index)?),
            Token::Operator(op) if op.arity() == 1 => negate(stack.pop()?)?,
            Token::Operator(op) => {
                let (first, second) = stack.pop_pair()?;
                apply_operator(op, first, second)?
            }
            Token::Function(f) => self.apply_function(f, stack.pop()?)?,
            Token::Variable | Token::OpenParen => {
                return Err(ExprError::MalformedExpression)
            }
        };
        stack.push(result);
        Ok(())
    }

    /// Clone of registry entry `index` with its x axis scaled.
    fn dataset(&self, index: usize) -> Result<Signal, ExprError> {
        let len = self.registry.len();
        let signal = self
            .registry
            .get(index)
            .ok_or(ExprError::InvalidDatasetIndex { index, len })?;
        Ok(signal.clone().scale_x(self.x_axis_factor))
    }

    fn apply_function(&self, f: Function, operand: Operand) -> Result<Operand, ExprError> {
        match operand {
            Operand::Scalar(_) if f.requires_signal() => {
                Err(ExprError::FunctionRequiresSignal(f.name()))
            }
            Operand::Scalar(v) => Ok(Operand::Scalar(f.apply_scalar(v).unwrap_or(f64::NAN))),
            Operand::Signal(s) => Ok(Operand::Signal(match f {
                Function::Integral => transforms::integral(&s),
                Function::Derivative => transforms::derivative(&s),
                Function::Rms => transforms::rms(&s),
                #[cfg(feature = "fft")]
                Function::Fft => crate::data::fft::spectrum(&s, self.fft_window),
                _ => s.map_y(|v| f.apply_scalar(v).unwrap_or(f64::NAN)),
            })),
            Operand::Term(_) => Err(ExprError::MalformedExpression),
        }
    }
}

fn negate(operand: Operand) -> Result<Operand, ExprError> {
    match operand {
        Operand::Scalar(v) => Ok(Operand::Scalar(-v)),
        Operand::Signal(s) => Ok(Operand::Signal(s.map_y(|v| -v))),
        Operand::Term(_) => Err(ExprError::MalformedExpression),
    }
}

/// Binary operator over every scalar/signal combination.
fn apply_operator(op: Operator, first: Operand, second: Operand) -> Result<Operand, ExprError> {
    let result = match (first, second) {
        (Operand::Scalar(a), Operand::Scalar(b)) => Operand::Scalar(op.apply(a, b)),
        (Operand::Signal(a), Operand::Scalar(b)) => Operand::Signal(a.map_y(|v| op.apply(v, b))),
        (Operand::Scalar(a), Operand::Signal(b)) => Operand::Signal(b.map_y(|v| op.apply(a, v))),
        (Operand::Signal(a), Operand::Signal(b)) => {
            let (left, right) = (a.len(), b.len());
            let combined = a
                .zip_y(&b, |x, y| op.apply(x, y))
                .ok_or(ExprError::SignalLengthMismatch { left, right })?;
            Operand::Signal(combined)
        }
        _ => return Err(ExprError::MalformedExpression),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parser::to_postfix;

    fn registry() -> Vec<Signal> {
        vec![
            Signal::from_points(&[[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]),
            Signal::from_points(&[[0.0, 4.0], [1.0, 5.0]]),
        ]
    }

    fn eval(expr: &str, registry: &Vec<Signal>, factor: f64) -> Result<Value, ExprError> {
        let ctx = NumericContext {
            registry,
            x_axis_factor: factor,
            fft_window: FftWindow::default(),
        };
        ctx.evaluate(to_postfix(expr, None)?)
    }

    #[test]
    fn scalar_signal_overloads() {
        let reg = registry();
        let out = eval("10-[0]", &reg, 1.0).unwrap().into_signal().unwrap();
        assert_eq!(out.y(), &[9.0, 8.0, 7.0]);
        let out = eval("[0]/2", &reg, 1.0).unwrap().into_signal().unwrap();
        assert_eq!(out.y(), &[0.5, 1.0, 1.5]);
        let out = eval("-[0]^2", &reg, 1.0).unwrap().into_signal().unwrap();
        assert_eq!(out.y(), &[-1.0, -4.0, -9.0]);
    }

    #[test]
    fn x_axis_factor_scales_only_x() {
        let reg = registry();
        let out = eval("[0]", &reg, 0.5).unwrap().into_signal().unwrap();
        assert_eq!(out.x(), &[0.0, 0.5, 1.0]);
        assert_eq!(out.y(), &[1.0, 2.0, 3.0]);
        assert_eq!(reg[0].x(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn structural_errors() {
        let reg = registry();
        assert_eq!(
            eval("[0]+[1]", &reg, 1.0),
            Err(ExprError::SignalLengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(
            eval("[2]", &reg, 1.0),
            Err(ExprError::InvalidDatasetIndex { index: 2, len: 2 })
        );
        assert_eq!(eval("1 2", &reg, 1.0), Err(ExprError::MalformedExpression));
        assert_eq!(eval("", &reg, 1.0), Err(ExprError::MalformedExpression));
        assert_eq!(eval("1+", &reg, 1.0), Err(ExprError::MalformedExpression));
        assert_eq!(
            eval("integral(2)", &reg, 1.0),
            Err(ExprError::FunctionRequiresSignal("integral"))
        );
    }

    #[test]
    fn ieee_conditions_are_not_errors() {
        let reg = registry();
        assert_eq!(eval("1/0", &reg, 1.0).unwrap().as_scalar(), Some(f64::INFINITY));
        assert!(eval("sqrt(-1)", &reg, 1.0).unwrap().as_scalar().unwrap().is_nan());
        let out = eval("log([0]-2)", &reg, 1.0).unwrap().into_signal().unwrap();
        assert!(out.y()[0].is_nan());
        assert_eq!(out.y()[1], f64::NEG_INFINITY);
    }

    #[test]
    fn signal_functions() {
        let reg = registry();
        let out = eval("int([0])", &reg, 1.0).unwrap().into_signal().unwrap();
        assert_eq!(out.y(), &[0.0, 1.5, 4.0]);
        let out = eval("DDT([0]*2)", &reg, 1.0).unwrap().into_signal().unwrap();
        assert_eq!(out.y(), &[0.0, 2.0, 2.0]);
    }
}

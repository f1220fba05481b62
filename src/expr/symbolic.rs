//! Postfix evaluation over scalars and raw symbolic terms.
//!
//! Terms are kept as raw strings (see [`super::terms`]). Addition and
//! subtraction concatenate; multiplication, division and powers re-parse
//! the operands into monomials and render the result back to raw form.
//! Like terms are only combined once, by the simplifier.

use super::error::ExprError;
use super::operand::{Operand, OperandStack};
use super::terms::{collect_like_terms, parse_raw, to_raw, Monomial};
use super::token::{Function, Operator, Token};

pub(crate) struct SymbolicContext {
    pub variable: char,
}

impl SymbolicContext {
    /// Evaluate to a raw term string.
    pub fn evaluate(&self, queue: Vec<Token>) -> Result<String, ExprError> {
        let mut stack = OperandStack::default();
        for token in queue {
            self.evaluate_next(token, &mut stack)?;
        }
        match stack.finish()? {
            Operand::Scalar(v) => Ok(format!("{v}")),
            Operand::Term(t) => Ok(t),
            Operand::Signal(_) => Err(ExprError::MalformedExpression),
        }
    }

    fn evaluate_next(&self, token: Token, stack: &mut OperandStack) -> Result<(), ExprError> {
        let result = match token {
            Token::Number(v) => Operand::Scalar(v),
            Token::Variable => Operand::Term(self.variable.to_string()),
            Token::Dataset(_) => {
                return Err(unsupported("dataset references"));
            }
            Token::Operator(op) if op.arity() == 1 => match stack.pop()? {
                Operand::Scalar(v) => Operand::Scalar(-v),
                Operand::Term(t) => Operand::Term(negate(&t)),
                Operand::Signal(_) => return Err(ExprError::MalformedExpression),
            },
            Token::Operator(op) => {
                let (first, second) = stack.pop_pair()?;
                self.apply_operator(op, first, second)?
            }
            Token::Function(f) => apply_function(f, stack.pop()?)?,
            Token::OpenParen => return Err(ExprError::MalformedExpression),
        };
        stack.push(result);
        Ok(())
    }

    fn apply_operator(&self, op: Operator, first: Operand, second: Operand) -> Result<Operand, ExprError> {
        use Operand::{Scalar, Term};
        let v = self.variable;
        let term = match (op, first, second) {
            (_, Operand::Signal(_), _) | (_, _, Operand::Signal(_)) => {
                return Err(ExprError::MalformedExpression)
            }
            (op, Scalar(a), Scalar(b)) => return Ok(Scalar(op.apply(a, b))),
            (Operator::Add, a, b) => format!("{}+{}", raw(a), raw(b)),
            (Operator::Subtract, a, b) => format!("{}+{}", raw(a), negate(&raw(b))),
            (Operator::Multiply, Term(a), Scalar(k)) | (Operator::Multiply, Scalar(k), Term(a)) => {
                map_coefficients(&a, v, |c| c * k)?
            }
            (Operator::Multiply, Term(a), Term(b)) => {
                let product = multiply(&parse_raw(&a, v)?, &parse_raw(&b, v)?)?;
                to_raw(&collect_like_terms(&product), v)
            }
            (Operator::Divide, Term(a), Scalar(k)) => map_coefficients(&a, v, |c| c / k)?,
            (Operator::Divide, _, _) => return Err(unsupported("division by a symbolic value")),
            (Operator::Power, Term(a), Scalar(n)) => to_raw(&power(&parse_raw(&a, v)?, n)?, v),
            (Operator::Power, _, _) => {
                return Err(unsupported("exponentiation by a symbolic value"))
            }
            (Operator::Negate, _, _) => return Err(ExprError::MalformedExpression),
        };
        Ok(Term(term))
    }
}

fn unsupported(what: &str) -> ExprError {
    ExprError::UnsupportedSymbolicOperation(what.to_string())
}

fn raw(operand: Operand) -> String {
    match operand {
        Operand::Scalar(v) => format!("{v}"),
        Operand::Term(t) => t,
        Operand::Signal(_) => String::new(),
    }
}

fn apply_function(f: Function, operand: Operand) -> Result<Operand, ExprError> {
    match operand {
        Operand::Scalar(v) => f
            .apply_scalar(v)
            .map(Operand::Scalar)
            .ok_or(ExprError::FunctionRequiresSignal(f.name())),
        _ => Err(unsupported(&format!("{f} of a symbolic value"))),
    }
}

/// Flip the sign of every term in a raw string.
pub(crate) fn negate(raw: &str) -> String {
    super::terms::break_apart_terms(raw)
        .iter()
        .map(|t| match t.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", t.strip_prefix('+').unwrap_or(t)),
        })
        .collect::<Vec<_>>()
        .join("+")
}

fn map_coefficients(raw: &str, variable: char, f: impl Fn(f64) -> f64) -> Result<String, ExprError> {
    let scaled: Vec<Monomial> = parse_raw(raw, variable)?
        .into_iter()
        .map(|(p, c)| (p, f(c)))
        .collect();
    Ok(to_raw(&scaled, variable))
}

fn exponent_overflow() -> ExprError {
    unsupported("exponent out of range")
}

/// Distribute `a * b`: exponents add, coefficients multiply.
fn multiply(a: &[Monomial], b: &[Monomial]) -> Result<Vec<Monomial>, ExprError> {
    let mut out = Vec::with_capacity(a.len() * b.len());
    for &(pa, ca) in a {
        for &(pb, cb) in b {
            let p = pa.checked_add(pb).ok_or_else(exponent_overflow)?;
            out.push((p, ca * cb));
        }
    }
    Ok(out)
}

/// Integer power of a polynomial.
///
/// A single monomial has its exponent multiplied (negative powers allowed);
/// a sum is expanded by repeated multiplication, non-negative powers only.
fn power(base: &[Monomial], n: f64) -> Result<Vec<Monomial>, ExprError> {
    if !n.is_finite() || n.fract() != 0.0 || n.abs() > i32::MAX as f64 {
        return Err(unsupported("non-integer exponent"));
    }
    let n = n as i32;
    let base = collect_like_terms(base);
    if let [(p, c)] = base[..] {
        let p = p.checked_mul(n).ok_or_else(exponent_overflow)?;
        return Ok(vec![(p, c.powi(n))]);
    }
    if n < 0 {
        return Err(unsupported("negative power of a sum"));
    }
    let mut result: Vec<Monomial> = vec![(0, 1.0)];
    for _ in 0..n {
        result = collect_like_terms(&multiply(&result, &base)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parser::to_postfix;
    use crate::expr::terms::simplify;

    fn solve(expr: &str) -> Result<String, ExprError> {
        let ctx = SymbolicContext { variable: 's' };
        let raw = ctx.evaluate(to_postfix(expr, Some('s'))?)?;
        simplify(&raw, 's', 15)
    }

    #[test]
    fn raw_strings_before_simplification() {
        let ctx = SymbolicContext { variable: 's' };
        let raw = ctx.evaluate(to_postfix("s - 2", Some('s')).unwrap()).unwrap();
        assert_eq!(raw, "s+-2");
        let raw = ctx.evaluate(to_postfix("3*s", Some('s')).unwrap()).unwrap();
        assert_eq!(raw, "3*s^1");
    }

    #[test]
    fn negate_flips_every_term() {
        assert_eq!(negate("1*s^2+-3*s^1+5"), "-1*s^2+3*s^1+-5");
        assert_eq!(negate("-s"), "s");
    }

    #[test]
    fn products_and_powers() {
        assert_eq!(solve("(s+1)*(s-1)").unwrap(), "s^2 - 1");
        assert_eq!(solve("(s+1)^2").unwrap(), "s^2 + 2*s + 1");
        assert_eq!(solve("(2*s^2)^3").unwrap(), "8*s^6");
        assert_eq!(solve("s^-1*s").unwrap(), "1");
        assert_eq!(solve("(s+1)^0").unwrap(), "1");
        assert_eq!(solve("(s+s)^-1").unwrap(), "0.5*s^-1");
        assert_eq!(solve("(s^2-s^2+s)^-2").unwrap(), "s^-2");
        assert_eq!(solve("(s^2+s)/2").unwrap(), "0.5*s^2 + 0.5*s");
    }

    #[test]
    fn scalar_subexpressions_fold() {
        assert_eq!(solve("2+3*4").unwrap(), "14");
        assert_eq!(solve("sqrt(4)*s").unwrap(), "2*s");
        assert_eq!(solve("-(s - 3)").unwrap(), "-s + 3");
    }

    #[test]
    fn unsupported_operations() {
        let is_unsupported = |r: Result<String, ExprError>| {
            matches!(r, Err(ExprError::UnsupportedSymbolicOperation(_)))
        };
        assert!(is_unsupported(solve("1/s")));
        assert!(is_unsupported(solve("s/s")));
        assert!(is_unsupported(solve("2^s")));
        assert!(is_unsupported(solve("s^s")));
        assert!(is_unsupported(solve("s^0.5")));
        assert!(is_unsupported(solve("(s+1)^-1")));
        assert!(is_unsupported(solve("sin(s)")));
        assert!(is_unsupported(solve("[0]*s")));
    }
}

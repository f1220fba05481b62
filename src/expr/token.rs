//! Token kinds and the fixed operator/function tables.

use std::fmt;

use once_cell::sync::Lazy;

/// Arithmetic operators, including unary negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Negate,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power | Operator::Negate => 3,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Power | Operator::Negate)
    }

    pub fn arity(self) -> usize {
        match self {
            Operator::Negate => 1,
            _ => 2,
        }
    }

    /// Apply a binary operator to two scalars (IEEE-754 semantics).
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
            Operator::Power => a.powf(b),
            Operator::Negate => -b,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::Negate => "neg",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Builtin functions. Each takes exactly one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Exp,
    /// Natural logarithm
    Log,
    Abs,
    /// Cumulative trapezoidal integral over x
    Integral,
    /// Backward-difference derivative dy/dx
    Derivative,
    /// Running root-mean-square
    Rms,
    /// One-sided amplitude spectrum
    #[cfg(feature = "fft")]
    Fft,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Abs => "abs",
            Function::Integral => "integral",
            Function::Derivative => "ddt",
            Function::Rms => "rms",
            #[cfg(feature = "fft")]
            Function::Fft => "fft",
        }
    }

    /// Functions that operate on a whole signal rather than per sample.
    pub fn requires_signal(self) -> bool {
        match self {
            Function::Integral | Function::Derivative | Function::Rms => true,
            #[cfg(feature = "fft")]
            Function::Fft => true,
            _ => false,
        }
    }

    /// Per-sample evaluation. `None` for signal-only functions.
    pub fn apply_scalar(self, v: f64) -> Option<f64> {
        Some(match self {
            Function::Sin => v.sin(),
            Function::Cos => v.cos(),
            Function::Tan => v.tan(),
            Function::Asin => v.asin(),
            Function::Acos => v.acos(),
            Function::Atan => v.atan(),
            Function::Sqrt => v.sqrt(),
            Function::Exp => v.exp(),
            Function::Log => v.ln(),
            Function::Abs => v.abs(),
            _ => return None,
        })
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted spellings, longest first so `integral` wins over `int`.
pub static FUNCTION_NAMES: Lazy<Vec<(&'static str, Function)>> = Lazy::new(|| {
    let mut names = vec![
        ("sin", Function::Sin),
        ("cos", Function::Cos),
        ("tan", Function::Tan),
        ("asin", Function::Asin),
        ("acos", Function::Acos),
        ("atan", Function::Atan),
        ("sqrt", Function::Sqrt),
        ("exp", Function::Exp),
        ("log", Function::Log),
        ("abs", Function::Abs),
        ("integral", Function::Integral),
        ("int", Function::Integral),
        ("derivative", Function::Derivative),
        ("ddt", Function::Derivative),
        ("rms", Function::Rms),
    ];
    #[cfg(feature = "fft")]
    names.push(("fft", Function::Fft));
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    names
});

/// A classified lexeme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Dataset(usize),
    Function(Function),
    Operator(Operator),
    /// Only ever held on the operator stack
    OpenParen,
    /// The symbolic variable
    Variable,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{v}"),
            Token::Dataset(i) => write!(f, "[{i}]"),
            Token::Function(func) => write!(f, "{func}"),
            Token::Operator(op) => write!(f, "{op}"),
            Token::OpenParen => f.write_str("("),
            Token::Variable => f.write_str("<var>"),
        }
    }
}

/// Render a postfix queue for log output.
pub fn queue_to_string(queue: &[Token]) -> String {
    queue
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

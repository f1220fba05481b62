//! Lexeme classification at a cursor position.
//!
//! These are pure functions over the remaining input. They only report what
//! the next lexeme is and how many bytes it spans; turning the text into a
//! [`Token`](super::token::Token) is left to the parser.

use super::token::{Function, Operator, FUNCTION_NAMES};

/// What kind of lexeme starts at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Lexeme {
    Number,
    Dataset,
    Function(Function),
    Operator(Operator),
    OpenParen,
    CloseParen,
    Variable,
}

/// Classify the lexeme at byte offset `cursor`.
///
/// `last_was_operator` is true when the previous token cannot end an operand
/// (start of input, an operator, `(` or a function name); only then is a
/// leading sign part of a number, and a lone `-` is negation.
/// `variable` is the symbolic variable, `None` in numeric mode.
pub(crate) fn classify(
    expression: &str,
    cursor: usize,
    last_was_operator: bool,
    variable: Option<char>,
) -> Option<(Lexeme, usize)> {
    let rest = expression.get(cursor..)?;
    if let Some(len) = next_is_number(rest, last_was_operator) {
        return Some((Lexeme::Number, len));
    }
    if let Some(len) = next_is_dataset(rest) {
        return Some((Lexeme::Dataset, len));
    }
    if let Some((function, len)) = next_is_function(rest) {
        return Some((Lexeme::Function(function), len));
    }
    if let Some(v) = variable {
        if rest.starts_with(v) {
            return Some((Lexeme::Variable, v.len_utf8()));
        }
    }
    if let Some(op) = next_is_operator(rest, last_was_operator) {
        return Some((Lexeme::Operator(op), 1));
    }
    match rest.as_bytes().first()? {
        b'(' => Some((Lexeme::OpenParen, 1)),
        b')' => Some((Lexeme::CloseParen, 1)),
        _ => None,
    }
}

/// Length of a numeric literal: optional sign, a run of digits and dots,
/// optional exponent. The run is greedy so `1.2.3` is reported whole and
/// rejected when parsed.
pub(crate) fn next_is_number(s: &str, last_was_operator: bool) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = 0;
    if last_was_operator && matches!(b.first(), Some(b'+' | b'-')) {
        i = 1;
    }
    let start = i;
    while i < b.len() && (b[i].is_ascii_digit() || b[i] == b'.') {
        i += 1;
    }
    if i == start {
        return None;
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    Some(i)
}

/// Length of a `[<digits>]` dataset reference.
pub(crate) fn next_is_dataset(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if b.first() != Some(&b'[') {
        return None;
    }
    let digits = b[1..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || b.get(1 + digits) != Some(&b']') {
        return None;
    }
    Some(digits + 2)
}

/// Case-insensitive builtin match. The name must be followed by `(`.
pub(crate) fn next_is_function(s: &str) -> Option<(Function, usize)> {
    let b = s.as_bytes();
    FUNCTION_NAMES.iter().find_map(|&(name, function)| {
        let n = name.len();
        if b.len() <= n || !b[..n].eq_ignore_ascii_case(name.as_bytes()) {
            return None;
        }
        let after = s.get(n..)?.trim_start();
        after.starts_with('(').then_some((function, n))
    })
}

pub(crate) fn next_is_operator(s: &str, last_was_operator: bool) -> Option<Operator> {
    let op = Operator::from_char(s.chars().next()?)?;
    match op {
        Operator::Subtract if last_was_operator => Some(Operator::Negate),
        // unary plus only exists as the sign of a number literal
        Operator::Add if last_was_operator => None,
        _ => Some(op),
    }
}

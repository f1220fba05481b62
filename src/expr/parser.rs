//! Infix to postfix conversion (shunting-yard).

use super::classify::{classify, Lexeme};
use super::error::ExprError;
use super::token::{Operator, Token};

/// Working state for one conversion.
#[derive(Debug)]
pub(crate) struct ParserState {
    operators: Vec<Token>,
    output: Vec<Token>,
    last_was_operator: bool,
}

impl ParserState {
    fn new() -> Self {
        Self {
            operators: Vec::new(),
            output: Vec::new(),
            last_was_operator: true,
        }
    }

    fn push_operand(&mut self, token: Token) {
        self.output.push(token);
        self.last_was_operator = false;
    }

    /// Pop higher-or-equal precedence operators, then push `op`.
    /// Right-associative operators only yield to strictly higher precedence.
    fn push_operator(&mut self, op: Operator) {
        while let Some(&Token::Operator(top)) = self.operators.last() {
            let shift = if op.is_right_associative() {
                top.precedence() > op.precedence()
            } else {
                top.precedence() >= op.precedence()
            };
            if !shift {
                break;
            }
            self.operators.pop();
            self.output.push(Token::Operator(top));
        }
        self.operators.push(Token::Operator(op));
        self.last_was_operator = true;
    }

    fn close_parenthesis(&mut self) -> Result<(), ExprError> {
        loop {
            match self.operators.pop() {
                None => return Err(ExprError::MismatchedParenthesis),
                Some(Token::OpenParen) => break,
                Some(token) => self.output.push(token),
            }
        }
        if let Some(&Token::Function(f)) = self.operators.last() {
            self.operators.pop();
            self.output.push(Token::Function(f));
        }
        self.last_was_operator = false;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token>, ExprError> {
        while let Some(token) = self.operators.pop() {
            if token == Token::OpenParen {
                return Err(ExprError::MismatchedParenthesis);
            }
            self.output.push(token);
        }
        Ok(self.output)
    }
}

/// Depth counter over the raw text; only the final depth matters here,
/// ordering problems such as `)(` are caught during conversion.
pub(crate) fn parentheses_balanced(expression: &str) -> bool {
    let depth = expression.chars().fold(0i64, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    });
    depth == 0
}

/// Convert an infix expression to a postfix token queue.
///
/// `variable` enables the symbolic variable; pass `None` for numeric mode.
pub(crate) fn to_postfix(expression: &str, variable: Option<char>) -> Result<Vec<Token>, ExprError> {
    if !parentheses_balanced(expression) {
        return Err(ExprError::UnbalancedParentheses);
    }

    let mut state = ParserState::new();
    let mut cursor = 0;
    while let Some(c) = expression[cursor..].chars().next() {
        if c.is_whitespace() {
            cursor += c.len_utf8();
            continue;
        }
        let (lexeme, len) = classify(expression, cursor, state.last_was_operator, variable)
            .ok_or(ExprError::UnrecognizedToken { position: cursor })?;
        parse_next(&mut state, lexeme, &expression[cursor..cursor + len])?;
        cursor += len;
    }
    state.finish()
}

fn parse_next(state: &mut ParserState, lexeme: Lexeme, text: &str) -> Result<(), ExprError> {
    match lexeme {
        Lexeme::Number => {
            let value: f64 = text.parse().map_err(|_| ExprError::MalformedNumber {
                literal: text.to_string(),
            })?;
            state.push_operand(Token::Number(value));
        }
        Lexeme::Dataset => {
            let digits = &text[1..text.len() - 1];
            let index: usize = digits.parse().map_err(|_| ExprError::MalformedNumber {
                literal: digits.to_string(),
            })?;
            state.push_operand(Token::Dataset(index));
        }
        Lexeme::Variable => state.push_operand(Token::Variable),
        Lexeme::Function(f) => {
            state.operators.push(Token::Function(f));
            state.last_was_operator = true;
        }
        Lexeme::Operator(op) => state.push_operator(op),
        Lexeme::OpenParen => {
            state.operators.push(Token::OpenParen);
            state.last_was_operator = true;
        }
        Lexeme::CloseParen => state.close_parenthesis()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::token::{queue_to_string, Function};

    fn postfix(expr: &str) -> String {
        queue_to_string(&to_postfix(expr, Some('s')).unwrap())
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(postfix("2+3*4"), "2 3 4 * +");
        assert_eq!(postfix("(2+3)*4"), "2 3 + 4 *");
        assert_eq!(postfix("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(postfix("8-4-2"), "8 4 - 2 -");
        assert_eq!(postfix("8/4*2"), "8 4 / 2 *");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(postfix("-2^2"), "-2 2 ^");
        assert_eq!(postfix("-s^2"), "<var> 2 ^ neg");
        assert_eq!(postfix("3-2"), "3 2 -");
        assert_eq!(postfix("3 - -2"), "3 -2 -");
        assert_eq!(postfix("2^-1"), "2 -1 ^");
    }

    #[test]
    fn functions_follow_their_argument() {
        assert_eq!(postfix("sin(1+2)*3"), "1 2 + sin 3 *");
        assert_eq!(postfix("sqrt(abs([1]))"), "[1] abs sqrt");
        let queue = to_postfix("rms([0])", None).unwrap();
        assert_eq!(queue, vec![Token::Dataset(0), Token::Function(Function::Rms)]);
    }

    #[test]
    fn parenthesis_errors() {
        assert_eq!(to_postfix("(1+2", None), Err(ExprError::UnbalancedParentheses));
        assert_eq!(to_postfix("1+2)", None), Err(ExprError::UnbalancedParentheses));
        assert_eq!(to_postfix(")1+2(", None), Err(ExprError::MismatchedParenthesis));
    }

    #[test]
    fn lexical_errors() {
        assert_eq!(
            to_postfix("1 + $", None),
            Err(ExprError::UnrecognizedToken { position: 4 })
        );
        assert_eq!(
            to_postfix("1.2.3", None),
            Err(ExprError::MalformedNumber { literal: "1.2.3".into() })
        );
        assert!(matches!(
            to_postfix("[99999999999999999999999]", None),
            Err(ExprError::MalformedNumber { .. })
        ));
        assert_eq!(to_postfix("s", None), Err(ExprError::UnrecognizedToken { position: 0 }));
    }

    #[test]
    fn balance_counter() {
        assert!(parentheses_balanced("((a)(b))"));
        assert!(parentheses_balanced(")("));
        assert!(!parentheses_balanced("(()"));
    }
}

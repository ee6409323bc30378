//! Definitions of types used in the libarith scanner.

use crate::common::Span;
use core::fmt;

/// The type of a [Token][Token].
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum TokenType {
    /// Any run of characters that is not an operator, a parenthesis or whitespace. Expected to
    /// be a number.
    Operand(String),

    /// + symbol
    Plus,

    /// - symbol
    Minus,

    /// × symbol
    Mult,

    /// ÷ symbol
    Div,

    /// ( symbol
    OpenParen,

    /// ) symbol
    CloseParen,

    /// End of input.
    EOF,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenType::*;
        match self {
            Operand(s) => f.write_str(s),
            Plus => f.write_str("+"),
            Minus => f.write_str("-"),
            Mult => f.write_str("×"),
            Div => f.write_str("÷"),
            OpenParen => f.write_str("("),
            CloseParen => f.write_str(")"),
            EOF => f.write_str("end of input"),
        }
    }
}

/// Describes a token in an exercise expression.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Token {
    /// The type of the token.
    pub ty: TokenType,
    /// The character span of the token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new<S: Into<Span>>(ty: TokenType, span: S) -> Self {
        Self {
            ty,
            span: span.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)
    }
}

//! Operator-precedence parser for exercise expressions.
//!
//! The grammar is
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := primary (("×" | "÷") primary)*
//! primary := NUMBER | "(" expr ")"
//! ```
//!
//! with all operators left-associative. Any deviation is an error; generator output never
//! deviates, but exercise files read back for grading may.

mod errors;
pub use errors::ParseErrors;
pub use errors::diagnose;

use crate::common::Span;
use crate::error::ParseError;
use crate::grammar::{BinaryOperator, Expr};
use crate::math::Rational;
use crate::scanner::{scan, Token, TokenType};
use crate::utils::PeekIter;

use core::convert::TryFrom;

/// Maximum number of tokens in a parsed expression, which also bounds the depth of the tree.
pub const MAX_TOKENS: usize = 1024;

/// Parses a scanned expression.
pub fn parse_expression(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    let significant = tokens.iter().filter(|t| t.ty != TokenType::EOF).count();
    if significant > MAX_TOKENS {
        return Err(ParseError::TooComplex {
            limit: MAX_TOKENS,
            span: tokens[MAX_TOKENS].span,
        });
    }
    ExpressionParser::new(tokens).parse()
}

/// Scans and parses an expression.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    parse_expression(scan(input))
}

struct ExpressionParser {
    input: PeekIter<Token>,
    /// Returned once the input is exhausted.
    eof: Token,
}

impl ExpressionParser {
    fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|t| t.span.hi).unwrap_or(0);
        Self {
            input: PeekIter::new(tokens.into_iter()),
            eof: Token::new(TokenType::EOF, (end, end + 1)),
        }
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.expr()?;
        let next = self.next_token();
        match next.ty {
            TokenType::EOF => Ok(expr),
            TokenType::CloseParen => Err(ParseError::UnmatchedClosingDelimiter { span: next.span }),
            ty => Err(ParseError::ExtraTokens {
                found: describe(&ty),
                span: next.span,
            }),
        }
    }

    fn next_token(&mut self) -> Token {
        match self.input.next() {
            Some(token) => token,
            None => self.eof.clone(),
        }
    }

    /// Consumes the next token if it is an operator of the given precedence.
    fn next_operator(&mut self, precedence: u8) -> Option<BinaryOperator> {
        let op = self
            .input
            .peek()
            .and_then(|tok| BinaryOperator::try_from(&tok.ty).ok())?;
        if op.precedence() != precedence {
            return None;
        }
        self.input.next();
        Some(op)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.next_operator(BinaryOperator::Plus.precedence()) {
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.primary()?;
        while let Some(op) = self.next_operator(BinaryOperator::Mult.precedence()) {
            let rhs = self.primary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Token { ty, span } = self.next_token();
        match ty {
            TokenType::Operand(token) => match token.parse::<Rational>() {
                Ok(num) => Ok(Expr::Num(num)),
                Err(_) => Err(ParseError::InvalidOperand { token, span }),
            },
            TokenType::OpenParen => self.parenthesized(span),
            ty => Err(ParseError::ExpectedOperand {
                found: describe(&ty),
                span,
            }),
        }
    }

    /// Parses the rest of a parenthesized expression opened at `open`.
    fn parenthesized(&mut self, open: Span) -> Result<Expr, ParseError> {
        let inner = self.expr()?;
        let close = self.next_token();
        match close.ty {
            TokenType::CloseParen => Ok(inner),
            TokenType::EOF => Err(ParseError::UnclosedDelimiter { span: open }),
            ty => Err(ParseError::ExtraTokens {
                found: describe(&ty),
                span: close.span,
            }),
        }
    }
}

fn describe(ty: &TokenType) -> String {
    match ty {
        TokenType::EOF => ty.to_string(),
        _ => format!(r#""{}""#, ty),
    }
}

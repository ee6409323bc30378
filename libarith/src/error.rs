//! Errors produced by libarith.

use crate::common::Span;

use std::path::PathBuf;
use thiserror::Error;

/// A failure to read a number, an expression, or a line of an exercise or answer file.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    #[error("expected a number, found nothing")]
    EmptyNumber,

    #[error(r#"malformed number "{0}""#)]
    MalformedNumber(String),

    #[error(r#"zero denominator in "{0}""#)]
    ZeroDenominator(String),

    /// A number token inside an expression could not be read.
    #[error(r#"invalid operand "{token}""#)]
    InvalidOperand { token: String, span: Span },

    #[error("expected an operand, found {found}")]
    ExpectedOperand { found: String, span: Span },

    #[error("unclosed delimiter \"(\"")]
    UnclosedDelimiter { span: Span },

    #[error("unmatched closing delimiter \")\"")]
    UnmatchedClosingDelimiter { span: Span },

    #[error("expected an operator, found {found}")]
    ExtraTokens { found: String, span: Span },

    #[error("expression has more than {limit} tokens")]
    TooComplex { limit: usize, span: Span },

    #[error("malformed exercise line")]
    MalformedExerciseLine,

    #[error("malformed answer line")]
    MalformedAnswerLine,
}

impl ParseError {
    /// The span of the offending text in the parsed expression, if the error was raised inside
    /// one.
    pub fn span(&self) -> Option<Span> {
        use ParseError::*;
        match self {
            InvalidOperand { span, .. }
            | ExpectedOperand { span, .. }
            | UnclosedDelimiter { span }
            | UnmatchedClosingDelimiter { span }
            | ExtraTokens { span, .. }
            | TooComplex { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Errors surfaced by generation, evaluation and grading.
#[derive(Error, Debug)]
pub enum Error {
    #[error("the bound must be a natural number of at least 1, got {bound}")]
    InvalidBound { bound: i64 },

    #[error("the count must be in [{min}, {max}], got {count}")]
    InvalidCount { count: i64, min: i64, max: i64 },

    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("division by zero")]
    DivisionByZero,

    /// The value of an expression does not fit in a native integer fraction.
    #[error("arithmetic overflow")]
    Overflow,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

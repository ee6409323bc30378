//! Diagnostic errors produced by the parser.

use crate::diagnostics::{Diagnostic, DiagnosticRecord};
use crate::error::ParseError;

define_errors! {
    ParseErrors;

    ///Every operand in an exercise expression must be a number in one of the forms
    ///
    ///```text
    ///7        a natural number
    ///3/5      a fraction
    ///2'3/8    a mixed number: 2 + 3/8
    ///```
    ///
    ///This error fires on operands that are none of these, or whose denominator is zero. For
    ///example, in
    ///
    ///```text
    ///1 + 2.5
    ///    ^^^- offending operand
    ///```
    ///
    ///decimals are not a supported number form; write `2'1/2` instead.
    P0001: InvalidOperand

    ///This error fires when an operand is expected but something else is found. The following
    ///expressions emit this error:
    ///
    ///```text
    ///1 + × 2
    ///    ^- offending token
    ///```
    ///
    ///```text
    ///1 ÷
    ///   ^- offending token: end of input
    ///```
    ///
    ///Negative operands are not supported, so a leading `-` also emits this error.
    P0002: ExpectedOperand

    ///Every `(` must be closed by a matching `)`. For example,
    ///
    ///```text
    ///(1 + 2 × 3
    ///^- unclosed delimiter
    ///```
    P0003: UnclosedDelimiter

    ///Every `)` must close an earlier `(`. For example,
    ///
    ///```text
    ///1 + 2) × 3
    ///     ^- unmatched closing delimiter
    ///```
    P0004: UnmatchedClosingDelimiter

    ///This error fires on tokens that are not connected to the rest of the expression by an
    ///operator. For example, in
    ///
    ///```text
    ///1 + 2 3
    ///      ^- offending token
    ///```
    ///
    ///it is unclear how `3` should combine with `1 + 2`.
    P0005: ExtraTokens

    ///Expressions are limited in length so that evaluating them stays cheap. Exercises produced
    ///by the generator are always far below the limit; this error usually means the exercise file
    ///was corrupted or edited by hand.
    P0006: TooComplex
}

/// Creates the diagnostic for an error raised while parsing an expression. Spans are relative to
/// the expression text. Returns [None](Option::None) for errors not raised by the parser.
pub fn diagnose(err: &ParseError) -> Option<Diagnostic> {
    let diagnostic = match err {
        ParseError::InvalidOperand { token, span } => {
            Diagnostic::span_err(*span, format!(r#"Invalid operand "{}""#, token), InvalidOperand::CODE)
                .with_label("not a number")
                .with_help("operands are written as `7`, `3/5` or `2'3/8`")
        }
        ParseError::ExpectedOperand { found, span } => Diagnostic::span_err(
            *span,
            format!("Expected an operand, found {}", found),
            ExpectedOperand::CODE,
        )
        .with_label("expected an operand"),
        ParseError::UnclosedDelimiter { span } => {
            Diagnostic::span_err(*span, r#"Unclosed delimiter "(""#, UnclosedDelimiter::CODE)
                .with_label("never closed")
        }
        ParseError::UnmatchedClosingDelimiter { span } => Diagnostic::span_err(
            *span,
            r#"Unmatched closing delimiter ")""#,
            UnmatchedClosingDelimiter::CODE,
        )
        .with_label(r#"has no matching opener "(""#),
        ParseError::ExtraTokens { found, span } => Diagnostic::span_err(
            *span,
            format!("Expected an operator, found {}", found),
            ExtraTokens::CODE,
        )
        .with_label("not connected to the expression"),
        ParseError::TooComplex { limit, span } => {
            Diagnostic::span_err(*span, "Expression is too long", TooComplex::CODE)
                .with_label(format!("token {} and beyond", limit + 1))
                .with_note(format!("expressions may have at most {} tokens", limit))
        }
        ParseError::EmptyNumber
        | ParseError::MalformedNumber(_)
        | ParseError::ZeroDenominator(_)
        | ParseError::MalformedExerciseLine
        | ParseError::MalformedAnswerLine => return None,
    };
    Some(diagnostic)
}

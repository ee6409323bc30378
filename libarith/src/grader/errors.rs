//! Diagnostic errors produced while grading.

use crate::common::Span;
use crate::diagnostics::{Diagnostic, DiagnosticRecord};
use crate::error::{Error, ParseError};

define_errors! {
    GradeErrors;

    ///Every exercise line has the form
    ///
    ///```text
    ///<index>. <expression> =
    ///```
    ///
    ///where the index is a natural number. Lines that do not start with an index followed by a
    ///`.` are skipped, and count as neither correct nor wrong. For example,
    ///
    ///```text
    ///one. 1 + 2 =
    ///^^^^^^^^^^^^- no index
    ///```
    G0001: MalformedExerciseLine

    ///Every answer must be a number in one of the forms
    ///
    ///```text
    ///7        a natural number
    ///3/5      a fraction
    ///2'3/8    a mixed number: 2 + 3/8
    ///```
    ///
    ///An answer that is none of these is graded as wrong. For example,
    ///
    ///```text
    ///4. 0.375
    ///   ^^^^^- not a number
    ///```
    G0002: MalformedAnswer

    ///Every exercise should have an answer line with the same index. An exercise without one is
    ///graded as wrong.
    G0003: MissingAnswer

    ///An exercise whose expression parses but cannot be evaluated, for example because it
    ///divides by zero, is graded as wrong:
    ///
    ///```text
    ///3. 1 ÷ (1/2 - 1/2) =
    ///   ^^^^^^^^^^^^^^^- division by zero
    ///```
    ///
    ///Generated exercises never divide by zero; this error usually means the exercise file was
    ///edited by hand.
    G0004: UnevaluableExercise

    ///Every index should be answered at most once. When an answer file holds several answers for
    ///one index, the first is graded and the others are ignored. For example, in
    ///
    ///```text
    ///1. 3/5
    ///1. 7
    ///^^- ignored
    ///```
    ///
    ///exercise 1 is graded against `3/5`.
    G0005: DuplicateAnswer

    ///Every answer line has the form
    ///
    ///```text
    ///<index>. <answer>
    ///```
    ///
    ///where the index is a natural number. Lines that do not start with an index followed by a
    ///`.` answer nothing, and are skipped.
    G0006: MalformedAnswerLine
}

fn whole_line(line: &str) -> Span {
    (0, line.chars().count().max(1)).into()
}

/// Span of `len` characters at `offset`, or a single character if `len` is zero.
fn span_at(offset: usize, len: usize) -> Span {
    (offset, offset + len.max(1)).into()
}

pub(crate) fn malformed_exercise_line(line: &str) -> Diagnostic {
    Diagnostic::span_err(whole_line(line), "Malformed exercise line", MalformedExerciseLine::CODE)
        .with_label("skipped")
        .with_help("exercise lines are written as `<index>. <expression> =`")
}

pub(crate) fn malformed_answer_line(line: &str) -> Diagnostic {
    Diagnostic::span_err(whole_line(line), "Malformed answer line", MalformedAnswerLine::CODE)
        .with_label("skipped")
        .with_help("answer lines are written as `<index>. <answer>`")
}

pub(crate) fn malformed_answer(token: &str, offset: usize, err: &ParseError) -> Diagnostic {
    Diagnostic::span_warn(
        span_at(offset, token.chars().count()),
        format!(r#"Malformed answer "{}""#, token),
        MalformedAnswer::CODE,
    )
    .with_label(err.to_string())
    .with_note("graded as wrong")
}

pub(crate) fn missing_answer(index: usize, expression: &str, offset: usize) -> Diagnostic {
    Diagnostic::span_warn(
        span_at(offset, expression.chars().count()),
        format!("No answer for exercise {}", index),
        MissingAnswer::CODE,
    )
    .with_note("graded as wrong")
}

pub(crate) fn unevaluable_exercise(
    index: usize,
    expression: &str,
    offset: usize,
    err: &Error,
) -> Diagnostic {
    Diagnostic::span_warn(
        span_at(offset, expression.chars().count()),
        format!("Exercise {} cannot be evaluated", index),
        UnevaluableExercise::CODE,
    )
    .with_label(err.to_string())
    .with_note("graded as wrong")
}

pub(crate) fn duplicate_answer(
    index: usize,
    index_span: Span,
    first_line_number: usize,
) -> Diagnostic {
    Diagnostic::span_warn(
        index_span,
        format!("Duplicate answer for exercise {}", index),
        DuplicateAnswer::CODE,
    )
    .with_label("ignored")
    .with_note(format!(
        "the answer on line {} is graded instead",
        first_line_number
    ))
}

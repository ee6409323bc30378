//! Grading of submitted answers against an exercise file.
//!
//! Grading never fails as a whole. Lines that cannot be used are skipped, exercises without a
//! usable answer are graded as wrong, and both are reported as [LineDiagnostic]s.

mod errors;
pub use errors::GradeErrors;

use crate::common::Span;
use crate::diagnostics::Diagnostic;
use crate::error::ParseError;
use crate::evaluator::evaluate;
use crate::math::Rational;
use crate::parser::{diagnose, parse};

use core::fmt;
use std::collections::hash_map::{Entry, HashMap};
use tracing::info;

/// A line of the form `<index>. <body>`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct NumberedLine<'a> {
    pub index: usize,
    /// The text after the index, trimmed.
    pub body: &'a str,
    /// Character offset of `body` in the line.
    pub offset: usize,
    /// Character span of the index in the line.
    pub index_span: Span,
}

fn numbered_line(line: &str, err: ParseError) -> Result<NumberedLine<'_>, ParseError> {
    let (index_text, rest) = match line.split_once('.') {
        Some(parts) => parts,
        None => return Err(err),
    };
    let index_trimmed = index_text.trim();
    if index_trimmed.is_empty() || !index_trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err);
    }
    let index = match index_trimmed.parse() {
        Ok(index) => index,
        Err(_) => return Err(err),
    };

    let index_lo = index_text.len() - index_text.trim_start().len();
    let index_span = Span::from((
        index_text[..index_lo].chars().count(),
        index_text[..index_lo].chars().count() + index_trimmed.len(),
    ));
    let body = rest.trim();
    let body_start = line.len() - rest.len() + (rest.len() - rest.trim_start().len());
    Ok(NumberedLine {
        index,
        body,
        offset: line[..body_start].chars().count(),
        index_span,
    })
}

/// Reads an exercise line, `<index>. <expression> =`. The body of the result is the expression.
///
/// The trailing `=` may be omitted.
pub fn parse_exercise_line(line: &str) -> Result<NumberedLine<'_>, ParseError> {
    let mut numbered = numbered_line(line, ParseError::MalformedExerciseLine)?;
    if let Some(expression) = numbered.body.strip_suffix('=') {
        numbered.body = expression.trim_end();
    }
    Ok(numbered)
}

/// Reads an answer line, `<index>. <answer>`. The body of the result is the answer token.
pub fn parse_answer_line(line: &str) -> Result<NumberedLine<'_>, ParseError> {
    numbered_line(line, ParseError::MalformedAnswerLine)
}

/// The input file a line was read from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InputFile {
    Exercises,
    Answers,
}

impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exercises => f.write_str("exercises"),
            Self::Answers => f.write_str("answers"),
        }
    }
}

/// A diagnostic for one line of an input file.
#[derive(Clone, Debug)]
pub struct LineDiagnostic {
    pub file: InputFile,
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    /// Spans are relative to `line`.
    pub diagnostic: Diagnostic,
}

/// Indices of correctly and wrongly answered exercises, in ascending order.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct GradeReport {
    pub correct: Vec<usize>,
    pub wrong: Vec<usize>,
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |indices: &[usize]| {
            indices
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(f, "Correct: {} ({})", self.correct.len(), join(&self.correct))?;
        write!(f, "Wrong: {} ({})", self.wrong.len(), join(&self.wrong))
    }
}

/// The result of a grading run.
#[derive(Clone, Debug)]
pub struct Grading {
    pub report: GradeReport,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// The first answer given for an index.
struct Answer<'a> {
    token: &'a str,
    offset: usize,
    line_number: usize,
    line: &'a str,
}

struct Grader<'a> {
    answers: HashMap<usize, Answer<'a>>,
    report: GradeReport,
    diagnostics: Vec<LineDiagnostic>,
}

impl<'a> Grader<'a> {
    fn new() -> Self {
        Self {
            answers: HashMap::new(),
            report: GradeReport::default(),
            diagnostics: Vec::new(),
        }
    }

    fn push_diagnostic(
        &mut self,
        file: InputFile,
        line_number: usize,
        line: &str,
        diagnostic: Diagnostic,
    ) {
        self.diagnostics.push(LineDiagnostic {
            file,
            line_number,
            line: line.to_owned(),
            diagnostic,
        });
    }

    fn read_answers(&mut self, answers: &'a str) {
        for (i, line) in answers.lines().enumerate() {
            let line_number = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let numbered = match parse_answer_line(line) {
                Ok(numbered) => numbered,
                Err(_) => {
                    let diag = errors::malformed_answer_line(line);
                    self.push_diagnostic(InputFile::Answers, line_number, line, diag);
                    continue;
                }
            };
            match self.answers.entry(numbered.index) {
                Entry::Vacant(entry) => {
                    entry.insert(Answer {
                        token: numbered.body,
                        offset: numbered.offset,
                        line_number,
                        line,
                    });
                }
                Entry::Occupied(entry) => {
                    let first = entry.get().line_number;
                    let diag = errors::duplicate_answer(numbered.index, numbered.index_span, first);
                    self.push_diagnostic(InputFile::Answers, line_number, line, diag);
                }
            }
        }
    }

    fn grade_exercises(&mut self, exercises: &str) {
        for (i, line) in exercises.lines().enumerate() {
            let line_number = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let exercise = match parse_exercise_line(line) {
                Ok(exercise) => exercise,
                Err(_) => {
                    let diag = errors::malformed_exercise_line(line);
                    self.push_diagnostic(InputFile::Exercises, line_number, line, diag);
                    continue;
                }
            };
            let expr = match parse(exercise.body) {
                Ok(expr) => expr,
                Err(err) => {
                    let diag = match diagnose(&err) {
                        Some(diag) => diag.shifted(exercise.offset),
                        None => errors::malformed_exercise_line(line),
                    };
                    self.push_diagnostic(InputFile::Exercises, line_number, line, diag);
                    continue;
                }
            };

            let verdict = match evaluate(&expr) {
                Ok(expected) => self.check_answer(&exercise, line_number, line, expected),
                Err(err) => Err(LineDiagnostic {
                    file: InputFile::Exercises,
                    line_number,
                    line: line.to_owned(),
                    diagnostic: errors::unevaluable_exercise(
                        exercise.index,
                        exercise.body,
                        exercise.offset,
                        &err,
                    ),
                }),
            };
            let correct = match verdict {
                Ok(correct) => correct,
                Err(diag) => {
                    self.diagnostics.push(diag);
                    false
                }
            };
            if correct {
                self.report.correct.push(exercise.index);
            } else {
                self.report.wrong.push(exercise.index);
            }
        }
    }

    /// Compares the answer given for `exercise` with `expected`. A missing or malformed answer is
    /// wrong, and yields its diagnostic.
    fn check_answer(
        &self,
        exercise: &NumberedLine<'_>,
        line_number: usize,
        line: &str,
        expected: Rational,
    ) -> Result<bool, LineDiagnostic> {
        let answer = match self.answers.get(&exercise.index) {
            Some(answer) => answer,
            None => {
                return Err(LineDiagnostic {
                    file: InputFile::Exercises,
                    line_number,
                    line: line.to_owned(),
                    diagnostic: errors::missing_answer(
                        exercise.index,
                        exercise.body,
                        exercise.offset,
                    ),
                })
            }
        };
        match answer.token.parse::<Rational>() {
            Ok(given) => Ok(given == expected),
            Err(err) => Err(LineDiagnostic {
                file: InputFile::Answers,
                line_number: answer.line_number,
                line: answer.line.to_owned(),
                diagnostic: errors::malformed_answer(answer.token, answer.offset, &err),
            }),
        }
    }

    fn finish(mut self) -> Grading {
        self.report.correct.sort_unstable();
        self.report.wrong.sort_unstable();
        self.diagnostics
            .sort_by_key(|d| (d.file == InputFile::Answers, d.line_number));
        Grading {
            report: self.report,
            diagnostics: self.diagnostics,
        }
    }
}

/// Grades the answers in `answers` against the exercises in `exercises`.
///
/// Exercises are re-evaluated from their text. When an index is answered more than once, the
/// first answer counts.
pub fn grade(exercises: &str, answers: &str) -> Grading {
    let mut grader = Grader::new();
    grader.read_answers(answers);
    grader.grade_exercises(exercises);
    let grading = grader.finish();
    info!(
        correct = grading.report.correct.len(),
        wrong = grading.report.wrong.len(),
        diagnostics = grading.diagnostics.len(),
        "graded answers"
    );
    grading
}

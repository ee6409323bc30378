//! Generation and grading of elementary arithmetic exercises over fractions.
//!
//! Exercises are expressions over natural numbers, proper fractions and mixed numbers, such as
//! `(3 - 1/2) ÷ 2'1/4`. Generation guarantees that no subtraction goes negative, that every
//! division yields a proper fraction, and that no two exercises in a batch differ only by
//! swapping the operands of `+` or `×`.
//!
//! ```
//! use libarith::{generate, GeneratorConfig};
//!
//! let problems = generate(&GeneratorConfig::new(5, 10).seed(1)).unwrap();
//! assert_eq!(problems.len(), 5);
//! ```

pub mod common;
#[macro_use]
pub mod diagnostics;
pub mod error;
pub use error::{Error, ParseError, Result};

mod math;
pub use math::{Rational, SAMPLE_LIMIT};

mod utils;

pub mod scanner;
pub use scanner::scan;

mod grammar;
pub use grammar::{BinaryExpr, BinaryOperator, Expr};

mod parser;
pub use parser::{
    diagnose as diagnose_parse_error, parse, parse_expression, ParseErrors, MAX_TOKENS,
};

mod emit;
pub use emit::{Emit, EmitFormat};

mod canonical;
pub use canonical::{canonical_form, canonicalize, expression_hash, CanonicalHash};

mod evaluator;
pub use evaluator::{evaluate, evaluate_str};

pub mod sample;

mod builder;
pub use builder::{
    build_complex, build_expression, build_simple, Candidate, Step, MAX_OPERATORS,
};

mod generator;
pub use generator::{
    answers_text, exercises_text, generate, generate_unique, GeneratorConfig, Problem,
    DEFAULT_MAX_OPERATORS, MAX_COUNT, MIN_COUNT,
};

mod grader;
pub use grader::{
    grade, parse_answer_line, parse_exercise_line, GradeErrors, GradeReport, Grading, InputFile,
    LineDiagnostic, NumberedLine,
};

mod proptests;

//! The arith app. For an overview of how exercises are built and graded, see
//! [libarith's documentation](libarith).

#![deny(missing_docs)]

#[macro_use]
extern crate clap;

mod diagnostics;
use diagnostics::{emit_expression_diagnostics, emit_line_diagnostics};

use libarith::diagnostics::Diagnostic;
use libarith::{
    answers_text, diagnose_parse_error, evaluate, exercises_text, generate, grade, parse,
    CanonicalHash, Emit, EmitFormat, Error, GeneratorConfig, InputFile,
};

use std::fs;
use std::path::{Path, PathBuf};

/// What arith should do.
#[derive(Clone, Debug)]
pub enum Mode {
    /// Generate exercises and their answers.
    Generate {
        /// Generation parameters.
        config: GeneratorConfig,
        /// Where the exercises are written.
        exercise_out: PathBuf,
        /// Where the answers are written.
        answer_out: PathBuf,
    },
    /// Grade an answer file against an exercise file.
    Grade {
        /// The exercise file.
        exercises: PathBuf,
        /// The answer file.
        answers: PathBuf,
        /// Where the report is written.
        grade_out: PathBuf,
    },
    /// Parse a single expression and emit it.
    ParseOnly {
        /// The expression.
        expression: String,
        /// How the parsed expression should be emitted.
        emit_format: String,
    },
    /// Explain a diagnostic code.
    Explain(String),
}

/// Options to run arith with.
#[derive(Clone, Debug)]
pub struct Opts {
    /// What to do.
    pub mode: Mode,
    /// When true, diagnostics will be colored.
    pub color: bool,
    /// Number of times `-v` was given.
    pub verbosity: u64,
}

/// Parses [Opts](self::Opts) from the command line or given a parser that acts on the clap
/// [App](clap::App).
pub fn get_opts<P>(parser: P, color: bool) -> Result<Opts, clap::Error>
where
    P: for<'a> FnOnce(clap::App<'a, '_>) -> Result<clap::ArgMatches<'a>, clap::Error>,
{
    let matches = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("bound")
                .short("r")
                .value_name("bound")
                .help("Every number in an exercise is less than the bound. Required to generate.")
                .takes_value(true)
                .allow_hyphen_values(true)
                .required_unless_one(&["exercises", "parse-only", "explain"]),
        )
        .arg(
            clap::Arg::with_name("count")
                .short("n")
                .value_name("count")
                .help("Number of exercises to generate, at most 10000.")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("10"),
        )
        .arg(
            clap::Arg::with_name("max-operators")
                .long("--max-operators")
                .value_name("k")
                .help("Most operators in one exercise, from 2 to 255.")
                .takes_value(true)
                .default_value("3"),
        )
        .arg(
            clap::Arg::with_name("seed")
                .long("--seed")
                .value_name("seed")
                .help("Seed for reproducible generation.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("exercises")
                .short("e")
                .value_name("exercise file")
                .help("Exercise file to grade. Grading takes precedence over generation.")
                .takes_value(true)
                .requires("answers"),
        )
        .arg(
            clap::Arg::with_name("answers")
                .short("a")
                .value_name("answer file")
                .help("Answer file to grade.")
                .takes_value(true)
                .requires("exercises"),
        )
        .arg(
            clap::Arg::with_name("exercise-out")
                .long("--exercise-out")
                .value_name("path")
                .help("Where generated exercises are written.")
                .takes_value(true)
                .default_value("Exercises.txt"),
        )
        .arg(
            clap::Arg::with_name("answer-out")
                .long("--answer-out")
                .value_name("path")
                .help("Where generated answers are written.")
                .takes_value(true)
                .default_value("Answers.txt"),
        )
        .arg(
            clap::Arg::with_name("grade-out")
                .long("--grade-out")
                .value_name("path")
                .help("Where the grade report is written.")
                .takes_value(true)
                .default_value("Grade.txt"),
        )
        .arg(
            clap::Arg::with_name("parse-only")
                .long("--parse-only")
                .value_name("expression")
                .help("Parse an expression and emit it.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("output-form")
                .short("-o")
                .long("--output-form")
                .next_line_help(true)
                .help(
                    "Emit format for --parse-only. Possible values:\n\
                    \tpretty:       Exercise text, like \"1 + 2 × 3\".\n\
                    \tcanonical:    Deduplication key, like \"(1) + ((2) × (3))\".\n\
                    \ts-expression: Prefixed s-expression, like \"(+ 1 (× 2 3))\".\n\
                    \tdebug:        Opaque internal representation. Note: this format is not stable.\n\
                    ",
                )
                .hide_possible_values(true)
                .default_value("pretty")
                .takes_value(true)
                .possible_values(&["pretty", "canonical", "s-expression", "debug"]),
        )
        .arg(
            clap::Arg::with_name("explain")
                .long("--explain")
                .value_name("diagnostic")
                .help("Provide a detailed explanation for a diagnostic code.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more detail."),
        );
    let matches = parser(matches)?;

    let path = |name: &str| PathBuf::from(matches.value_of(name).unwrap_or_default());
    let mode = if let Some(code) = matches.value_of("explain") {
        Mode::Explain(code.to_owned())
    } else if let (Some(exercises), Some(answers)) =
        (matches.value_of("exercises"), matches.value_of("answers"))
    {
        Mode::Grade {
            exercises: exercises.into(),
            answers: answers.into(),
            grade_out: path("grade-out"),
        }
    } else if let Some(expression) = matches.value_of("parse-only") {
        Mode::ParseOnly {
            expression: expression.to_owned(),
            emit_format: matches.value_of("output-form").unwrap_or("pretty").to_owned(),
        }
    } else {
        let bound = value_t!(matches, "bound", i64)?;
        let count = value_t!(matches, "count", i64)?;
        let max_operators = value_t!(matches, "max-operators", usize)?;
        let mut config = GeneratorConfig::new(count, bound).max_operators(max_operators);
        if matches.is_present("seed") {
            config = config.seed(value_t!(matches, "seed", u64)?);
        }
        Mode::Generate {
            config,
            exercise_out: path("exercise-out"),
            answer_out: path("answer-out"),
        }
    };

    Ok(Opts {
        mode,
        color,
        verbosity: matches.occurrences_of("verbose"),
    })
}

/// Output of an arith execution.
#[derive(Default, Debug)]
pub struct ArithResult {
    /// Exit code
    pub code: i32,
    /// Emit for stdout
    pub stdout: String,
    /// Emit for stderr
    pub stderr: String,
    /// Whether the stdout should be emit as paged
    pub page: bool,
}

/// Builds an [ArithResult](self::ArithResult).
#[derive(Default)]
struct ArithResultBuilder {
    color: bool,
    stdout: String,
    stderr: String,
    page: bool,
}

impl ArithResultBuilder {
    fn new(color: bool) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    fn out(&mut self, line: impl AsRef<str>) {
        self.stdout.push_str(line.as_ref());
        self.stdout.push('\n');
    }

    fn err(&mut self, diagnostics: impl AsRef<str>) {
        self.stderr.push_str(diagnostics.as_ref());
    }

    fn page(&mut self, page: bool) {
        self.page = page;
    }

    fn ok(self) -> ArithResult {
        ArithResult {
            code: 0,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }

    fn failed(self) -> ArithResult {
        ArithResult {
            code: 1,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }

    /// Fails with a one-line error message.
    fn fatal(mut self, err: &Error) -> ArithResult {
        self.stderr.push_str(&format!("error: {}\n", err));
        self.failed()
    }
}

/// Runs arith end-to-end.
pub fn run_arith(opts: Opts) -> ArithResult {
    let mut result = ArithResultBuilder::new(opts.color);
    match opts.mode {
        Mode::Explain(code) => explain(result, &code),
        Mode::Generate {
            config,
            exercise_out,
            answer_out,
        } => {
            let problems = match generate(&config) {
                Ok(problems) => problems,
                Err(err) => return result.fatal(&err),
            };
            if let Err(err) = write(&exercise_out, &exercises_text(&problems))
                .and_then(|_| write(&answer_out, &answers_text(&problems)))
            {
                return result.fatal(&err);
            }
            result.out(format!(
                "Generated {} exercises in {}, with answers in {}",
                problems.len(),
                exercise_out.display(),
                answer_out.display()
            ));
            result.ok()
        }
        Mode::Grade {
            exercises,
            answers,
            grade_out,
        } => {
            let (exercise_text, answer_text) = match read(&exercises).and_then(|e| {
                let a = read(&answers)?;
                Ok((e, a))
            }) {
                Ok(texts) => texts,
                Err(err) => return result.fatal(&err),
            };
            let grading = grade(&exercise_text, &answer_text);
            let exercises_origin = exercises.display().to_string();
            let answers_origin = answers.display().to_string();
            let origin = |file: InputFile| match file {
                InputFile::Exercises => exercises_origin.as_str(),
                InputFile::Answers => answers_origin.as_str(),
            };
            let color = result.color;
            result.err(emit_line_diagnostics(origin, &grading.diagnostics, color));
            if let Err(err) = write(&grade_out, &grading.report.to_string()) {
                return result.fatal(&err);
            }
            result.out(format!("Graded answers; report written to {}", grade_out.display()));
            result.ok()
        }
        Mode::ParseOnly {
            expression,
            emit_format,
        } => parse_only(result, &expression, &emit_format),
    }
}

fn explain(mut result: ArithResultBuilder, code: &str) -> ArithResult {
    let codes = Diagnostic::all_codes_with_explanations();
    match codes.get(code) {
        Some(explanation) => {
            result.stdout.push_str(explanation);
            result.page(true);
            result.ok()
        }
        None => {
            result.err(format!("{} is not a diagnostic code\n", code));
            result.failed()
        }
    }
}

fn parse_only(mut result: ArithResultBuilder, expression: &str, emit_format: &str) -> ArithResult {
    let emit_format: EmitFormat = match emit_format.parse() {
        Ok(format) => format,
        Err(msg) => {
            result.err(format!("error: {}\n", msg));
            return result.failed();
        }
    };
    let expr = match parse(expression) {
        Ok(expr) => expr,
        Err(err) => {
            match diagnose_parse_error(&err) {
                Some(diagnostic) => {
                    let color = result.color;
                    result.err(emit_expression_diagnostics(expression, &[diagnostic], color))
                }
                None => result.err(format!("error: {}\n", err)),
            }
            return result.failed();
        }
    };

    result.out(expr.emit(emit_format));
    if emit_format == EmitFormat::Canonical {
        match evaluate(&expr) {
            Ok(value) => result.out(format!("value: {}", value)),
            Err(err) => return result.fatal(&err),
        }
        result.out(format!("hash: {}", CanonicalHash::of(&expr)));
    }
    result.ok()
}

fn read(path: &Path) -> Result<String, Error> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), Error> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(args: &[&str]) -> Result<Opts, clap::Error> {
        let args = std::iter::once("arith").chain(args.iter().copied());
        get_opts(|app| app.get_matches_from_safe(args), false)
    }

    fn run(args: &[&str]) -> ArithResult {
        run_arith(opts(args).unwrap())
    }

    #[test]
    fn generation_requires_a_bound() {
        let err = opts(&["-n", "5"]).unwrap_err();
        assert_eq!(err.kind, clap::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn generation_rejects_non_numeric_values() {
        let err = opts(&["-r", "ten"]).unwrap_err();
        assert_eq!(err.kind, clap::ErrorKind::ValueValidation);
        let err = opts(&["-r", "10", "--seed", "four"]).unwrap_err();
        assert_eq!(err.kind, clap::ErrorKind::ValueValidation);
    }

    #[test]
    fn generation_options() {
        match opts(&["-r", "10", "-n", "20", "--seed", "4", "--max-operators", "2"])
            .unwrap()
            .mode
        {
            Mode::Generate {
                config,
                exercise_out,
                answer_out,
            } => {
                assert_eq!(config, GeneratorConfig::new(20, 10).max_operators(2).seed(4));
                assert_eq!(exercise_out, PathBuf::from("Exercises.txt"));
                assert_eq!(answer_out, PathBuf::from("Answers.txt"));
            }
            mode => panic!("unexpected mode {:?}", mode),
        }
    }

    #[test]
    fn grading_takes_precedence() {
        let mode = opts(&["-r", "10", "-e", "e.txt", "-a", "a.txt"]).unwrap().mode;
        assert!(matches!(mode, Mode::Grade { .. }));
    }

    #[test]
    fn grading_needs_both_files() {
        assert!(opts(&["-e", "e.txt"]).is_err());
    }

    #[test]
    fn verbosity() {
        assert_eq!(opts(&["-r", "5", "-vv"]).unwrap().verbosity, 2);
    }

    #[test]
    fn non_numeric_bound_is_a_usage_error() {
        assert!(opts(&["-r", "ten"]).is_err());
    }

    #[test]
    fn invalid_count_fails_before_writing() {
        let dir = std::env::temp_dir().join(format!("arith-count-{}", std::process::id()));
        let exercises = dir.join("Exercises.txt");
        let result = run(&[
            "-r",
            "10",
            "-n",
            "0",
            "--exercise-out",
            exercises.to_str().unwrap(),
        ]);
        assert_eq!(result.code, 1);
        assert!(result.stderr.contains("count"), "{}", result.stderr);
        assert!(!exercises.exists());
    }

    #[test]
    fn invalid_bound() {
        let result = run(&["-r", "-3"]);
        assert_eq!(result.code, 1);
        assert!(result.stderr.contains("bound"), "{}", result.stderr);
    }

    #[test]
    fn missing_exercise_file() {
        let result = run(&["-e", "/nonexistent/Exercises.txt", "-a", "/nonexistent/Answers.txt"]);
        assert_eq!(result.code, 1);
        assert!(result.stderr.contains("does not exist"), "{}", result.stderr);
    }

    #[test]
    fn parse_only_emits() {
        let result = run(&["--parse-only", "2 + 1", "-o", "s-expression"]);
        assert_eq!((result.code, result.stdout.as_str()), (0, "(+ 2 1)\n"));

        let result = run(&["--parse-only", "2 + 1", "-o", "canonical"]);
        assert_eq!(result.code, 0);
        assert!(result.stdout.starts_with("(1) + (2)\nvalue: 3\nhash: "));
    }

    #[test]
    fn parse_only_reports_diagnostics() {
        let result = run(&["--parse-only", "1 + (2"]);
        assert_eq!(result.code, 1);
        assert!(result.stderr.contains("error[P0003]"), "{}", result.stderr);
    }

    #[test]
    fn explain() {
        let result = run(&["--explain", "G0005"]);
        assert_eq!(result.code, 0);
        assert!(result.page);
        assert!(result.stdout.contains("first is graded"));

        let result = run(&["--explain", "X0000"]);
        assert_eq!(result.code, 1);
    }
}

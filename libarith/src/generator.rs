//! Generation of batches of distinct exercises.

use crate::builder::{build_expression, Candidate, MAX_OPERATORS};
use crate::canonical::expression_hash;
use crate::error::{Error, Result};
use crate::math::Rational;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use tracing::{info, trace};

pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 10000;
pub const DEFAULT_MAX_OPERATORS: usize = 3;
/// Candidates built per requested exercise before generation gives up.
pub const ATTEMPTS_PER_PROBLEM: usize = 20;

/// Parameters of a generation run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GeneratorConfig {
    /// Number of exercises requested.
    pub count: i64,
    /// Every operand is strictly less than the bound.
    pub bound: i64,
    /// Most operators in one exercise, in `[2, MAX_OPERATORS]`.
    pub max_operators: usize,
    /// Seed for a reproducible run. Runs without one draw a seed from the operating system.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(count: i64, bound: i64) -> Self {
        Self {
            count,
            bound,
            max_operators: DEFAULT_MAX_OPERATORS,
            seed: None,
        }
    }

    pub fn max_operators(mut self, max_operators: usize) -> Self {
        self.max_operators = max_operators.clamp(2, MAX_OPERATORS);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_COUNT..=MAX_COUNT).contains(&self.count) {
            return Err(Error::InvalidCount {
                count: self.count,
                min: MIN_COUNT,
                max: MAX_COUNT,
            });
        }
        if self.bound < 1 {
            return Err(Error::InvalidBound { bound: self.bound });
        }
        Ok(())
    }

    /// The random source for a run with this configuration.
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}

/// A generated exercise.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Problem {
    /// 1-based position in the batch.
    pub index: usize,
    pub expression: String,
    pub answer: Rational,
}

impl Problem {
    /// `"<index>. <expression> ="`
    pub fn exercise_line(&self) -> String {
        format!("{}. {} =", self.index, self.expression)
    }

    /// `"<index>. <answer>"`
    pub fn answer_line(&self) -> String {
        format!("{}. {}", self.index, self.answer)
    }
}

/// Builds up to `count` expressions, no two of which have the same canonical form.
///
/// At most `count * ATTEMPTS_PER_PROBLEM` candidates are built; when the bound leaves too few
/// distinct expressions, fewer than `count` are returned.
pub fn generate_unique<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bound: i64,
    max_operators: usize,
) -> Vec<Candidate> {
    let mut accepted = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    let max_attempts = count.saturating_mul(ATTEMPTS_PER_PROBLEM);
    let mut attempts = 0;

    while accepted.len() < count && attempts < max_attempts {
        attempts += 1;
        let candidate = build_expression(rng, bound, max_operators);
        let hash = match expression_hash(&candidate.text) {
            Ok(hash) => hash,
            Err(err) => {
                trace!(text = %candidate.text, %err, "unparseable candidate");
                continue;
            }
        };
        if seen.insert(hash) {
            accepted.push(candidate);
        } else {
            trace!(text = %candidate.text, %hash, "duplicate");
        }
    }

    if accepted.len() < count {
        info!(
            requested = count,
            generated = accepted.len(),
            attempts,
            "attempt budget exhausted"
        );
    }
    accepted
}

/// Generates a batch of distinct exercises with their answers.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<Problem>> {
    config.validate()?;
    let mut rng = config.rng();
    // count is within [MIN_COUNT, MAX_COUNT] after validation.
    let count = config.count as usize;
    let problems: Vec<_> = generate_unique(&mut rng, count, config.bound, config.max_operators)
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| Problem {
            index: i + 1,
            expression: candidate.text,
            answer: candidate.value,
        })
        .collect();
    info!(
        count = problems.len(),
        bound = config.bound,
        seed = ?config.seed,
        "generated exercises"
    );
    Ok(problems)
}

/// The contents of an exercise file.
pub fn exercises_text(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(Problem::exercise_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The contents of an answer file.
pub fn answers_text(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(Problem::answer_line)
        .collect::<Vec<_>>()
        .join("\n")
}

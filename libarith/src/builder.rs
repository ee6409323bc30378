//! Random construction of exercise expressions.
//!
//! Expressions are built left to right as text, while the value of the text built so far (the
//! running value) is tracked exactly. Each step is checked against the running value before it
//! is taken, so no subtraction goes negative and every division yields a proper fraction.

use crate::error::Result;
use crate::evaluator::evaluate_str;
use crate::grammar::BinaryOperator;
use crate::math::Rational;
use crate::parser::MAX_TOKENS;
use crate::sample::{
    sample_operand, sample_operator, valid_division, valid_step, valid_subtraction,
};

use num_traits::Zero;
use rand::Rng;
use tracing::debug;

/// Operands drawn for one step before its operator degrades to `+`.
pub const MAX_OPERAND_ATTEMPTS: usize = 50;
/// Candidates built for one exercise before falling back to a plain sum.
pub const MAX_CANDIDATE_ATTEMPTS: usize = 50;
/// Chance of choosing the two-operand strategy.
pub const SIMPLE_PROBABILITY: f64 = 0.4;
/// Chance of parenthesizing the running text where it does not change the value.
pub const OPTIONAL_PAREN_PROBABILITY: f64 = 0.3;
/// Most operators in one expression. A step adds at most four tokens (an operator, an operand
/// and a pair of parentheses), so built text never exceeds [MAX_TOKENS].
pub const MAX_OPERATORS: usize = (MAX_TOKENS - 1) / 4;

/// One construction step: `running op operand`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Step {
    /// Value of the expression before this step.
    pub running: Rational,
    pub op: BinaryOperator,
    pub operand: Rational,
}

/// A built expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Candidate {
    /// The exercise text.
    pub text: String,
    /// The value of `text`.
    pub value: Rational,
    /// Every step taken, in order.
    pub steps: Vec<Step>,
    /// Whether the text evaluates to `value` and `value` is non-negative. Invalid candidates are
    /// never handed out by [build_expression].
    pub valid: bool,
}

/// An expression under construction.
struct Draft {
    text: String,
    /// Operator at the top level of `text`, if `text` is not a single number.
    top: Option<BinaryOperator>,
    value: Rational,
    steps: Vec<Step>,
}

impl Draft {
    fn new(first: Rational) -> Self {
        Self {
            text: first.to_string(),
            top: None,
            value: first,
            steps: Vec::with_capacity(4),
        }
    }

    /// Appends `op operand`, first wrapping the running text in parentheses if `parenthesize`.
    fn push(&mut self, op: BinaryOperator, operand: Rational, parenthesize: bool) -> Result<()> {
        let value = op.apply(self.value, operand)?;
        self.steps.push(Step {
            running: self.value,
            op,
            operand,
        });
        self.text = if parenthesize {
            format!("({}) {} {}", self.text, op, operand)
        } else {
            format!("{} {} {}", self.text, op, operand)
        };
        self.top = Some(op);
        self.value = value;
        Ok(())
    }

    /// Whether the running text needs parentheses before `op` is appended, so that it is
    /// evaluated as one unit.
    fn requires_parens(&self, op: BinaryOperator) -> bool {
        match op {
            BinaryOperator::Minus | BinaryOperator::Div => true,
            BinaryOperator::Mult => matches!(
                self.top,
                Some(BinaryOperator::Plus) | Some(BinaryOperator::Minus)
            ),
            BinaryOperator::Plus => false,
        }
    }

    fn finish(self) -> Candidate {
        let valid = match evaluate_str(&self.text) {
            Ok(value) => value == self.value && !value.is_negative(),
            Err(_) => false,
        };
        self.into_candidate(valid)
    }

    fn into_candidate(self, valid: bool) -> Candidate {
        Candidate {
            text: self.text,
            value: self.value,
            steps: self.steps,
            valid,
        }
    }
}

/// Builds `a op b` from two sampled operands.
///
/// A `-` whose result would be negative swaps its operands. A `÷` that is not a proper fraction
/// tries the swapped order, and failing that becomes `×`.
pub fn build_simple<R: Rng + ?Sized>(rng: &mut R, bound: i64) -> Candidate {
    let mut lhs = sample_operand(rng, bound);
    let mut rhs = sample_operand(rng, bound);
    let mut op = sample_operator(rng);

    match op {
        BinaryOperator::Minus => {
            if !valid_subtraction(lhs, rhs) {
                std::mem::swap(&mut lhs, &mut rhs);
            }
            if !valid_subtraction(lhs, rhs) {
                op = BinaryOperator::Plus;
            }
        }
        BinaryOperator::Div => {
            if !valid_division(lhs, rhs) {
                if valid_division(rhs, lhs) {
                    std::mem::swap(&mut lhs, &mut rhs);
                } else {
                    op = BinaryOperator::Mult;
                }
            }
        }
        BinaryOperator::Plus | BinaryOperator::Mult => {}
    }

    let mut draft = Draft::new(lhs);
    match draft.push(op, rhs, false) {
        Ok(()) => draft.finish(),
        Err(_) => draft.into_candidate(false),
    }
}

/// Builds an expression of 2 to `max_operators` operators by repeatedly extending a running
/// expression. `max_operators` is clamped to `[2, MAX_OPERATORS]`.
///
/// Each step draws an operator, then up to [MAX_OPERAND_ATTEMPTS] operands until one is valid
/// against the running value; if none is, the operator degrades to `+`.
pub fn build_complex<R: Rng + ?Sized>(rng: &mut R, bound: i64, max_operators: usize) -> Candidate {
    let operators = rng.gen_range(2..=max_operators.clamp(2, MAX_OPERATORS));
    let mut draft = Draft::new(sample_operand(rng, bound));

    for _ in 0..operators {
        let mut op = sample_operator(rng);
        let mut operand = sample_operand(rng, bound);
        let mut attempts = 1;
        while !valid_step(draft.value, op, operand) {
            if attempts == MAX_OPERAND_ATTEMPTS {
                debug!(%op, running = %draft.value, "no valid operand found; using +");
                op = BinaryOperator::Plus;
                break;
            }
            operand = sample_operand(rng, bound);
            attempts += 1;
        }

        let parenthesize = draft.requires_parens(op) || rng.gen_bool(OPTIONAL_PAREN_PROBABILITY);
        if let Err(err) = draft.push(op, operand, parenthesize) {
            debug!(%err, text = %draft.text, "abandoning candidate");
            return draft.into_candidate(false);
        }
    }

    draft.finish()
}

/// Builds a valid expression, choosing a strategy at random for each attempt.
///
/// After [MAX_CANDIDATE_ATTEMPTS] invalid candidates, falls back to the sum of two operands.
pub fn build_expression<R: Rng + ?Sized>(
    rng: &mut R,
    bound: i64,
    max_operators: usize,
) -> Candidate {
    for _ in 0..MAX_CANDIDATE_ATTEMPTS {
        let candidate = if rng.gen_bool(SIMPLE_PROBABILITY) {
            build_simple(rng, bound)
        } else {
            build_complex(rng, bound, max_operators)
        };
        if candidate.valid {
            return candidate;
        }
    }

    debug!(bound, "no valid candidate found; falling back to a sum");
    let lhs = sample_operand(rng, bound);
    let rhs = sample_operand(rng, bound);
    let mut draft = Draft::new(lhs);
    if draft.push(BinaryOperator::Plus, rhs, false).is_err() {
        draft = Draft::new(lhs);
        // lhs + 0 is lhs.
        draft.push(BinaryOperator::Plus, Rational::zero(), false).ok();
    }
    draft.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use num_traits::One;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn check_steps(candidate: &Candidate) {
        for step in &candidate.steps {
            assert!(
                valid_step(step.running, step.op, step.operand),
                "invalid step {:?} in {}",
                step,
                candidate.text
            );
            if step.op == BinaryOperator::Div {
                let quotient = step.op.apply(step.running, step.operand).unwrap();
                assert!(quotient > Rational::zero() && quotient < Rational::one());
            }
        }
    }

    #[test]
    fn simple_candidates_are_valid() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..500 {
            let candidate = build_simple(&mut rng, 10);
            assert!(candidate.valid, "{}", candidate.text);
            assert_eq!(candidate.steps.len(), 1);
            check_steps(&candidate);
        }
    }

    #[test]
    fn complex_candidates_follow_their_steps() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..500 {
            let candidate = build_complex(&mut rng, 10, 3);
            let operators = candidate.steps.len();
            assert!((2..=3).contains(&operators), "{}", candidate.text);
            assert_eq!(parse(&candidate.text).unwrap().operator_count(), operators);
            assert_eq!(evaluate_str(&candidate.text).unwrap(), candidate.value);
            check_steps(&candidate);
        }
    }

    #[test]
    fn multiplication_after_sum_is_grouped() {
        let mut draft = Draft::new(Rational::from_integer(1));
        draft.push(BinaryOperator::Plus, Rational::from_integer(2), false).unwrap();
        assert!(draft.requires_parens(BinaryOperator::Mult));
        draft.push(BinaryOperator::Mult, Rational::from_integer(3), true).unwrap();
        assert_eq!(draft.text, "(1 + 2) × 3");
        assert!(!draft.requires_parens(BinaryOperator::Mult));
        assert!(!draft.requires_parens(BinaryOperator::Plus));
        assert!(draft.requires_parens(BinaryOperator::Div));
        let candidate = draft.finish();
        assert!(candidate.valid);
        assert_eq!(candidate.value, Rational::from_integer(9));
    }

    #[test]
    fn built_expressions_are_valid() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..500 {
            let candidate = build_expression(&mut rng, 10, 3);
            assert!(candidate.valid);
            assert!(!candidate.value.is_negative());
            let operators = candidate.steps.len();
            assert!((1..=3).contains(&operators), "{}", candidate.text);
            check_steps(&candidate);
        }
    }

    #[test]
    fn smallest_bound() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        for _ in 0..100 {
            let candidate = build_expression(&mut rng, 1, 3);
            assert!(candidate.valid, "{}", candidate.text);
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let build = || {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            (0..20)
                .map(|_| build_expression(&mut rng, 10, 3).text)
                .collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn operator_count_is_capped() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..5 {
            let candidate = build_complex(&mut rng, 10, usize::MAX);
            assert!(candidate.steps.len() <= MAX_OPERATORS);
            let expr = parse(&candidate.text).unwrap();
            assert_eq!(expr.operator_count(), candidate.steps.len());
        }
    }
}

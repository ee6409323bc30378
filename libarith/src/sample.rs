//! Random operands and operators, and the constraints steps of an exercise must satisfy.

use crate::grammar::BinaryOperator;
use crate::math::{Rational, SAMPLE_LIMIT};

use num_traits::{CheckedDiv, One, Zero};
use rand::seq::SliceRandom;
use rand::Rng;

/// Whether `lhs - rhs` stays non-negative.
pub fn valid_subtraction(lhs: Rational, rhs: Rational) -> bool {
    lhs >= rhs
}

/// Whether `lhs ÷ rhs` is a proper fraction, strictly between 0 and 1.
pub fn valid_division(lhs: Rational, rhs: Rational) -> bool {
    if rhs.is_zero() {
        return false;
    }
    match lhs.checked_div(&rhs) {
        Some(quotient) => quotient > Rational::zero() && quotient < Rational::one(),
        None => false,
    }
}

/// Whether `lhs op rhs` may appear as a step of an exercise. `+` and `×` are always allowed.
pub fn valid_step(lhs: Rational, op: BinaryOperator, rhs: Rational) -> bool {
    match op {
        BinaryOperator::Minus => valid_subtraction(lhs, rhs),
        BinaryOperator::Div => valid_division(lhs, rhs),
        BinaryOperator::Plus | BinaryOperator::Mult => true,
    }
}

/// Draws an operand below `bound`: with equal probability a natural number in `[0, bound - 1]`,
/// a [proper fraction](Rational::proper_fraction) or a [mixed number](Rational::mixed_number).
///
/// Mixed numbers need `bound > 2`; below that they degrade to proper fractions.
pub fn sample_operand<R: Rng + ?Sized>(rng: &mut R, bound: i64) -> Rational {
    let bound = bound.max(1).min(SAMPLE_LIMIT);
    match rng.gen_range(0..3) {
        0 => Rational::from_integer(rng.gen_range(0..bound)),
        1 => Rational::proper_fraction(rng, bound),
        _ => Rational::mixed_number(rng, bound),
    }
}

/// Draws one of the four operators uniformly.
pub fn sample_operator<R: Rng + ?Sized>(rng: &mut R) -> BinaryOperator {
    *BinaryOperator::ALL
        .choose(rng)
        .unwrap_or(&BinaryOperator::Plus)
}

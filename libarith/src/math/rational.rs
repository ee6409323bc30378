use super::gcd;
use crate::error::ParseError;

use core::cmp::Ordering;
use core::convert::TryFrom;
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use core::str::FromStr;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Zero};
use rand::Rng;

/// Largest bound the random samplers honor. Larger bounds are treated as this one, which keeps
/// every sampled mixed number representable.
pub const SAMPLE_LIMIT: i64 = 1 << 31;

/// An exact fraction `num / den`.
///
/// A `Rational` is always held in lowest terms with a positive denominator, so two equal values
/// always have equal representations and the derived `Eq` and `Hash` are value equality.
///
/// The canonical text form ([Display](fmt::Display)) is one of
///
/// - `n`, for integers,
/// - `a/b`, for values whose magnitude is below one,
/// - `w'a/b`, for mixed numbers greater than one,
///
/// prefixed with `-` for negative values. [FromStr] reads all three forms back.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rational {
    num: i64,
    den: i64,
}

impl Rational {
    /// Creates `num / den` in lowest terms. Returns [None](Option::None) when `den` is zero or the
    /// reduced fraction does not fit.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        Self::from_wide(num.into(), den.into())
    }

    /// Promotes an integer to a fraction.
    pub const fn from_integer(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    pub fn numer(&self) -> i64 {
        self.num
    }

    pub fn denom(&self) -> i64 {
        self.den
    }

    pub fn is_integer(&self) -> bool {
        self.den == 1
    }

    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    /// Draws a proper fraction in (0, 1): a denominator uniformly in `[2, max_exclusive - 1]`,
    /// then a numerator uniformly in `[1, denominator - 1]`.
    ///
    /// When that denominator range is empty (`max_exclusive <= 2`) the result is `1/2`.
    pub fn proper_fraction<R: Rng + ?Sized>(rng: &mut R, max_exclusive: i64) -> Self {
        let max_exclusive = max_exclusive.min(SAMPLE_LIMIT);
        if max_exclusive <= 2 {
            return Self { num: 1, den: 2 };
        }
        let den = rng.gen_range(2..max_exclusive);
        let num = rng.gen_range(1..den);
        Self::reduce(num, den)
    }

    /// Draws a mixed number greater than one: a whole part uniformly in `[1, max_exclusive - 2]`
    /// plus an independently drawn [proper fraction](Self::proper_fraction).
    ///
    /// Degrades to a proper fraction when `max_exclusive <= 2`.
    pub fn mixed_number<R: Rng + ?Sized>(rng: &mut R, max_exclusive: i64) -> Self {
        let max_exclusive = max_exclusive.min(SAMPLE_LIMIT);
        if max_exclusive <= 2 {
            return Self::proper_fraction(rng, max_exclusive);
        }
        let whole = rng.gen_range(1..max_exclusive - 1);
        let Self { num, den } = Self::proper_fraction(rng, max_exclusive);
        Self::reduce(whole * den + num, den)
    }

    /// Reduces `num / den`, where `den > 0`.
    fn reduce(num: i64, den: i64) -> Self {
        debug_assert!(den > 0);
        // g <= den <= i64::MAX
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
        Self {
            num: num / g,
            den: den / g,
        }
    }

    /// Reduces a fraction computed in double width, normalizing the sign of the denominator.
    fn from_wide(num: i128, den: i128) -> Option<Self> {
        debug_assert!(den != 0);
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i128;
        Some(Self {
            num: i64::try_from(num / g).ok()?,
            den: i64::try_from(den / g).ok()?,
        })
    }

    fn widen(&self, other: &Self) -> (i128, i128, i128, i128) {
        (
            self.num.into(),
            self.den.into(),
            other.num.into(),
            other.den.into(),
        )
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl CheckedAdd for Rational {
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let (a, b, c, d) = self.widen(rhs);
        Self::from_wide(a * d + c * b, b * d)
    }
}

impl CheckedSub for Rational {
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        let (a, b, c, d) = self.widen(rhs);
        Self::from_wide(a * d - c * b, b * d)
    }
}

impl CheckedMul for Rational {
    fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let (a, b, c, d) = self.widen(rhs);
        Self::from_wide(a * c, b * d)
    }
}

impl CheckedDiv for Rational {
    /// Returns [None](Option::None) on division by zero as well as on overflow.
    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.num == 0 {
            return None;
        }
        let (a, b, c, d) = self.widen(rhs);
        Self::from_wide(a * d, b * c)
    }
}

// The operator impls panic like the primitive integer operators do. Anything evaluating
// untrusted input goes through the checked variants.
macro_rules! panicking_op {
    ($($trait:ident $method:ident via $checked:ident, $msg:expr)*) => {$(
        impl $trait for Rational {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                match self.$checked(&rhs) {
                    Some(result) => result,
                    None => panic!($msg),
                }
            }
        }
    )*};
}

panicking_op! {
    Add add via checked_add, "attempt to add with overflow"
    Sub sub via checked_sub, "attempt to subtract with overflow"
    Mul mul via checked_mul, "attempt to multiply with overflow"
    Div div via checked_div, "attempt to divide by zero or with overflow"
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.num == 0
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::from_integer(1)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying preserves order.
        let (a, b, c, d) = self.widen(other);
        (a * d).cmp(&(c * b))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num < 0 {
            f.write_str("-")?;
        }
        let num = self.num.unsigned_abs();
        let den = self.den.unsigned_abs();
        if den == 1 {
            write!(f, "{}", num)
        } else if num > den {
            write!(f, "{}'{}/{}", num / den, num % den, den)
        } else {
            write!(f, "{}/{}", num, den)
        }
    }
}

impl FromStr for Rational {
    type Err = ParseError;

    /// Reads `n`, `a/b` or `w'a/b`, optionally prefixed with `-`. Surrounding whitespace is
    /// ignored; fractions need not be in lowest terms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(ParseError::EmptyNumber);
        }
        let malformed = || ParseError::MalformedNumber(token.to_owned());

        let (negative, magnitude) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (whole, fraction) = match magnitude.split_once('\'') {
            Some((whole, fraction)) => (Some(natural(whole).ok_or_else(malformed)?), fraction),
            None => (None, magnitude),
        };
        let (num, den) = match (fraction.split_once('/'), whole) {
            (Some((num, den)), _) => (
                natural(num).ok_or_else(malformed)?,
                natural(den).ok_or_else(malformed)?,
            ),
            (None, None) => (natural(fraction).ok_or_else(malformed)?, 1),
            // `w'` must be followed by a fraction.
            (None, Some(_)) => return Err(malformed()),
        };
        if den == 0 {
            return Err(ParseError::ZeroDenominator(token.to_owned()));
        }

        let num = i128::from(whole.unwrap_or(0)) * i128::from(den) + i128::from(num);
        let num = if negative { -num } else { num };
        Self::from_wide(num, den.into()).ok_or_else(malformed)
    }
}

/// Reads a non-empty run of ASCII digits.
fn natural(s: &str) -> Option<i64> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

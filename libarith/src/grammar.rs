//! The expression tree shared by the builder, parser, canonicalizer and evaluator.

use crate::error::{Error, Result};
use crate::math::Rational;
use crate::scanner::TokenType;

use core::convert::TryFrom;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

/// An expression over rational operands. Each node owns its children exclusively.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// A number leaf.
    Num(Rational),
    BinaryExpr(BinaryExpr),
}

impl Expr {
    /// Creates `lhs op rhs`.
    pub fn binary<L, R>(op: BinaryOperator, lhs: L, rhs: R) -> Self
    where
        L: Into<Expr>,
        R: Into<Expr>,
    {
        Self::BinaryExpr(BinaryExpr {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        })
    }

    /// Number of operators in the expression.
    pub fn operator_count(&self) -> usize {
        match self {
            Self::Num(_) => 0,
            Self::BinaryExpr(BinaryExpr { lhs, rhs, .. }) => {
                1 + lhs.operator_count() + rhs.operator_count()
            }
        }
    }

    /// The operator at the root of the expression, if any.
    pub fn root_operator(&self) -> Option<BinaryOperator> {
        match self {
            Self::Num(_) => None,
            Self::BinaryExpr(BinaryExpr { op, .. }) => Some(*op),
        }
    }
}

impl From<Rational> for Expr {
    fn from(num: Rational) -> Self {
        Self::Num(num)
    }
}

impl From<BinaryExpr> for Expr {
    fn from(binary_expr: BinaryExpr) -> Self {
        Self::BinaryExpr(binary_expr)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BinaryExpr {
    pub op: BinaryOperator,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub enum BinaryOperator {
    // Discriminant values encode precedence; see `precedence`.
    Plus = 1,
    Minus = 2,
    Mult = 10,
    Div = 11,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 4] = [Self::Plus, Self::Minus, Self::Mult, Self::Div];

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        self as u8 / 10
    }

    /// Whether the operands may be swapped without changing the value.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Plus | Self::Mult)
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mult => '×',
            Self::Div => '÷',
        }
    }

    /// Applies the operator with exact arithmetic.
    pub fn apply(self, lhs: Rational, rhs: Rational) -> Result<Rational> {
        match self {
            Self::Plus => lhs.checked_add(&rhs).ok_or(Error::Overflow),
            Self::Minus => lhs.checked_sub(&rhs).ok_or(Error::Overflow),
            Self::Mult => lhs.checked_mul(&rhs).ok_or(Error::Overflow),
            Self::Div if rhs.is_zero() => Err(Error::DivisionByZero),
            Self::Div => lhs.checked_div(&rhs).ok_or(Error::Overflow),
        }
    }
}

impl TryFrom<&TokenType> for BinaryOperator {
    type Error = ();

    fn try_from(ty: &TokenType) -> core::result::Result<Self, Self::Error> {
        use BinaryOperator::*;
        match ty {
            TokenType::Plus => Ok(Plus),
            TokenType::Minus => Ok(Minus),
            TokenType::Mult => Ok(Mult),
            TokenType::Div => Ok(Div),
            _ => Err(()),
        }
    }
}

impl core::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence() {
        use BinaryOperator::*;
        assert_eq!(Plus.precedence(), Minus.precedence());
        assert_eq!(Mult.precedence(), Div.precedence());
        assert!(Mult.precedence() > Plus.precedence());
    }

    #[test]
    fn apply_reports_division_by_zero() {
        let one = Rational::from_integer(1);
        assert!(matches!(
            BinaryOperator::Div.apply(one, Rational::zero()),
            Err(Error::DivisionByZero)
        ));
    }

    #[test]
    fn apply_reports_overflow() {
        let huge = Rational::from_integer(i64::MAX);
        assert!(matches!(
            BinaryOperator::Plus.apply(huge, huge),
            Err(Error::Overflow)
        ));
    }

    #[test]
    fn operator_count() {
        let one = Rational::from_integer(1);
        let expr = Expr::binary(
            BinaryOperator::Plus,
            Expr::binary(BinaryOperator::Mult, one, one),
            one,
        );
        assert_eq!(expr.operator_count(), 2);
        assert_eq!(expr.root_operator(), Some(BinaryOperator::Plus));
    }
}

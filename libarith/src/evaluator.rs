//! Exact evaluation of expression trees.

use crate::error::Result;
use crate::grammar::{BinaryExpr, Expr};
use crate::math::Rational;
use crate::parser::parse;

/// Evaluates an expression with exact rational arithmetic.
///
/// Division by zero and values that do not fit a native fraction are errors, never silently
/// replaced by a default.
pub fn evaluate(expr: &Expr) -> Result<Rational> {
    match expr {
        Expr::Num(num) => Ok(*num),
        Expr::BinaryExpr(BinaryExpr { op, lhs, rhs }) => op.apply(evaluate(lhs)?, evaluate(rhs)?),
    }
}

/// Parses and evaluates an expression.
pub fn evaluate_str(text: &str) -> Result<Rational> {
    evaluate(&parse(text)?)
}

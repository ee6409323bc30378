//! Canonical forms of expressions, used as deduplication keys.
//!
//! Two expressions are duplicates exactly when one can be turned into the other by swapping the
//! operands of individual `+` and `×` nodes. Associativity is deliberately *not* an equivalence:
//! `1 + 2 + 3`, parsed as `(1 + 2) + 3`, equals `3 + (2 + 1)` after two local swaps, but not
//! `(3 + 2) + 1`, whose tree has a different shape.

use crate::error::ParseError;
use crate::grammar::{BinaryExpr, Expr};
use crate::parser::parse;

use core::fmt;

/// Renders the canonical form of an expression.
///
/// Operands render through the number codec, so `2/4` and `1/2` are the same text. Every binary
/// node is written `(lhs) op (rhs)`, and the two rendered operands of a `+` or `×` node are put
/// in lexicographic order. Ordering is local to each node; chains are never flattened.
pub fn canonical_form(expr: &Expr) -> String {
    match expr {
        Expr::Num(num) => num.to_string(),
        Expr::BinaryExpr(BinaryExpr { op, lhs, rhs }) => {
            let mut lhs = canonical_form(lhs);
            let mut rhs = canonical_form(rhs);
            if op.is_commutative() && lhs > rhs {
                std::mem::swap(&mut lhs, &mut rhs);
            }
            format!("({}) {} ({})", lhs, op, rhs)
        }
    }
}

/// Parses `text` and renders its canonical form.
pub fn canonicalize(text: &str) -> Result<String, ParseError> {
    parse(text).map(|expr| canonical_form(&expr))
}

/// Digest of a canonical form.
///
/// Collisions are not detected; a 256-bit BLAKE3 digest makes them negligible.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CanonicalHash(blake3::Hash);

impl CanonicalHash {
    pub fn of(expr: &Expr) -> Self {
        Self(blake3::hash(canonical_form(expr).as_bytes()))
    }
}

impl fmt::Display for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

/// Parses `text` and hashes its canonical form.
pub fn expression_hash(text: &str) -> Result<CanonicalHash, ParseError> {
    parse(text).map(|expr| CanonicalHash::of(&expr))
}

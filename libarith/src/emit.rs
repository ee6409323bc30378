//! Emit strategies for parsed expressions.

use crate::canonical::canonical_form;
use crate::grammar::*;

use core::fmt;
use core::str::FromStr;

/// The format in which an expression should be emitted.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EmitFormat {
    /// Exercise text with the fewest parentheses that keep the tree shape.
    /// For example, `(1 + 2) + 3` is output as `1 + 2 + 3`.
    Pretty,
    /// The deduplication key: every node parenthesized, and the operands of `+` and `×` ordered.
    /// For example, `2 + 1` is output as `(1) + (2)`.
    Canonical,
    /// S-expression form.
    /// For example, `1 + 2` is output as `(+ 1 2)`.
    SExpression,
    /// Internal debug form.
    /// NB: this form is not stable, and no assumptions should be made about it.
    Debug,
}

impl FromStr for EmitFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "canonical" => Ok(Self::Canonical),
            "s-expression" => Ok(Self::SExpression),
            "debug" => Ok(Self::Debug),
            _ => Err(format!(r#"unknown emit format "{}""#, s)),
        }
    }
}

/// Implements the emission of a type in an [EmitFormat][EmitFormat].
pub trait Emit
where
    Self: fmt::Display + fmt::Debug,
{
    /// Emit `self` with the given [EmitFormat][EmitFormat].
    fn emit(&self, form: EmitFormat) -> String {
        match form {
            EmitFormat::Pretty => self.emit_pretty(),
            EmitFormat::Canonical => self.emit_canonical(),
            EmitFormat::SExpression => self.emit_s_expression(),
            EmitFormat::Debug => self.emit_debug(),
        }
    }

    /// Emit `self` with the [pretty emit format][EmitFormat::Pretty]
    fn emit_pretty(&self) -> String;

    /// Emit `self` with the [canonical emit format][EmitFormat::Canonical]
    fn emit_canonical(&self) -> String;

    /// Emit `self` with the [s_expression emit format][EmitFormat::SExpression]
    fn emit_s_expression(&self) -> String;

    /// Emit `self` with the [debug emit format][EmitFormat::Debug]
    fn emit_debug(&self) -> String {
        format!("{:#?}", self)
    }
}

/// Implements `core::fmt::Display` for a type implementing `Emit`.
macro_rules! fmt_emit_impl {
    ($S:path) => {
        impl core::fmt::Display for $S {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.emit_pretty())
            }
        }
    };
}

fmt_emit_impl!(Expr);
impl Emit for Expr {
    fn emit_pretty(&self) -> String {
        match self {
            Self::Num(num) => num.to_string(),
            Self::BinaryExpr(BinaryExpr { op, lhs, rhs }) => {
                // The right operand also needs parentheses at equal precedence, since operators
                // associate to the left.
                let format_arg = |arg: &Expr, parenthesize_equal: bool| match arg.root_operator() {
                    Some(child)
                        if child.precedence() < op.precedence()
                            || (parenthesize_equal && child.precedence() == op.precedence()) =>
                    {
                        format!("({})", arg.emit_pretty())
                    }
                    _ => arg.emit_pretty(),
                };
                format!("{} {} {}", format_arg(lhs, false), op, format_arg(rhs, true))
            }
        }
    }

    fn emit_canonical(&self) -> String {
        canonical_form(self)
    }

    fn emit_s_expression(&self) -> String {
        match self {
            Self::Num(num) => num.to_string(),
            Self::BinaryExpr(BinaryExpr { op, lhs, rhs }) => format!(
                "({} {} {})",
                op,
                lhs.emit_s_expression(),
                rhs.emit_s_expression()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    macro_rules! pretty_tests {
        ($($name:ident: $program:expr => $pretty:expr)*) => {
            mod pretty {
                use super::*;
                $(
                    #[test]
                    fn $name() {
                        let parsed = parse($program).unwrap();
                        assert_eq!(parsed.emit(EmitFormat::Pretty), $pretty);
                        // Pretty output parses back to the same tree.
                        assert_eq!(parse(&parsed.to_string()).unwrap(), parsed);
                    }
                )*
            }
        }
    }

    pretty_tests! {
        redundant_parens:       "(1 + 2) + 3"       => "1 + 2 + 3"
        right_grouping:         "3 + (2 + 1)"       => "3 + (2 + 1)"
        needed_parens:          "(1 + 2) × 3"       => "(1 + 2) × 3"
        tighter_child:          "1 + (2 × 3)"       => "1 + 2 × 3"
        subtraction_chain:      "(5 - 2) - 1"       => "5 - 2 - 1"
        division_on_right:      "1 ÷ (2 ÷ 3)"       => "1 ÷ (2 ÷ 3)"
        parenthesized_number:   "(1/2) - 1/3"       => "1/2 - 1/3"
    }

    #[test]
    fn emit_formats_parse() {
        assert_eq!("s-expression".parse(), Ok(EmitFormat::SExpression));
        assert_eq!("canonical".parse(), Ok(EmitFormat::Canonical));
        assert!("latex".parse::<EmitFormat>().is_err());
    }

    #[test]
    fn canonical_emit() {
        let parsed = parse("2 + 1").unwrap();
        assert_eq!(parsed.emit(EmitFormat::Canonical), "(1) + (2)");
    }
}

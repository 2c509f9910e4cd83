//! Geometry-combination expressions
//!
//! Cell cards describe their region of space as an infix boolean-algebra
//! expression over signed surface references: a space is intersection, `:` is
//! union, a leading `-`/`+` gives the surface sense, and `#` complements a
//! cell or a parenthesised expression. Intersection binds tighter than
//! union.
//!
//! The expression is parsed into a small tree with a real grammar, so
//! unbalanced parentheses, adjacent operators, and stray characters are all
//! hard errors rather than something to be discovered downstream.

// internal modules
use crate::error::{Error, Result};
use crate::utils::f;

// external crates
use itertools::Itertools;
use nom::branch::alt;
use nom::character::complete::{char, digit1, multispace0, multispace1, one_of};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, verify};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use serde::Serialize;

/// One node of a geometry-combination expression
///
/// A [GeometryExpr::Surface] leaf holds a signed surface reference, or a
/// cell number when it sits directly under a complement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GeometryExpr {
    /// Signed surface (or complemented cell) reference
    Surface(i64),
    /// `#` complement of a cell number or sub-expression
    Complement(Box<GeometryExpr>),
    /// Space-separated intersection of two or more operands
    Intersection(Vec<GeometryExpr>),
    /// `:`-separated union of two or more operands
    Union(Vec<GeometryExpr>),
}

/// Characters that may legally appear in a geometry expression
const PERMITTED: &str = "0123456789+-:#() \t";

/// A signed surface reference, never zero
fn surface(i: &str) -> IResult<&str, GeometryExpr> {
    map(
        verify(
            map_res(recognize(pair(opt(one_of("+-")), digit1)), str::parse::<i64>),
            |n| *n != 0,
        ),
        GeometryExpr::Surface,
    )(i)
}

/// A parenthesised sub-expression
fn parens(i: &str) -> IResult<&str, GeometryExpr> {
    delimited(
        pair(char('('), multispace0),
        union_expr,
        pair(multispace0, char(')')),
    )(i)
}

/// A `#` complement of a cell number or parenthesised expression
fn complement(i: &str) -> IResult<&str, GeometryExpr> {
    map(preceded(char('#'), alt((parens, surface))), |inner| {
        GeometryExpr::Complement(Box::new(inner))
    })(i)
}

/// One operand of an intersection
fn term(i: &str) -> IResult<&str, GeometryExpr> {
    alt((complement, parens, surface))(i)
}

/// Space-separated intersection, collapsing the single-operand case
fn intersection(i: &str) -> IResult<&str, GeometryExpr> {
    map(separated_list1(multispace1, term), |mut operands| {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            GeometryExpr::Intersection(operands)
        }
    })(i)
}

/// `:`-separated union, the loosest-binding level of the grammar
fn union_expr(i: &str) -> IResult<&str, GeometryExpr> {
    map(
        separated_list1(delimited(multispace0, char(':'), multispace0), intersection),
        |mut operands| {
            if operands.len() == 1 {
                operands.remove(0)
            } else {
                GeometryExpr::Union(operands)
            }
        },
    )(i)
}

impl std::str::FromStr for GeometryExpr {
    type Err = Error;

    /// Parse and validate a full geometry expression
    ///
    /// Malformed nesting and characters outside the permitted set raise a
    /// semantic error naming the geometry field, per the card-level contract.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(c) = s.chars().find(|c| !PERMITTED.contains(*c)) {
            return Err(Error::semantics(
                "geometry",
                f!("illegal character '{c}' in \"{s}\""),
            ));
        }

        let (_, expression) =
            all_consuming(delimited(multispace0, union_expr, multispace0))(s).map_err(
                |_: nom::Err<nom::error::Error<&str>>| {
                    Error::semantics("geometry", f!("malformed expression \"{s}\""))
                },
            )?;

        Ok(expression)
    }
}

impl GeometryExpr {
    /// Render one operand, parenthesising wherever re-parsing would
    /// otherwise flatten the tree differently
    fn render_operand(&self, in_union: bool) -> String {
        match self {
            Self::Union(_) => f!("({self})"),
            Self::Intersection(_) if !in_union => f!("({self})"),
            _ => f!("{self}"),
        }
    }
}

impl std::fmt::Display for GeometryExpr {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Surface(n) => write!(fmt, "{n}"),
            Self::Complement(inner) => match inner.as_ref() {
                Self::Surface(n) => write!(fmt, "#{n}"),
                composite => write!(fmt, "#({composite})"),
            },
            Self::Intersection(operands) => {
                let text = operands.iter().map(|o| o.render_operand(false)).join(" ");
                write!(fmt, "{text}")
            }
            Self::Union(operands) => {
                let text = operands.iter().map(|o| o.render_operand(true)).join(":");
                write!(fmt, "{text}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn single_surface() {
        assert_eq!(
            "-1".parse::<GeometryExpr>().unwrap(),
            GeometryExpr::Surface(-1)
        );
    }

    #[test]
    fn intersection_and_union_precedence() {
        // intersection binds tighter than union
        let expression = "1 -2:3".parse::<GeometryExpr>().unwrap();
        assert_eq!(
            expression,
            GeometryExpr::Union(vec![
                GeometryExpr::Intersection(vec![
                    GeometryExpr::Surface(1),
                    GeometryExpr::Surface(-2),
                ]),
                GeometryExpr::Surface(3),
            ])
        );
    }

    #[test]
    fn complement_of_cell_and_expression() {
        let expression = "#5 #(1:2)".parse::<GeometryExpr>().unwrap();
        assert_eq!(
            expression,
            GeometryExpr::Intersection(vec![
                GeometryExpr::Complement(Box::new(GeometryExpr::Surface(5))),
                GeometryExpr::Complement(Box::new(GeometryExpr::Union(vec![
                    GeometryExpr::Surface(1),
                    GeometryExpr::Surface(2),
                ]))),
            ])
        );
        assert_eq!(expression.to_string(), "#5 #(1:2)");
    }

    #[rstest]
    #[case("1 -2", "1 -2")]
    #[case("1  :  2", "1:2")]
    #[case("(1 -2):(3 4) #5", "1 -2:(3 4) #5")]
    #[case("+1 -2", "1 -2")]
    fn canonical_render(#[case] text: &str, #[case] canonical: &str) {
        let expression = text.parse::<GeometryExpr>().unwrap();
        assert_eq!(expression.to_string(), canonical);
    }

    // re-parsing a render must yield an equal tree
    #[rstest]
    #[case("1 -2:(3 4) #5")]
    #[case("(1:2):3")]
    #[case("#(1 (2:3))")]
    fn round_trip_law(#[case] text: &str) {
        let expression = text.parse::<GeometryExpr>().unwrap();
        let rendered = expression.to_string();
        assert_eq!(rendered.parse::<GeometryExpr>().unwrap(), expression);
    }

    #[rstest]
    #[case("1 (2")]
    #[case("1)")]
    #[case("##5")]
    #[case("1 : : 2")]
    #[case("1 & 2")]
    #[case("0")]
    #[case("")]
    fn reject_malformed(#[case] text: &str) {
        assert!(matches!(
            text.parse::<GeometryExpr>(),
            Err(Error::Semantics { .. })
        ));
    }
}

//! Primitive cell types and the common `Cell` value
//!
//! A cell is the smallest parsed unit of a card. Every cell type has exactly
//! two operations: a `parse` from token text (the [std::str::FromStr]
//! implementations here) and a `render` back to canonical text (the
//! [std::fmt::Display] implementations). Both obey the round-trip law:
//! rendering a parsed token gives its canonical form, and re-parsing a render
//! gives back an equal cell.
//!
//! Numeric cells try the shorthand forms before plain literal parsing, since
//! a bare shorthand token like `3r` is lexically ambiguous with a malformed
//! number and must be claimed first.

// internal modules
use crate::card::geometry::GeometryExpr;
use crate::card::nuclide::Nuclide;
use crate::card::particle::Designator;
use crate::card::shorthand::Shorthand;
use crate::error::{Error, Result};

// external crates
use itertools::Itertools;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, recognize};
use nom::sequence::preceded;
use serde::Serialize;

/// The smallest parsed unit of a card
///
/// One variant per primitive cell type. A cell is immutable once constructed
/// and is only ever created through a `parse` entry point or a checked
/// constructor, so an invalid cell cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    /// Integer literal or shorthand
    Integer(IntegerCell),
    /// Real literal or shorthand
    Real(RealCell),
    /// Opaque string token
    Text(String),
    /// Ordered list of particle-type codes
    Designator(Designator),
    /// ZAID nuclide identifier
    Nuclide(Nuclide),
    /// Reference into a distribution table
    Distribution(DistributionRef),
    /// Infix geometry-combination expression
    Geometry(GeometryExpr),
    /// Ordered, never-empty sequence of a single inner cell type
    Tuple(Vec<Cell>),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Integer(cell) => write!(fmt, "{cell}"),
            Self::Real(cell) => write!(fmt, "{cell}"),
            Self::Text(text) => write!(fmt, "{text}"),
            Self::Designator(designator) => write!(fmt, "{designator}"),
            Self::Nuclide(nuclide) => write!(fmt, "{nuclide}"),
            Self::Distribution(reference) => write!(fmt, "{reference}"),
            Self::Geometry(expression) => write!(fmt, "{expression}"),
            Self::Tuple(cells) => write!(fmt, "{}", cells.iter().join(" ")),
        }
    }
}

/// An integer-valued field: either a literal or a shorthand form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntegerCell {
    /// Plain integer literal
    Value(i64),
    /// One of the `r`/`i`/`m`/`j`/`log` forms
    Shorthand(Shorthand),
}

impl std::str::FromStr for IntegerCell {
    type Err = Error;

    /// Shorthand forms are tried first, then a plain literal
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(form) = s.parse::<Shorthand>() {
            return Ok(Self::Shorthand(form));
        }
        s.parse::<i64>()
            .map(Self::Value)
            .map_err(|_| Error::syntax("an integer", s))
    }
}

impl std::fmt::Display for IntegerCell {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(fmt, "{value}"),
            Self::Shorthand(form) => write!(fmt, "{form}"),
        }
    }
}

/// A real-valued field: either a literal or a shorthand form
///
/// Beyond the standard `1.0e-5` style literals, the legacy Fortran exponent
/// forms MCNP itself emits are accepted, e.g. `1.00+002` => `1.00e+002`. The
/// canonical render is the shortest text that parses back to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RealCell {
    /// Plain floating-point literal
    Value(f64),
    /// One of the `r`/`i`/`m`/`j`/`log` forms
    Shorthand(Shorthand),
}

impl std::str::FromStr for RealCell {
    type Err = Error;

    /// Shorthand forms are tried first, then a plain literal
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(form) = s.parse::<Shorthand>() {
            return Ok(Self::Shorthand(form));
        }
        parse_real(s).map(Self::Value)
    }
}

impl std::fmt::Display for RealCell {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(fmt, "{}", render_real(*value)),
            Self::Shorthand(form) => write!(fmt, "{form}"),
        }
    }
}

/// Shortest text that parses back to exactly the same value
///
/// Plain formatting would expand something like `1e36` into its full run of
/// digits, so values outside a moderate range switch to exponent form.
fn render_real(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e7).contains(&magnitude) {
        crate::utils::f!("{value:e}")
    } else {
        crate::utils::f!("{value}")
    }
}

/// Parse a real literal, repairing broken Fortran-style exponents
///
/// The character filter rejects the `inf`/`NaN` spellings that
/// [str::parse::<f64>] would otherwise accept, which are not legal MCNP
/// input.
fn parse_real(s: &str) -> Result<f64> {
    let legal = s.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c));
    if !legal || !s.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::syntax("a real number", s));
    }

    if let Ok(value) = s.parse::<f64>() {
        return Ok(value);
    }

    // missing-e exponent repair, e.g. 1.00+002 or 6.2-15
    if let Some(position) = s.rfind(&['+', '-'][..]).filter(|&p| p > 0) {
        let preceding = s.as_bytes()[position - 1];
        if preceding.is_ascii_digit() || preceding == b'.' {
            let repaired = crate::utils::f!("{}e{}", &s[..position], &s[position..]);
            if let Ok(value) = repaired.parse::<f64>() {
                return Ok(value);
            }
        }
    }

    Err(Error::syntax("a real number", s))
}

/// A reference into a separate distribution table, e.g. `d5`
///
/// Used on source cards where a value may be drawn from a distribution
/// rather than given literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionRef {
    /// Distribution table identifier
    pub number: u32,
}

impl std::str::FromStr for DistributionRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, digits) =
            all_consuming(preceded(alt((tag("d"), tag("D"))), recognize(digit1)))(s)
                .map_err(|_: nom::Err<nom::error::Error<&str>>| {
                    Error::syntax("a distribution reference", s)
                })?;
        let number = digits
            .parse::<u32>()
            .map_err(|_| Error::syntax("a distribution reference", s))?;
        Ok(Self { number })
    }
}

impl std::fmt::Display for DistributionRef {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "d{}", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", IntegerCell::Value(3))]
    #[case("-42", IntegerCell::Value(-42))]
    #[case("3r", IntegerCell::Shorthand(Shorthand::Repeat(Some(3))))]
    #[case("j", IntegerCell::Shorthand(Shorthand::Jump(None)))]
    fn integer_disambiguation(#[case] token: &str, #[case] expected: IntegerCell) {
        assert_eq!(token.parse::<IntegerCell>().unwrap(), expected);
    }

    #[rstest]
    #[case("3.5")]
    #[case("abc")]
    #[case("")]
    fn integer_rejects(#[case] token: &str) {
        assert!(matches!(
            token.parse::<IntegerCell>(),
            Err(Error::Syntax { .. })
        ));
    }

    #[rstest]
    #[case("1.0", 1.0)]
    #[case("-18.7", -18.7)]
    #[case("1e-5", 1e-5)]
    #[case("2.5E+03", 2.5e3)]
    #[case("1.00+002", 100.0)]
    #[case("6.2-15", 6.2e-15)]
    #[case("3.", 3.0)]
    fn real_literals(#[case] token: &str, #[case] expected: f64) {
        assert_eq!(token.parse::<RealCell>().unwrap(), RealCell::Value(expected));
    }

    #[rstest]
    #[case("inf")]
    #[case("nan")]
    #[case("1.0.0")]
    #[case("--5")]
    #[case("e5")]
    fn real_rejects(#[case] token: &str) {
        assert!(matches!(token.parse::<RealCell>(), Err(Error::Syntax { .. })));
    }

    #[rstest]
    #[case(RealCell::Value(1e36), "1e36")]
    #[case(RealCell::Value(0.1), "0.1")]
    #[case(RealCell::Value(-2.5e-9), "-2.5e-9")]
    #[case(RealCell::Value(0.0), "0")]
    #[case(RealCell::Value(2500.0), "2500")]
    fn real_canonical_render(#[case] cell: RealCell, #[case] expected: &str) {
        assert_eq!(cell.to_string(), expected);
        assert_eq!(expected.parse::<RealCell>().unwrap(), cell);
    }

    #[test]
    fn real_shorthand_claims_first() {
        assert_eq!(
            "2i".parse::<RealCell>().unwrap(),
            RealCell::Shorthand(Shorthand::Insert(Some(2)))
        );
    }

    #[rstest]
    #[case("d5", 5)]
    #[case("D12", 12)]
    fn distribution_parse(#[case] token: &str, #[case] number: u32) {
        let reference = token.parse::<DistributionRef>().unwrap();
        assert_eq!(reference, DistributionRef { number });
        assert_eq!(reference.to_string(), crate::utils::f!("d{number}"));
    }

    #[rstest]
    #[case("d")]
    #[case("5d")]
    #[case("d5x")]
    fn distribution_rejects(#[case] token: &str) {
        assert!(token.parse::<DistributionRef>().is_err());
    }

    // render(parse(x)) must itself re-parse to an equal cell
    #[rstest]
    #[case("1.0")]
    #[case("1e-5")]
    #[case("1.00+002")]
    #[case("3r")]
    #[case("-42")]
    fn round_trip_law(#[case] token: &str) {
        let cell = token.parse::<RealCell>().unwrap();
        let rendered = cell.to_string();
        assert_eq!(rendered.parse::<RealCell>().unwrap(), cell);
        assert_eq!(rendered.parse::<RealCell>().unwrap().to_string(), rendered);
    }
}

//! Cell cards
//!
//! A cell card names a region of space: `j m d geom params`. The leading
//! cell number is followed by a material number (`0` for void), a density
//! when the cell is not void, the geometry-combination expression, and any
//! number of `keyword=value` parameters. Negative densities are mass
//! densities in g/cm3, positive are atom densities.

// internal modules
use crate::card::cell::{Cell, IntegerCell, RealCell};
use crate::card::geometry::GeometryExpr;
use crate::card::particle::Designator;
use crate::card::record::Field;
use crate::error::{Error, Result};
use crate::token::TokenQueue;
use crate::utils::f;

// external crates
use itertools::Itertools;
use serde::Serialize;

/// Highest cell number MCNP accepts
const MAX_CELL_NUMBER: i64 = 99_999_999;

/// Cell parameters accepted after the geometry expression
///
/// `imp` carries a particle designator (`imp:n=1`); the others must not.
const PARAMETERS: [&str; 5] = ["imp", "vol", "u", "lat", "tmp"];

/// One fully-validated cell card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellCard {
    number: i64,
    material: i64,
    density: Option<f64>,
    geometry: GeometryExpr,
    options: Vec<Field>,
}

impl CellCard {
    /// Parse a cell card from its token queue
    ///
    /// The queue must have been tokenized with the `=` delimiter enabled so
    /// that parameters arrive as separate keyword and value tokens.
    pub fn parse(queue: &mut TokenQueue) -> Result<Self> {
        let number = Self::required_integer(queue, "number")?;
        if !(1..=MAX_CELL_NUMBER).contains(&number) {
            return Err(Error::semantics(
                "number",
                f!("cell number {number} outside 1 to {MAX_CELL_NUMBER}"),
            ));
        }

        let material = Self::required_integer(queue, "material")?;
        if material < 0 {
            return Err(Error::semantics(
                "material",
                f!("material number {material} may not be negative"),
            ));
        }

        // void cells carry no density entry at all
        let density = match material {
            0 => None,
            _ => Some(Self::required_real(queue, "density")?),
        };

        let geometry = Self::pop_geometry(queue)?;
        let options = Self::pop_parameters(queue)?;

        Ok(Self {
            number,
            material,
            density,
            geometry,
            options,
        })
    }

    /// Cell number
    pub const fn number(&self) -> i64 {
        self.number
    }

    /// Material number, `0` for a void cell
    pub const fn material(&self) -> i64 {
        self.material
    }

    /// Density entry, absent for void cells
    pub const fn density(&self) -> Option<f64> {
        self.density
    }

    /// The region expression
    pub const fn geometry(&self) -> &GeometryExpr {
        &self.geometry
    }

    /// Cell parameters in card order
    pub fn options(&self) -> &[Field] {
        &self.options
    }

    /// Pop a token that must parse to an integer literal
    fn required_integer(queue: &mut TokenQueue, field: &str) -> Result<i64> {
        let token = queue
            .pop()
            .ok_or_else(|| Error::semantics(field, "required field is missing"))?;
        match token.parse::<IntegerCell>()? {
            IntegerCell::Value(value) => Ok(value),
            IntegerCell::Shorthand(_) => Err(Error::syntax("an integer literal", &token)),
        }
    }

    /// Pop a token that must parse to a real literal
    fn required_real(queue: &mut TokenQueue, field: &str) -> Result<f64> {
        let token = queue
            .pop()
            .ok_or_else(|| Error::semantics(field, "required field is missing"))?;
        match token.parse::<RealCell>()? {
            RealCell::Value(value) => Ok(value),
            RealCell::Shorthand(_) => Err(Error::syntax("a real literal", &token)),
        }
    }

    /// Greedily pop geometry-shaped tokens and parse the joined expression
    fn pop_geometry(queue: &mut TokenQueue) -> Result<GeometryExpr> {
        let mut spans: Vec<String> = Vec::new();
        while let Some(token) = queue.peek() {
            if !token.chars().all(|c| "0123456789+-:#()".contains(c)) {
                break;
            }
            spans.push(queue.pop().unwrap());
        }

        if spans.is_empty() {
            return Err(Error::semantics("geometry", "required field is missing"));
        }

        spans.iter().join(" ").parse::<GeometryExpr>()
    }

    /// Consume the trailing `keyword=value` parameters
    fn pop_parameters(queue: &mut TokenQueue) -> Result<Vec<Field>> {
        let mut options: Vec<Field> = Vec::new();

        while let Some(token) = queue.pop() {
            let (base, designator) = match token.split_once(':') {
                Some((base, designator)) => (base.to_string(), Some(designator.to_string())),
                None => (token.clone(), None),
            };

            if !PARAMETERS.contains(&base.as_str()) {
                return Err(Error::UnexpectedToken { token });
            }
            if options.iter().any(|o| o.keyword.as_deref() == Some(token.as_str())) {
                return Err(Error::semantics(&base, "duplicate cell parameter"));
            }

            let designator = Self::check_designator(&base, designator)?;
            let value = queue
                .pop()
                .ok_or_else(|| Error::semantics(&base, "missing parameter value"))?;
            let cell = Self::parameter_value(&base, &value)?;

            let keyword = match &designator {
                Some(d) => f!("{base}:{d}"),
                None => base.clone(),
            };
            options.push(Field {
                name: base,
                keyword: Some(keyword),
                cell,
            });
        }

        Ok(options)
    }

    /// Importance is the only parameter that carries a designator
    fn check_designator(
        base: &str,
        designator: Option<String>,
    ) -> Result<Option<Designator>> {
        match (base, designator) {
            ("imp", Some(text)) => Ok(Some(text.parse::<Designator>()?)),
            ("imp", None) => Err(Error::semantics(
                base,
                "importance requires a particle designator",
            )),
            (_, Some(text)) => Err(Error::semantics(
                base,
                f!("parameter does not take a designator, found \":{text}\""),
            )),
            (_, None) => Ok(None),
        }
    }

    /// Parse and constrain one parameter value
    fn parameter_value(base: &str, value: &str) -> Result<Cell> {
        match base {
            "u" | "lat" => {
                let cell = value.parse::<IntegerCell>()?;
                if base == "lat" && !matches!(cell, IntegerCell::Value(1 | 2)) {
                    return Err(Error::semantics(
                        base,
                        f!("lattice type must be 1 or 2, found {value}"),
                    ));
                }
                Ok(Cell::Integer(cell))
            }
            _ => {
                let cell = value.parse::<RealCell>()?;
                if base == "imp" && matches!(cell, RealCell::Value(v) if v < 0.0) {
                    return Err(Error::semantics(
                        base,
                        f!("importance may not be negative, found {value}"),
                    ));
                }
                Ok(Cell::Real(cell))
            }
        }
    }
}

impl std::fmt::Display for CellCard {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut parts = vec![f!("{}", self.number), f!("{}", self.material)];
        if let Some(density) = self.density {
            parts.push(RealCell::Value(density).to_string());
        }
        parts.push(self.geometry.to_string());
        for option in &self.options {
            // parameters always re-render in keyword=value form
            let keyword = option.keyword.as_deref().unwrap_or(&option.name);
            parts.push(f!("{}={}", keyword, option.cell));
        }
        write!(fmt, "{}", parts.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Delimiters;
    use rstest::rstest;

    fn queue(text: &str) -> TokenQueue {
        TokenQueue::tokenize(text, Delimiters::keyword_value())
    }

    #[test]
    fn full_cell_card() {
        let card = CellCard::parse(&mut queue("1 1 -18.7 -1 2 imp:n=1 vol=10.0")).unwrap();
        assert_eq!(card.number(), 1);
        assert_eq!(card.material(), 1);
        assert_eq!(card.density(), Some(-18.7));
        assert_eq!(card.options().len(), 2);
        assert_eq!(card.to_string(), "1 1 -18.7 -1 2 imp:n=1 vol=10");
    }

    #[test]
    fn void_cell_has_no_density() {
        let card = CellCard::parse(&mut queue("99 0 1:-2")).unwrap();
        assert_eq!(card.material(), 0);
        assert_eq!(card.density(), None);
        assert_eq!(card.to_string(), "99 0 1:-2");
    }

    #[rstest]
    #[case("0 1 -1.0 -1", "number")]
    #[case("1 -2 -1.0 -1", "material")]
    #[case("1 1 -1.0", "geometry")]
    #[case("1 1 -1.0 -1 imp=1", "imp")]
    #[case("1 1 -1.0 -1 vol:n=1", "vol")]
    #[case("1 1 -1.0 -1 lat=3", "lat")]
    #[case("1 1 -1.0 -1 imp:n=-2", "imp")]
    fn semantic_failures(#[case] text: &str, #[case] field: &str) {
        match CellCard::parse(&mut queue(text)) {
            Err(Error::Semantics { field: found, .. }) => assert_eq!(found, field),
            other => panic!("expected semantic error on {field}, got {other:?}"),
        }
    }

    #[test]
    fn unknown_parameter_is_unexpected() {
        let result = CellCard::parse(&mut queue("1 1 -1.0 -1 frq=2"));
        assert!(matches!(result, Err(Error::UnexpectedToken { .. })));
    }

    #[test]
    fn round_trip() {
        let text = "10 2 0.08 (1 -2):(3 -4) imp:n,p=1 u=3";
        let card = CellCard::parse(&mut queue(text)).unwrap();
        let rendered = card.to_string();
        let again = CellCard::parse(&mut queue(&rendered)).unwrap();
        assert_eq!(again, card);
    }
}

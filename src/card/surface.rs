//! Surface cards
//!
//! A surface card is `j [n] mnemonic coefficients...`: the surface number,
//! an optional transformation number, the surface-type mnemonic from the
//! fixed MCNP enumeration, and the coefficient list. Coefficient positions
//! accept the numeric shorthand forms like any other real-valued field.

// internal modules
use crate::card::cell::RealCell;
use crate::error::{Error, Result};
use crate::token::TokenQueue;
use crate::utils::f;

// external crates
use itertools::Itertools;
use serde::Serialize;

/// Highest surface number MCNP accepts
const MAX_SURFACE_NUMBER: i64 = 99_999_999;

/// The fixed surface-type enumeration
///
/// Planes, spheres, cylinders, cones, quadrics, tori, and the macrobodies.
const SURFACE_TYPES: [&str; 29] = [
    "p", "px", "py", "pz", "so", "s", "sx", "sy", "sz", "c/x", "c/y", "c/z", "cx", "cy", "cz",
    "k/x", "k/y", "k/z", "kx", "ky", "kz", "sq", "gq", "tx", "ty", "tz", "box", "rpp", "rcc",
];

/// Known coefficient counts for the unambiguous surface types
///
/// Types with several legal forms (e.g. `p` with 4 or 9 entries) are listed
/// with every accepted count; types not listed are checked only for a
/// non-empty coefficient list.
fn expected_entries(mnemonic: &str) -> Option<&'static [usize]> {
    match mnemonic {
        "px" | "py" | "pz" | "so" => Some(&[1]),
        "sx" | "sy" | "sz" => Some(&[2]),
        "cx" | "cy" | "cz" => Some(&[1]),
        "s" => Some(&[4]),
        "c/x" | "c/y" | "c/z" => Some(&[3]),
        "p" => Some(&[4, 9]),
        "sq" | "gq" => Some(&[10]),
        "tx" | "ty" | "tz" => Some(&[6]),
        "rpp" => Some(&[6]),
        "rcc" => Some(&[7]),
        "box" => Some(&[9, 12]),
        _ => None,
    }
}

/// One fully-validated surface card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceCard {
    number: i64,
    transform: Option<i64>,
    mnemonic: String,
    coefficients: Vec<RealCell>,
}

impl SurfaceCard {
    /// Parse a surface card from its token queue
    pub fn parse(queue: &mut TokenQueue) -> Result<Self> {
        let token = queue
            .pop()
            .ok_or_else(|| Error::semantics("number", "required field is missing"))?;
        let number = token
            .parse::<i64>()
            .map_err(|_| Error::syntax("a surface number", &token))?;
        if !(1..=MAX_SURFACE_NUMBER).contains(&number) {
            return Err(Error::semantics(
                "number",
                f!("surface number {number} outside 1 to {MAX_SURFACE_NUMBER}"),
            ));
        }

        // an integer in the mnemonic position is the optional transform
        let (transform, mnemonic) = Self::pop_mnemonic(queue)?;

        let coefficients = Self::pop_coefficients(queue)?;
        if let Some(counts) = expected_entries(&mnemonic) {
            if !counts.contains(&coefficients.len()) {
                return Err(Error::semantics(
                    "coefficients",
                    f!(
                        "surface type \"{mnemonic}\" takes {counts:?} entries, found {}",
                        coefficients.len()
                    ),
                ));
            }
        }

        match queue.pop() {
            Some(token) => Err(Error::UnexpectedToken { token }),
            None => Ok(Self {
                number,
                transform,
                mnemonic,
                coefficients,
            }),
        }
    }

    /// Surface number
    pub const fn number(&self) -> i64 {
        self.number
    }

    /// Optional transformation number
    pub const fn transform(&self) -> Option<i64> {
        self.transform
    }

    /// Surface-type mnemonic
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Coefficient list in card order
    pub fn coefficients(&self) -> &[RealCell] {
        &self.coefficients
    }

    /// Pop the optional transform number and the type mnemonic
    fn pop_mnemonic(queue: &mut TokenQueue) -> Result<(Option<i64>, String)> {
        let token = queue
            .pop()
            .ok_or_else(|| Error::semantics("mnemonic", "required field is missing"))?;

        let (transform, token) = match token.parse::<i64>() {
            Ok(transform) => {
                let mnemonic = queue.pop().ok_or_else(|| {
                    Error::semantics("mnemonic", "required field is missing")
                })?;
                (Some(transform), mnemonic)
            }
            Err(_) => (None, token),
        };

        if !SURFACE_TYPES.contains(&token.as_str()) {
            return Err(Error::semantics(
                "mnemonic",
                f!("\"{token}\" is not a surface type"),
            ));
        }

        Ok((transform, token))
    }

    /// Greedily pop the real-valued coefficient list
    fn pop_coefficients(queue: &mut TokenQueue) -> Result<Vec<RealCell>> {
        let mut coefficients = Vec::new();
        while let Some(token) = queue.peek() {
            match token.parse::<RealCell>() {
                Ok(cell) => {
                    coefficients.push(cell);
                    queue.pop();
                }
                Err(_) => break,
            }
        }

        if coefficients.is_empty() {
            return Err(Error::semantics("coefficients", "required field is missing"));
        }
        Ok(coefficients)
    }
}

impl std::fmt::Display for SurfaceCard {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut parts = vec![f!("{}", self.number)];
        if let Some(transform) = self.transform {
            parts.push(f!("{transform}"));
        }
        parts.push(self.mnemonic.clone());
        parts.extend(self.coefficients.iter().map(|c| c.to_string()));
        write!(fmt, "{}", parts.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Delimiters;
    use rstest::rstest;

    fn queue(text: &str) -> TokenQueue {
        TokenQueue::tokenize(text, Delimiters::whitespace())
    }

    #[test]
    fn simple_plane() {
        let card = SurfaceCard::parse(&mut queue("1 pz 10.0")).unwrap();
        assert_eq!(card.number(), 1);
        assert_eq!(card.transform(), None);
        assert_eq!(card.mnemonic(), "pz");
        assert_eq!(card.to_string(), "1 pz 10");
    }

    #[test]
    fn transform_number_before_mnemonic() {
        let card = SurfaceCard::parse(&mut queue("5 2 so 12.5")).unwrap();
        assert_eq!(card.transform(), Some(2));
        assert_eq!(card.to_string(), "5 2 so 12.5");
    }

    #[test]
    fn macrobody_coefficients() {
        let card = SurfaceCard::parse(&mut queue("10 rpp -1 1 -1 1 0 20")).unwrap();
        assert_eq!(card.coefficients().len(), 6);
    }

    #[rstest]
    #[case("1 pz 1 2", "coefficients")]
    #[case("2 so", "coefficients")]
    #[case("3 qq 1 2 3", "mnemonic")]
    #[case("0 pz 1", "number")]
    fn semantic_failures(#[case] text: &str, #[case] field: &str) {
        match SurfaceCard::parse(&mut queue(text)) {
            Err(Error::Semantics { field: found, .. }) => assert_eq!(found, field),
            other => panic!("expected semantic error on {field}, got {other:?}"),
        }
    }

    #[test]
    fn shorthand_in_coefficients() {
        // jump entries are legal coefficient positions
        let card = SurfaceCard::parse(&mut queue("7 gq 1 1 1 j j j 0 0 0 -1")).unwrap();
        assert_eq!(card.coefficients().len(), 10);
        assert_eq!(card.to_string(), "7 gq 1 1 1 j j j 0 0 0 -1");
    }
}

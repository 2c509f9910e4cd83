//! ZAID nuclide identifiers
//!
//! A ZAID packs the atomic number and mass number into a single token as
//! `ZZZAAA`, optionally followed by a dot-suffix naming the cross-section
//! library, e.g. `92235.80c`. The atomic number takes 1-3 digits and the
//! mass number exactly 3, so uranium-235 is `92235` and natural carbon is
//! `6000`.

// internal modules
use crate::error::{Error, Result};
use crate::utils::f;

// external crates
use serde::Serialize;

/// A single nuclide identifier
///
/// Immutable once constructed. The mass number is always rendered zero-padded
/// to three digits, the atomic number unpadded, matching what the fixed-width
/// ZAID slots require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nuclide {
    z: u32,
    a: u32,
    library: Option<String>,
}

impl Nuclide {
    /// Checked construction from already-typed values
    ///
    /// Fails if either number cannot be represented in its fixed-width slot
    /// (1-3 digits for `z`, 3 for `a`), or the library tag is not digits
    /// followed by a single letter.
    pub fn new(z: u32, a: u32, library: Option<&str>) -> Result<Self> {
        if z == 0 || z > 999 {
            return Err(Error::semantics(
                "z",
                f!("atomic number {z} does not fit a 1-3 digit slot"),
            ));
        }
        if a > 999 {
            return Err(Error::semantics(
                "a",
                f!("mass number {a} does not fit a 3 digit slot"),
            ));
        }
        if let Some(tag) = library {
            if !Self::is_library_tag(tag) {
                return Err(Error::syntax("a cross-section library tag", tag));
            }
        }
        Ok(Self {
            z,
            a,
            library: library.map(str::to_string),
        })
    }

    /// Atomic number
    pub const fn z(&self) -> u32 {
        self.z
    }

    /// Mass number, 0 for a natural-composition nuclide
    pub const fn a(&self) -> u32 {
        self.a
    }

    /// Cross-section library tag, e.g. `80c`
    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    /// Library tags are 2-3 digits followed by one letter
    fn is_library_tag(tag: &str) -> bool {
        if tag.len() < 3 {
            return false;
        }
        let digits = tag.len() - 1;
        (2..=3).contains(&digits)
            && tag[..digits].bytes().all(|b| b.is_ascii_digit())
            && tag[digits..].bytes().all(|b| b.is_ascii_lowercase())
    }
}

impl std::str::FromStr for Nuclide {
    type Err = Error;

    /// Parse `ZZZAAA[.library]` from a single token
    fn from_str(s: &str) -> Result<Self> {
        let (zaid, library) = match s.split_once('.') {
            Some((zaid, tag)) => (zaid, Some(tag)),
            None => (s, None),
        };

        // 1-3 digits of atomic number in front of exactly 3 of mass number
        if !(4..=6).contains(&zaid.len()) || !zaid.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::syntax("a ZAID nuclide identifier", s));
        }

        let split = zaid.len() - 3;
        let z = zaid[..split]
            .parse::<u32>()
            .map_err(|_| Error::syntax("a ZAID nuclide identifier", s))?;
        let a = zaid[split..]
            .parse::<u32>()
            .map_err(|_| Error::syntax("a ZAID nuclide identifier", s))?;

        Self::new(z, a, library).map_err(|_| Error::syntax("a ZAID nuclide identifier", s))
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.library {
            Some(tag) => write!(fmt, "{}{:03}.{}", self.z, self.a, tag),
            None => write!(fmt, "{}{:03}", self.z, self.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1001", 1, 1, None)]
    #[case("8016", 8, 16, None)]
    #[case("92235.80c", 92, 235, Some("80c"))]
    #[case("6000", 6, 0, None)]
    #[case("13027.24y", 13, 27, Some("24y"))]
    fn parse_valid_zaids(
        #[case] token: &str,
        #[case] z: u32,
        #[case] a: u32,
        #[case] library: Option<&str>,
    ) {
        let nuclide = token.parse::<Nuclide>().unwrap();
        assert_eq!(nuclide.z(), z);
        assert_eq!(nuclide.a(), a);
        assert_eq!(nuclide.library(), library);
    }

    #[rstest]
    #[case("101")]
    #[case("1001001")]
    #[case("0001")]
    #[case("92235.8")]
    #[case("92235.80C")]
    #[case("abc")]
    #[case("")]
    fn reject_invalid_zaids(#[case] token: &str) {
        assert!(matches!(token.parse::<Nuclide>(), Err(Error::Syntax { .. })));
    }

    #[test]
    fn constructed_zaid_renders_padded() {
        let nuclide = Nuclide::new(92, 235, Some("80c")).unwrap();
        assert_eq!(nuclide.to_string(), "92235.80c");

        let nuclide = Nuclide::new(1, 1, None).unwrap();
        assert_eq!(nuclide.to_string(), "1001");
    }

    #[test]
    fn constructor_checks_slots() {
        assert!(Nuclide::new(1000, 1, None).is_err());
        assert!(Nuclide::new(1, 1000, None).is_err());
        assert!(Nuclide::new(0, 1, None).is_err());
        assert!(Nuclide::new(92, 235, Some("8")).is_err());
    }

    #[rstest]
    #[case("1001")]
    #[case("92235.80c")]
    fn round_trip_law(#[case] token: &str) {
        let nuclide = token.parse::<Nuclide>().unwrap();
        let rendered = nuclide.to_string();
        assert_eq!(rendered, token);
        assert_eq!(rendered.parse::<Nuclide>().unwrap(), nuclide);
    }
}

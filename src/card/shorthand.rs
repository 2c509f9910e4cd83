//! MCNP numeric shorthand forms
//!
//! Anywhere a number is expected on a card, MCNP also accepts one of five
//! compact shorthand suffixes:
//!
//! | Form     | Pattern   | Meaning                                      |
//! | -------- | --------- | -------------------------------------------- |
//! | Repeat   | `\d*r`    | repeat previous value N times (default 1)    |
//! | Insert   | `\d*i`    | interpolate N values between neighbours      |
//! | Multiply | `\d+m`    | multiply previous value by N                 |
//! | Jump     | `\d*j`    | use the default for N positions              |
//! | Log      | `\d*log`  | log-interpolate N values between neighbours  |
//!
//! These are terminal leaf values stored inside the numeric cells, not
//! expanded at parse time. Expansion into an actual numeric sequence is a
//! downstream concern; the job here is to parse and faithfully round-trip the
//! shorthand token itself.

// internal modules
use crate::error::{Error, Result};
use crate::utils::f;

// external crates
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete;
use nom::combinator::{eof, opt};
use nom::IResult;
use serde::Serialize;

/// One of the five compact numeric shorthand forms
///
/// The optional leading repetition count is kept as parsed; an absent count
/// means "1" or the context default depending on the form, and that decision
/// belongs to whoever expands the sequence. `ilog` is accepted as an alias
/// for `log` and folded to the canonical `log` spelling on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shorthand {
    /// `Nr` repeats the previous value N times
    Repeat(Option<u32>),
    /// `Ni` linearly interpolates N values between neighbours
    Insert(Option<u32>),
    /// `Nm` multiplies the previous value by N
    Multiply(u32),
    /// `Nj` jumps over N positions, leaving them at their defaults
    Jump(Option<u32>),
    /// `Nlog` log-interpolates N values between neighbours
    Log(Option<u32>),
}

/// Recognise an optional count followed by one of the suffix tags
///
/// `ilog` must be tried before `log` and the bare `i` so that the longest
/// spelling claims the token.
fn shorthand(i: &str) -> IResult<&str, Shorthand> {
    let (i, count) = opt(complete::u32)(i)?;
    let (i, suffix) = alt((
        tag("ilog"),
        tag("log"),
        tag("r"),
        tag("i"),
        tag("m"),
        tag("j"),
    ))(i)?;
    let (i, _) = eof(i)?;

    let form = match suffix {
        "r" => Shorthand::Repeat(count),
        "i" => Shorthand::Insert(count),
        // the count is checked for presence by the caller
        "m" => Shorthand::Multiply(count.unwrap_or(0)),
        "j" => Shorthand::Jump(count),
        _ => Shorthand::Log(count),
    };

    Ok((i, form))
}

impl std::str::FromStr for Shorthand {
    type Err = Error;

    /// Attempt to match a token against the shorthand patterns
    ///
    /// Fails with a syntax error for anything outside the five forms, and for
    /// a `m` multiplier with no leading count.
    fn from_str(s: &str) -> Result<Self> {
        let (_, form) =
            shorthand(s).map_err(|_| Error::syntax("a numeric shorthand form", s))?;

        // the multiply form is the only one with a mandatory count
        if form == Shorthand::Multiply(0) && !s.starts_with('0') {
            return Err(Error::syntax("a counted multiply shorthand", s));
        }

        Ok(form)
    }
}

impl std::fmt::Display for Shorthand {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self {
            Self::Repeat(n) => Self::counted(n, "r"),
            Self::Insert(n) => Self::counted(n, "i"),
            Self::Multiply(n) => f!("{n}m"),
            Self::Jump(n) => Self::counted(n, "j"),
            Self::Log(n) => Self::counted(n, "log"),
        };
        write!(fmt, "{text}")
    }
}

impl Shorthand {
    /// Join an optional count back onto its suffix tag
    fn counted(count: &Option<u32>, suffix: &str) -> String {
        match count {
            Some(n) => f!("{n}{suffix}"),
            None => suffix.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("r", Shorthand::Repeat(None))]
    #[case("3r", Shorthand::Repeat(Some(3)))]
    #[case("i", Shorthand::Insert(None))]
    #[case("10i", Shorthand::Insert(Some(10)))]
    #[case("2m", Shorthand::Multiply(2))]
    #[case("j", Shorthand::Jump(None))]
    #[case("4j", Shorthand::Jump(Some(4)))]
    #[case("log", Shorthand::Log(None))]
    #[case("5log", Shorthand::Log(Some(5)))]
    #[case("5ilog", Shorthand::Log(Some(5)))]
    fn parse_valid_forms(#[case] token: &str, #[case] expected: Shorthand) {
        assert_eq!(token.parse::<Shorthand>().unwrap(), expected);
    }

    #[rstest]
    #[case("m")]
    #[case("3")]
    #[case("3k")]
    #[case("r3")]
    #[case("3r4")]
    #[case("-2r")]
    #[case("")]
    fn reject_invalid_forms(#[case] token: &str) {
        assert!(matches!(
            token.parse::<Shorthand>(),
            Err(Error::Syntax { .. })
        ));
    }

    #[rstest]
    #[case("3r", "3r")]
    #[case("r", "r")]
    #[case("2m", "2m")]
    #[case("5ilog", "5log")]
    #[case("j", "j")]
    fn canonical_round_trip(#[case] token: &str, #[case] canonical: &str) {
        let form = token.parse::<Shorthand>().unwrap();
        assert_eq!(form.to_string(), canonical);
        assert_eq!(canonical.parse::<Shorthand>().unwrap(), form);
    }
}

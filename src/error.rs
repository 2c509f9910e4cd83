//! Structured errors raised while parsing and validating cards
//!
//! Every failure is raised at the point of detection and unwinds the current
//! parse with no partial object left behind. Recovery, if any, is up to
//! whatever is driving per-card parsing (see
//! [InpReader](crate::readers::InpReader) for the skip-and-continue case).

/// Convenience alias used throughout the library
pub type Result<T> = core::result::Result<T, Error>;

/// All errors that can be raised while parsing or validating a card
///
/// Each variant carries enough context to point a human at the exact bad
/// token, and the field name where one applies.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A token's text does not match the shape required by the cell type
    /// attempting to parse it, e.g. `"abc"` where a real was expected.
    #[error("syntax error: expected {expected}, found \"{token}\"")]
    Syntax {
        /// What the parser was trying to read
        expected: &'static str,
        /// The offending raw token text
        token: String,
    },

    /// The leading mnemonic of a card matches no registered schema.
    #[error("unrecognised card mnemonic \"{mnemonic}\"")]
    UnrecognisedKeyword {
        /// The leading alphabetic run of the first token
        mnemonic: String,
    },

    /// A token parsed successfully as its cell type but failed a declared
    /// constraint, or a required field was absent.
    #[error("semantic error in field \"{field}\": {reason}")]
    Semantics {
        /// Name of the field that failed validation
        field: String,
        /// Constraint description and the offending value
        reason: String,
    },

    /// Tokens remained in the queue after all declared fields were consumed.
    #[error("unexpected trailing token \"{token}\"")]
    UnexpectedToken {
        /// The first leftover token
        token: String,
    },
}

impl Error {
    /// Shorthand constructor for the [Error::Syntax] variant
    pub fn syntax(expected: &'static str, token: &str) -> Self {
        Self::Syntax {
            expected,
            token: token.to_string(),
        }
    }

    /// Shorthand constructor for the [Error::Semantics] variant
    pub fn semantics(field: &str, reason: impl Into<String>) -> Self {
        Self::Semantics {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

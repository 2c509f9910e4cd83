//! Validated data-card records
//!
//! A [Record] is the end product of matching one card against its registered
//! schema: the mnemonic, any suffix and particle designator, and the ordered
//! list of named, already-validated field cells. Construction happens only
//! inside the schema validator, so an invalid record cannot exist; a failed
//! parse yields no object at all.

// internal modules
use crate::card::cell::Cell;
use crate::card::particle::Designator;
use crate::utils::f;

// external crates
use itertools::Itertools;
use serde::Serialize;

/// One named, parsed field of a record
///
/// Keyword-style fields remember their literal keyword so that rendering can
/// reproduce the `keyword=value` form they were read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Schema name of the field
    pub name: String,
    /// Literal keyword for `keyword=value` fields, absent for positional
    pub keyword: Option<String>,
    /// The validated cell value
    pub cell: Cell,
}

/// An immutable, fully-validated data card
///
/// All fields have already passed their cell-type parse and any declared
/// constraints by the time a record exists. Fields are exposed read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    mnemonic: String,
    suffix: Option<i64>,
    designator: Option<Designator>,
    fields: Vec<Field>,
}

impl Record {
    /// Assemble a record from validated parts
    ///
    /// Only the schema validator constructs records, which is what keeps the
    /// "no invalid record" invariant auditable.
    pub(crate) fn new(
        mnemonic: &str,
        suffix: Option<i64>,
        designator: Option<Designator>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.to_string(),
            suffix,
            designator,
            fields,
        }
    }

    /// The card's keyword prefix, e.g. `cf`
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Numeric suffix glued to the mnemonic, e.g. the `3` of `cf3`
    pub const fn suffix(&self) -> Option<i64> {
        self.suffix
    }

    /// Particle designator following the mnemonic, e.g. the `n` of `mx5:n`
    pub fn designator(&self) -> Option<&Designator> {
        self.designator.as_ref()
    }

    /// Look up a field's cell by its schema name
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.cell)
    }

    /// All fields in declared order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Identity string built from mnemonic, suffix, and designator
    ///
    /// This is the string MCNP itself uses to refer to the card, e.g. `mx5:n`
    /// or `totnu`.
    pub fn identity(&self) -> String {
        let mut id = self.mnemonic.clone();
        if let Some(suffix) = self.suffix {
            id += &f!("{suffix}");
        }
        if let Some(designator) = &self.designator {
            id += &f!(":{designator}");
        }
        id
    }
}

/// Renders the canonical single-line card text
///
/// The suffix and designator are glued straight onto the mnemonic with no
/// separating space, mirroring how they were parsed. Wrapping to the 80
/// column limit is applied by [wrap_card](crate::wrap::wrap_card) when a
/// whole deck is written out.
impl std::fmt::Display for Record {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut parts = vec![self.identity()];
        for field in &self.fields {
            match &field.keyword {
                Some(keyword) => parts.push(f!("{}={}", keyword, field.cell)),
                None => parts.push(field.cell.to_string()),
            }
        }
        write!(fmt, "{}", parts.iter().join(" "))
    }
}

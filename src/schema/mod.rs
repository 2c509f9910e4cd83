//! Record schemas and the card validator
//!
//! # Overview
//!
//! A [Schema] is the static description of one data-card type: its mnemonic,
//! whether a numeric suffix and particle designator may follow it, the
//! ordered positional field specs, and any `keyword=value` fields. Schemas
//! are registered into a global append-only mnemonic table built exactly
//! once behind a [OnceLock] on first use; after that the registry is
//! read-only and safe to share across threads without locking.
//!
//! Validation pulls tokens strictly left to right:
//!
//! 1. decompose the leading token into mnemonic, suffix, and designator
//! 2. fill each positional field in declared order, greedily for tuples
//! 3. match the remaining tokens against the declared keyword fields
//! 4. fail on the first leftover token
//!
//! Every failure unwinds immediately with a structured
//! [Error](crate::error::Error); there is no partial record.

// internal modules
use crate::card::cell::{Cell, DistributionRef, IntegerCell, RealCell};
use crate::card::geometry::GeometryExpr;
use crate::card::nuclide::Nuclide;
use crate::card::particle::Designator;
use crate::card::record::{Field, Record};
use crate::error::{Error, Result};
use crate::token::{Delimiters, TokenQueue};
use crate::utils::f;

// standard library
use std::collections::HashMap;
use std::sync::OnceLock;

// files under the schema module
mod builtin;

/// The closed set of cell types a schema field may declare
///
/// [CellKind::SourceValue] is the explicit union used on source cards where
/// a value is either a literal or a distribution reference. Candidates are
/// tried in a fixed first-match-wins order, [DistributionRef] before
/// [RealCell], because `d5` must never reach the numeric parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellKind {
    /// Integer literal or shorthand
    Integer,
    /// Real literal or shorthand
    Real,
    /// Opaque text token
    Text,
    /// Ordered particle list
    Designator,
    /// ZAID nuclide identifier
    Nuclide,
    /// Distribution reference, e.g. `d5`
    Distribution,
    /// Geometry-combination expression, consumes tokens greedily
    Geometry,
    /// Distribution reference or real literal, first match wins
    SourceValue,
    /// One or more of the inner kind, consumed greedily
    Tuple(&'static CellKind),
}

impl CellKind {
    /// Parse a single token as this kind
    ///
    /// Tuples and geometry are multi-token shapes handled by the field loop,
    /// so only scalar kinds reach this point.
    fn parse_scalar(&self, token: &str) -> Result<Cell> {
        match self {
            Self::Integer => Ok(Cell::Integer(token.parse::<IntegerCell>()?)),
            Self::Real => Ok(Cell::Real(token.parse::<RealCell>()?)),
            Self::Text => Ok(Cell::Text(token.to_string())),
            Self::Designator => Ok(Cell::Designator(token.parse::<Designator>()?)),
            Self::Nuclide => Ok(Cell::Nuclide(token.parse::<Nuclide>()?)),
            Self::Distribution => Ok(Cell::Distribution(token.parse::<DistributionRef>()?)),
            Self::SourceValue => match token.parse::<DistributionRef>() {
                Ok(reference) => Ok(Cell::Distribution(reference)),
                Err(_) => Ok(Cell::Real(token.parse::<RealCell>().map_err(|_| {
                    Error::syntax("a source value or distribution reference", token)
                })?)),
            },
            Self::Geometry => Ok(Cell::Geometry(token.parse::<GeometryExpr>()?)),
            Self::Tuple(_) => unreachable!("tuples are consumed by the field loop"),
        }
    }
}

/// Declared constraints applied to a parsed cell
///
/// Shorthand forms carry no literal value, so range checks pass them
/// through untouched; the expanded sequence is a downstream concern.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Inclusive integer range
    IntRange(i64, i64),
    /// Inclusive real range
    RealRange(f64, f64),
    /// Text enumeration membership
    OneOf(&'static [&'static str]),
    /// Arbitrary integer predicate with a description for error messages
    IntCheck(fn(i64) -> bool, &'static str),
}

impl Constraint {
    /// Check an already-parsed integer, e.g. a card suffix
    fn check_integer(&self, value: i64) -> std::result::Result<(), String> {
        match self {
            Self::IntRange(lo, hi) => {
                if (*lo..=*hi).contains(&value) {
                    Ok(())
                } else {
                    Err(f!("{value} outside {lo} to {hi}"))
                }
            }
            Self::IntCheck(predicate, description) => {
                if predicate(value) {
                    Ok(())
                } else {
                    Err(f!("{value} is not {description}"))
                }
            }
            _ => Ok(()),
        }
    }

    /// Check one parsed cell against the constraint
    fn check(&self, cell: &Cell) -> std::result::Result<(), String> {
        match (self, cell) {
            (_, Cell::Integer(IntegerCell::Value(value))) => self.check_integer(*value),
            (Self::RealRange(lo, hi), Cell::Real(RealCell::Value(value))) => {
                if lo <= value && value <= hi {
                    Ok(())
                } else {
                    Err(f!("{value} outside {lo} to {hi}"))
                }
            }
            (Self::OneOf(choices), Cell::Text(text)) => {
                if choices.contains(&text.as_str()) {
                    Ok(())
                } else {
                    Err(f!("\"{text}\" is not one of {choices:?}"))
                }
            }
            _ => Ok(()),
        }
    }
}

/// Static description of one schema field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name, doubling as the literal keyword for keyword fields
    pub name: &'static str,
    /// The cell type this field parses through
    pub kind: CellKind,
    /// Positional fields only: whether absence is an error
    pub required: bool,
    /// Constraint applied to the parsed cell, or each tuple element
    pub constraint: Option<Constraint>,
}

impl FieldSpec {
    /// A required positional field
    pub const fn required(name: &'static str, kind: CellKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            constraint: None,
        }
    }

    /// An optional positional field, left absent when the next token does
    /// not match
    pub const fn optional(name: &'static str, kind: CellKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            constraint: None,
        }
    }

    /// Attach a constraint
    pub const fn check(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }
}

/// Whether a suffix or designator segment may follow the mnemonic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must not appear
    Forbidden,
    /// Must appear
    Required,
    /// May appear
    Optional,
}

/// Static description of one data-card type
///
/// For cards that are a mnemonic followed by an open-ended sequence of
/// `sub-keyword value` pairs (e.g. `sdef`), every pair is declared in
/// `keywords` and the validator matches them in any order, treating the
/// remaining stream as a sequence of independently-matched sub-records.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Keyword prefix identifying the card type
    pub mnemonic: &'static str,
    /// Numeric suffix rule
    pub suffix: Presence,
    /// Constraint on the suffix value
    pub suffix_constraint: Option<Constraint>,
    /// Particle designator rule
    pub designator: Presence,
    /// Positional fields in declared order
    pub fields: &'static [FieldSpec],
    /// `keyword=value` fields, matched in any order after the positionals
    pub keywords: &'static [FieldSpec],
    /// Token separator set this card kind is tokenized with
    pub delimiters: Delimiters,
}

impl Schema {
    /// Validate one card's text against this schema
    pub fn parse(&self, text: &str) -> Result<Record> {
        let mut queue = TokenQueue::tokenize(text, self.delimiters);
        let head = queue
            .pop()
            .ok_or_else(|| Error::syntax("a card mnemonic", text))?;

        let (suffix, designator) = self.decompose_head(&head)?;

        let mut fields = Vec::new();
        for spec in self.fields {
            if let Some(cell) = Self::parse_positional(spec, &mut queue)? {
                fields.push(Field {
                    name: spec.name.to_string(),
                    keyword: None,
                    cell,
                });
            }
        }

        self.parse_keywords(&mut queue, &mut fields)?;

        Ok(Record::new(self.mnemonic, suffix, designator, fields))
    }

    /// Split the leading token into mnemonic, suffix, and designator
    fn decompose_head(&self, head: &str) -> Result<(Option<i64>, Option<Designator>)> {
        if !head.starts_with(self.mnemonic) {
            return Err(Error::UnrecognisedKeyword {
                mnemonic: head.to_string(),
            });
        }
        let rest = &head[self.mnemonic.len()..];
        let (digits, designator_text) = match rest.split_once(':') {
            Some((digits, designator)) => (digits, Some(designator)),
            None => (rest, None),
        };

        let suffix = match digits {
            "" => None,
            _ => Some(
                digits
                    .parse::<i64>()
                    .map_err(|_| Error::syntax("a card suffix", head))?,
            ),
        };
        match (self.suffix, suffix) {
            (Presence::Required, None) => {
                return Err(Error::semantics("suffix", "required suffix is missing"))
            }
            (Presence::Forbidden, Some(value)) => {
                return Err(Error::semantics(
                    "suffix",
                    f!("card takes no suffix, found {value}"),
                ))
            }
            _ => (),
        }
        if let (Some(constraint), Some(value)) = (self.suffix_constraint, suffix) {
            constraint
                .check_integer(value)
                .map_err(|reason| Error::semantics("suffix", reason))?;
        }

        let designator = match designator_text {
            Some(text) => Some(text.parse::<Designator>()?),
            None => None,
        };
        match (self.designator, &designator) {
            (Presence::Required, None) => {
                Err(Error::semantics("designator", "required designator is missing"))
            }
            (Presence::Forbidden, Some(d)) => Err(Error::semantics(
                "designator",
                f!("card takes no designator, found {d}"),
            )),
            _ => Ok((suffix, designator)),
        }
    }

    /// Fill one positional field from the front of the queue
    fn parse_positional(spec: &FieldSpec, queue: &mut TokenQueue) -> Result<Option<Cell>> {
        match spec.kind {
            CellKind::Tuple(inner) => {
                let cells = Self::pop_tuple(spec, inner, queue)?;
                match (cells.is_empty(), spec.required) {
                    // an absent tuple is an absent field, never an empty one
                    (true, true) => Err(Error::semantics(
                        spec.name,
                        "required field has no matching tokens",
                    )),
                    (true, false) => Ok(None),
                    _ => Ok(Some(Cell::Tuple(cells))),
                }
            }
            CellKind::Geometry => Self::pop_geometry(spec, queue),
            _ if spec.required => {
                let token = queue.pop().ok_or_else(|| {
                    Error::semantics(spec.name, "required field is missing")
                })?;
                let cell = spec.kind.parse_scalar(&token)?;
                Self::constrain(spec, &cell)?;
                Ok(Some(cell))
            }
            _ => {
                // optional positional: consume only a token that both parses
                // and passes the constraint, otherwise leave the field absent
                let Some(token) = queue.peek() else { return Ok(None) };
                match spec.kind.parse_scalar(token) {
                    Ok(cell) if Self::constrain(spec, &cell).is_ok() => {
                        queue.pop();
                        Ok(Some(cell))
                    }
                    _ => Ok(None),
                }
            }
        }
    }

    /// Greedily pop tokens while they parse as the tuple's inner kind
    fn pop_tuple(
        spec: &FieldSpec,
        inner: &CellKind,
        queue: &mut TokenQueue,
    ) -> Result<Vec<Cell>> {
        let mut cells = Vec::new();
        while let Some(token) = queue.peek() {
            match inner.parse_scalar(token) {
                Ok(cell) => {
                    Self::constrain(spec, &cell)?;
                    cells.push(cell);
                    queue.pop();
                }
                Err(_) => break,
            }
        }
        Ok(cells)
    }

    /// Greedily pop geometry-shaped tokens and parse the joined expression
    fn pop_geometry(spec: &FieldSpec, queue: &mut TokenQueue) -> Result<Option<Cell>> {
        let mut spans: Vec<String> = Vec::new();
        while let Some(token) = queue.peek() {
            if !token.chars().all(|c| "0123456789+-:#()".contains(c)) {
                break;
            }
            spans.push(queue.pop().unwrap());
        }

        match (spans.is_empty(), spec.required) {
            (true, true) => Err(Error::semantics(spec.name, "required field is missing")),
            (true, false) => Ok(None),
            _ => {
                let expression = spans.join(" ").parse::<GeometryExpr>()?;
                Ok(Some(Cell::Geometry(expression)))
            }
        }
    }

    /// Match every remaining token against the declared keyword fields
    fn parse_keywords(&self, queue: &mut TokenQueue, fields: &mut Vec<Field>) -> Result<()> {
        while let Some(token) = queue.pop() {
            let Some(spec) = self.keywords.iter().find(|spec| spec.name == token) else {
                return Err(Error::UnexpectedToken { token });
            };
            if fields.iter().any(|field| field.name == spec.name) {
                return Err(Error::semantics(spec.name, "duplicate keyword"));
            }

            let cell = match spec.kind {
                CellKind::Tuple(inner) => {
                    let cells = Self::pop_tuple(spec, inner, queue)?;
                    if cells.is_empty() {
                        return Err(Error::semantics(spec.name, "keyword has no value"));
                    }
                    Cell::Tuple(cells)
                }
                _ => {
                    let value = queue
                        .pop()
                        .ok_or_else(|| Error::semantics(spec.name, "keyword has no value"))?;
                    let cell = spec.kind.parse_scalar(&value)?;
                    Self::constrain(spec, &cell)?;
                    cell
                }
            };

            fields.push(Field {
                name: spec.name.to_string(),
                keyword: Some(spec.name.to_string()),
                cell,
            });
        }
        Ok(())
    }

    /// Apply the declared constraint, naming the field on failure
    fn constrain(spec: &FieldSpec, cell: &Cell) -> Result<()> {
        if let Some(constraint) = &spec.constraint {
            constraint
                .check(cell)
                .map_err(|reason| Error::semantics(spec.name, reason))?;
        }
        Ok(())
    }
}

/// The global mnemonic to schema table
///
/// Built exactly once on first use and never mutated afterwards, which is
/// what makes lock-free sharing across threads sound.
static REGISTRY: OnceLock<HashMap<&'static str, Vec<&'static Schema>>> = OnceLock::new();

/// Build (if needed) and return the schema registry
pub fn registry() -> &'static HashMap<&'static str, Vec<&'static Schema>> {
    REGISTRY.get_or_init(|| {
        let mut table: HashMap<&'static str, Vec<&'static Schema>> = HashMap::new();
        for schema in builtin::SCHEMAS {
            table.entry(schema.mnemonic).or_default().push(schema);
        }
        table
    })
}

/// Find the registered schemas for a mnemonic
pub fn lookup(mnemonic: &str) -> Option<&'static [&'static Schema]> {
    registry().get(mnemonic).map(|schemas| schemas.as_slice())
}

/// Parse one data card against the registered schemas
///
/// The mnemonic is the leading alphabetic run of the first token. Where a
/// mnemonic registers several schemas the first that validates wins, in
/// registration order.
///
/// ```rust
/// let record = inpdeck::parse_card("cf3 10 20 30").unwrap();
/// assert_eq!(record.identity(), "cf3");
/// assert_eq!(record.to_string(), "cf3 10 20 30");
/// ```
pub fn parse_card(text: &str) -> Result<Record> {
    let head = text.split_whitespace().next().unwrap_or("");
    let mnemonic: String = head
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect();

    if mnemonic.is_empty() {
        return Err(Error::UnrecognisedKeyword {
            mnemonic: head.to_string(),
        });
    }

    let schemas = lookup(&mnemonic).ok_or_else(|| Error::UnrecognisedKeyword {
        mnemonic: mnemonic.clone(),
    })?;

    let mut failure = Error::UnrecognisedKeyword { mnemonic };
    for schema in schemas {
        match schema.parse(text) {
            Ok(record) => return Ok(record),
            Err(error) => failure = error,
        }
    }
    Err(failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::shorthand::Shorthand;
    use rstest::rstest;

    // ad-hoc schema, deliberately not registered
    const TWO_INTEGERS: Schema = Schema {
        mnemonic: "zz",
        suffix: Presence::Optional,
        suffix_constraint: Some(Constraint::IntRange(1, 999)),
        designator: Presence::Forbidden,
        fields: &[
            FieldSpec::required("first", CellKind::Integer),
            FieldSpec::required("second", CellKind::Integer),
        ],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    };

    #[rstest]
    #[case(1)]
    #[case(999)]
    fn suffix_range_is_inclusive(#[case] suffix: i64) {
        let record = TWO_INTEGERS.parse(&crate::utils::f!("zz{suffix} 1 2")).unwrap();
        assert_eq!(record.suffix(), Some(suffix));
    }

    #[test]
    fn suffix_range_enforced() {
        match TWO_INTEGERS.parse("zz1000 1 2") {
            Err(Error::Semantics { field, .. }) => assert_eq!(field, "suffix"),
            other => panic!("expected suffix error, got {other:?}"),
        }
    }

    #[test]
    fn leftover_tokens_are_unexpected() {
        let result = TWO_INTEGERS.parse("zz1 1 2 3");
        assert_eq!(
            result,
            Err(Error::UnexpectedToken {
                token: "3".to_string()
            })
        );
    }

    #[test]
    fn missing_required_field_names_it() {
        match TWO_INTEGERS.parse("zz1 1") {
            Err(Error::Semantics { field, .. }) => assert_eq!(field, "second"),
            other => panic!("expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn forbidden_designator_rejected() {
        assert!(matches!(
            TWO_INTEGERS.parse("zz1:n 1 2"),
            Err(Error::Semantics { .. })
        ));
    }

    const INTEGER_TUPLE: Schema = Schema {
        mnemonic: "zt",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("entries", CellKind::Tuple(&CellKind::Integer))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    };

    #[test]
    fn tuple_never_empty() {
        match INTEGER_TUPLE.parse("zt") {
            Err(Error::Semantics { field, .. }) => assert_eq!(field, "entries"),
            other => panic!("expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn tuple_accepts_shorthand() {
        let record = INTEGER_TUPLE.parse("zt 5 3r j").unwrap();
        let Some(Cell::Tuple(cells)) = record.get("entries") else {
            panic!("expected tuple")
        };
        assert_eq!(
            cells[1],
            Cell::Integer(IntegerCell::Shorthand(Shorthand::Repeat(Some(3))))
        );
        assert_eq!(cells.len(), 3);
    }

    const GEOMETRY_FIELD: Schema = Schema {
        mnemonic: "zg",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("region", CellKind::Geometry)],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    };

    #[test]
    fn geometry_field_consumes_greedily() {
        let record = GEOMETRY_FIELD.parse("zg (1 -2):(3 4)").unwrap();
        let Some(Cell::Geometry(expression)) = record.get("region") else {
            panic!("expected geometry")
        };
        assert_eq!(expression.to_string(), "1 -2:3 4");
    }

    #[test]
    fn union_field_order_is_distribution_first() {
        assert_eq!(
            CellKind::SourceValue.parse_scalar("d5").unwrap(),
            Cell::Distribution(crate::card::cell::DistributionRef { number: 5 })
        );
        assert_eq!(
            CellKind::SourceValue.parse_scalar("5").unwrap(),
            Cell::Real(RealCell::Value(5.0))
        );
    }

    #[test]
    fn unknown_mnemonic_is_unrecognised() {
        assert!(matches!(
            parse_card("frobnicate 1 2"),
            Err(Error::UnrecognisedKeyword { .. })
        ));
    }

    #[test]
    fn registry_is_populated_once() {
        let first = registry() as *const _;
        let second = registry() as *const _;
        assert_eq!(first, second);
        assert!(lookup("cf").is_some());
        assert!(lookup("zz").is_none());
    }
}

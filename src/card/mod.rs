//! Core card data model
//!
//! # Overview
//!
//! Everything a parsed card is made of lives here. The primitive [cell]
//! types are the smallest parsed units: integers and reals with their
//! shorthand forms, particle designators, ZAID nuclide identifiers,
//! distribution references, geometry expressions, and tuples of all of
//! these. Validated cards are one of three shapes:
//!
//! | Card shape    | Type          | Example                      |
//! | ------------- | ------------- | ---------------------------- |
//! | Data card     | [Record]      | `cf3 10 20 30`               |
//! | Cell card     | [CellCard]    | `1 1 -18.7 -1 2 imp:n=1`     |
//! | Surface card  | [SurfaceCard] | `1 pz 10.0`                  |
//!
//! All three are immutable once constructed and are only ever produced by
//! their validating parsers, so holding one is proof the card text was
//! legal. Each renders back to canonical single-line text through
//! [std::fmt::Display]; wrapping to the MCNP column limit happens in
//! [wrap](crate::wrap) when a deck is written out.

// Split into subfiles for development, but anything important is re-exported
pub mod cell;
pub mod cell_card;
pub mod geometry;
pub mod nuclide;
pub mod particle;
pub mod record;
pub mod shorthand;
pub mod surface;

// inline important the card-related types for a nice public API
#[doc(inline)]
pub use crate::card::cell::{Cell, DistributionRef, IntegerCell, RealCell};

#[doc(inline)]
pub use crate::card::cell_card::CellCard;

#[doc(inline)]
pub use crate::card::geometry::GeometryExpr;

#[doc(inline)]
pub use crate::card::nuclide::Nuclide;

#[doc(inline)]
pub use crate::card::particle::{Designator, Particle};

#[doc(inline)]
pub use crate::card::record::{Field, Record};

#[doc(inline)]
pub use crate::card::shorthand::Shorthand;

#[doc(inline)]
pub use crate::card::surface::SurfaceCard;

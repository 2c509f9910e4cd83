//! # The Inpdeck crate
//!
//! A structured reader/writer for MCNP input (INP) decks
//!
//! ## Overview
//!
//! The crate parses the whitespace/keyword-delimited "cards" of an MCNP
//! input deck into typed, validated objects, and serialises those objects
//! back to the exact textual form MCNP expects. Two command line tools are
//! layered on top of the library:
//!
//! | Command line | Description                                          |
//! | ------------ | ---------------------------------------------------- |
//! | `inpcheck`   | Validate a deck and report every bad card            |
//! | `inpfmt`     | Re-emit a deck in canonical wrapped form             |
//!
//! Both tools are fully documented with detailed `--help` messages,
//! including examples for common use cases.
//!
//! ### Supported card shapes
//!
//! For more detail, see the card definitions in the
//! [MCNPv6.2](https://mcnp.lanl.gov/pdf_files/TechReport_2017_LANL_LA-UR-17-29981_WernerArmstrongEtAl.pdf)
//! user manual.
//!
//! | Card shape    | Type                                  | Example                  |
//! | ------------- | ------------------------------------- | ------------------------ |
//! | Data card     | [Record](crate::card::Record)         | `cf3 10 20 30`           |
//! | Cell card     | [CellCard](crate::card::CellCard)     | `1 1 -18.7 -1 2 imp:n=1` |
//! | Surface card  | [SurfaceCard](crate::card::SurfaceCard) | `1 pz 10.0`            |
//!
//! Every field of a card parses through one of a closed set of primitive
//! cell types: integers and reals with the MCNP `r`/`i`/`m`/`j`/`log`
//! shorthand forms, particle designators, ZAID nuclide identifiers,
//! distribution references, geometry expressions, and tuples of these. Each
//! cell type round-trips: rendering a parsed token gives its canonical
//! form, and re-parsing a render gives back an equal value.
//!
//! ## Advanced use
//!
//! Reading a whole deck is a one-liner, and from there the typed cards can
//! be inspected, filtered, or written back out:
//!
//! ```rust,ignore
//! // import the crate
//! use inpdeck::read_deck_lenient;
//!
//! // read the whole input file, keeping going past any bad cards
//! let deck = read_deck_lenient("./data/models/shield.inp").unwrap();
//!
//! // now do whatever you want with it:
//! //  - look up cards by identity,
//! //  - point a colleague at the exact bad line,
//! //  - write the canonical deck back out,
//! //  - etc...
//! println!("{} cards, {} skipped", deck.n_cards(), deck.skipped.len());
//! ```
//!
//! As an overview:
//! - The [card] module contains the primitive cell types and the three
//!   validated card shapes.
//! - The [schema] module holds the static card descriptions, the global
//!   registry, and the validator that turns tokens into records.
//! - The [readers] module deals with real files: comments, continuation
//!   lines, and the cell/surface/data block structure.
//! - The [deck] module is the container the readers fill and the writers
//!   drain.
//! - The [wrap] module applies the 80-column continuation conventions on
//!   output.
//!
//! In the background, the `nom` parser combinator library allows for some
//! extremely fast parsing, `clap` is used for the command line interfaces,
//! and `textwrap` handles the column limit.
//!
//! Parsing one card and rendering one record are independent, stateless
//! transformations. The only process-wide state is the schema registry,
//! populated once on first use and read-only afterwards, so decks may be
//! parsed from many threads without any locking.
//!
//! All of the useful functionality from the file readers and core data
//! structures are re-exported for convenience.

// Public facing modules
pub mod card;
pub mod deck;
pub mod error;
pub mod schema;
pub mod token;
pub mod utils;
pub mod wrap;

// note that docs are hidden to prevent confusing the current simple API
pub mod readers;

// Re-exports of useful data structures
#[doc(inline)]
pub use crate::deck::Deck;

#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::readers::{read_deck, read_deck_lenient};

#[doc(inline)]
pub use crate::schema::parse_card;

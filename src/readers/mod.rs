#![doc(hidden)]
//! Library of readers and common functions for INP files
//!
//! The [InpReader] handles everything outside the card grammar itself:
//! comment stripping, continuation joining, the title card, and the
//! blank-line block structure. The helpers here wrap it for the common
//! one-liner cases.

// internal modules
use crate::deck::Deck;

// standard library
use std::path::Path;

// external crates
use anyhow::Result;

// files under the readers module
mod inp_file;
pub mod parsers;

// inline important the reader for a nice API
#[doc(inline)]
pub use crate::readers::inp_file::InpReader;

/// Read a whole INP file, failing on the first invalid card
///
/// Returns a result containing the [Deck] extracted from the file at `path`
/// by the parser.
///
/// - `path` - Path to the input file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```ignore
/// // Read the whole deck, erroring out on any bad card
/// let deck: Deck = inpdeck::read_deck("path/to/model.inp")?;
/// ```
pub fn read_deck<P: AsRef<Path>>(path: P) -> Result<Deck> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = InpReader::new();
    reader.strict();
    reader.disable_progress();
    reader.parse(path)
}

/// Read a whole INP file, skipping any invalid cards
///
/// Same as [read_deck], but cards that fail validation are logged and kept
/// verbatim in [Deck::skipped] rather than aborting the read. Use this to
/// report every problem in a deck at once.
///
/// Example
/// ```ignore
/// // Keep going past bad cards and report them all afterwards
/// let deck = inpdeck::read_deck_lenient("path/to/model.inp")?;
/// for skipped in &deck.skipped {
///     eprintln!("line {}: {}", skipped.line, skipped.reason);
/// }
/// ```
pub fn read_deck_lenient<P: AsRef<Path>>(path: P) -> Result<Deck> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = InpReader::new();
    reader.disable_progress();
    reader.parse(path)
}

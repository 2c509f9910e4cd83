//! A reader for whole MCNP input files
//!
//! Reads an INP file into a [Deck]. The reader owns everything the card
//! grammar is specified not to care about: the title card, the optional
//! leading `message:` block, comment stripping, continuation joining, and
//! the blank-line delimited cell/surface/data block structure. Each logical
//! card is then handed to the matching validating parser.
//!
//! Notes:
//!     - both continuation forms are accepted on input, a trailing `&`
//!       marker or a following line indented five or more columns
//!     - comment lines inside a continuation run do not break the card
//!     - lenient mode logs and keeps any card that fails validation, so one
//!       bad card never loses the rest of the deck
//!
//! Example:
//! ```ignore
//!     let path = Path::new("model.inp");
//!     let mut reader = InpReader::new();
//!     let deck = reader.parse(path).unwrap();
//! ```

// internal modules
use crate::card::{CellCard, SurfaceCard};
use crate::deck::{Deck, SkippedCard};
use crate::readers::parsers;
use crate::schema;
use crate::token::{Delimiters, TokenQueue};
use crate::utils::f;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// external crates
use anyhow::{bail, Context, Result};
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, trace, warn};

/// Which deck block the reader is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Nothing read yet; the first line decides message block or title
    Start,
    /// Inside the `message:` block, which runs to a blank line
    Message,
    /// The single verbatim title card
    Title,
    /// Cell cards up to the first blank line
    Cells,
    /// Surface cards up to the second blank line
    Surfaces,
    /// Data cards to the end of the file
    Data,
}

/// A logical card being assembled from physical lines
#[derive(Debug)]
struct PendingCard {
    /// 1-based line number the card started on
    line: usize,
    /// Joined card text so far
    text: String,
    /// The last physical line ended with the `&` marker
    marker: bool,
}

/// A generalised reader for MCNP input files
///
/// Example:
/// ```ignore
///     let mut reader = InpReader::new();
///     reader.strict();
///     let deck = reader.parse(Path::new("model.inp")).unwrap();
/// ```
#[derive(Debug)]
pub struct InpReader {
    /// The deck being accumulated
    deck: Deck,
    /// Propagate the first card error instead of skipping
    strict: bool,
    /// Disable progress bar?
    disable_progress: bool,
    /// Current deck block
    block: Block,
    /// Card currently being assembled
    pending: Option<PendingCard>,
}

impl Default for InpReader {
    fn default() -> Self {
        Self {
            deck: Deck::default(),
            strict: false,
            disable_progress: false,
            block: Block::Start,
            pending: None,
        }
    }
}

/// High level methods
impl InpReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Fail on the first invalid card rather than skipping it
    pub fn strict(&mut self) {
        self.strict = true;
    }

    /// Do not print the progress indicators
    pub fn disable_progress(&mut self) {
        debug!("Progress bar disabled");
        self.disable_progress = true;
    }

    /// Parse a whole INP file into a [Deck]
    pub fn parse(&mut self, path: &Path) -> Result<Deck> {
        let file = File::open(path).with_context(|| f!("Could not open {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut progress_bar = self.init_progress_bar();

        debug!("Parsing deck {}", path.display());
        if !self.disable_progress {
            progress_bar.refresh()?;
        }

        for (index, line) in reader.lines().enumerate() {
            progress_bar.update(1).unwrap();
            let line = line?;
            self.digest(index + 1, &line)?;
        }
        self.finish()?;

        // need an extra line for clean spacing if the progress bar is printed
        if !self.disable_progress {
            eprintln!()
        }

        Ok(std::mem::take(&mut self.deck))
    }

    /// Parse already-loaded INP text into a [Deck]
    pub fn parse_text(&mut self, text: &str) -> Result<Deck> {
        for (index, line) in text.lines().enumerate() {
            self.digest(index + 1, line)?;
        }
        self.finish()?;
        Ok(std::mem::take(&mut self.deck))
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self) -> Bar {
        BarBuilder::default()
            .delay(0.0)
            .unit(" lines")
            .unit_scale(true)
            .disable(self.disable_progress)
            .build()
            .unwrap()
    }
}

/// Line-by-line card assembly
impl InpReader {
    /// Feed one physical line through the block state machine
    fn digest(&mut self, number: usize, line: &str) -> Result<()> {
        match self.block {
            Block::Start => {
                if parsers::is_message_block(line) {
                    trace!("[Message] {line}");
                    self.block = Block::Message;
                } else {
                    self.read_title(line);
                }
                Ok(())
            }
            Block::Message => {
                // the message block runs to its blank terminator
                if parsers::is_blank(line) {
                    self.block = Block::Title;
                }
                Ok(())
            }
            Block::Title => {
                self.read_title(line);
                Ok(())
            }
            _ => self.digest_card_line(number, line),
        }
    }

    /// The title card is kept verbatim, never tokenized
    fn read_title(&mut self, line: &str) {
        trace!("[Title] {line}");
        self.deck.title = Some(line.trim_end().to_string());
        self.block = Block::Cells;
    }

    /// Assemble logical cards inside the cell/surface/data blocks
    fn digest_card_line(&mut self, number: usize, line: &str) -> Result<()> {
        // comment lines never break a continuation run
        if parsers::is_comment_line(line) {
            trace!("[Comment] {line}");
            return Ok(());
        }

        let line = parsers::strip_trailing_comment(line);

        if parsers::is_blank(line) {
            self.flush()?;
            self.advance_block();
            return Ok(());
        }

        let continues = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.marker || parsers::is_continuation_line(line));
        let (text, marker) = parsers::split_continuation_marker(line);

        match (&mut self.pending, continues) {
            (Some(pending), true) => {
                // join point gets a single space
                pending.text.push(' ');
                pending.text.push_str(text.trim());
                pending.marker = marker;
            }
            _ => {
                self.flush()?;
                self.pending = Some(PendingCard {
                    line: number,
                    text: text.trim().to_string(),
                    marker,
                });
            }
        }
        Ok(())
    }

    /// Flush any last pending card at the end of the file
    fn finish(&mut self) -> Result<()> {
        self.flush()
    }

    /// Blank lines move cells -> surfaces -> data; extras are ignored
    fn advance_block(&mut self) {
        self.block = match self.block {
            Block::Cells => Block::Surfaces,
            Block::Surfaces => Block::Data,
            block => block,
        };
        trace!("[Block] now in {:?}", self.block);
    }

    /// Validate the assembled card and file it under the current block
    fn flush(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        trace!("[Card] {}", pending.text);

        let outcome = match self.block {
            Block::Cells => {
                let mut queue =
                    TokenQueue::tokenize(&pending.text, Delimiters::keyword_value());
                CellCard::parse(&mut queue).map(|card| self.deck.cells.push(card))
            }
            Block::Surfaces => {
                let mut queue = TokenQueue::tokenize(&pending.text, Delimiters::whitespace());
                SurfaceCard::parse(&mut queue).map(|card| self.deck.surfaces.push(card))
            }
            _ => schema::parse_card(&pending.text).map(|record| self.deck.data.push(record)),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(error) if self.strict => {
                bail!("line {}: {} in \"{}\"", pending.line, error, pending.text)
            }
            Err(error) => {
                warn!("Skipping line {}: {error}", pending.line);
                self.deck.skipped.push(SkippedCard {
                    line: pending.line,
                    text: pending.text,
                    reason: error.to_string(),
                });
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "\
simple test problem
c cell block
1 1 -18.7 -1 2 imp:n=1
99 0 1:-2 $ graveyard

c surface block
1 pz 10.0
2 so 25.0

mode n p
cf3 10 20 &
     30
e0 0.1 1.0
     10.0 100.0
";

    #[test]
    fn whole_deck_parses() {
        let deck = InpReader::new().parse_text(DECK).unwrap();
        assert_eq!(deck.title.as_deref(), Some("simple test problem"));
        assert_eq!(deck.cells.len(), 2);
        assert_eq!(deck.surfaces.len(), 2);
        assert_eq!(deck.data.len(), 3);
        assert!(deck.is_clean());
    }

    #[test]
    fn both_continuation_forms_join() {
        let deck = InpReader::new().parse_text(DECK).unwrap();
        let flagging = deck.data_card("cf3").unwrap();
        assert_eq!(flagging.to_string(), "cf3 10 20 30");

        let bins = deck.data_card("e0").unwrap();
        assert_eq!(bins.to_string(), "e0 0.1 1 10 100");
    }

    #[test]
    fn message_block_is_skipped() {
        let text = f!("message: datapath=/xs\n\n{DECK}");
        let deck = InpReader::new().parse_text(&text).unwrap();
        assert_eq!(deck.title.as_deref(), Some("simple test problem"));
        assert_eq!(deck.n_cards(), 7);
    }

    #[test]
    fn lenient_mode_skips_and_keeps_the_rest() {
        let text = DECK.replace("mode n p", "mode n zz");
        let deck = InpReader::new().parse_text(&text).unwrap();
        assert_eq!(deck.skipped.len(), 1);
        assert_eq!(deck.skipped[0].line, 10);
        assert_eq!(deck.data.len(), 2);
        assert_eq!(deck.cells.len(), 2);
    }

    #[test]
    fn strict_mode_propagates() {
        let text = DECK.replace("1 pz 10.0", "1 qq 10.0");
        let mut reader = InpReader::new();
        reader.strict();
        let result = reader.parse_text(&text);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("line 7"));
    }

    #[test]
    fn wrapped_long_card_rereads_identically() {
        let numbers = (1..=40).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let record = schema::parse_card(&f!("cf3 {numbers}")).unwrap();

        let wrapped = crate::wrap::wrap_card(&record.to_string());
        assert!(wrapped.lines().count() > 1);

        let deck_text = f!("wrap test\n\n\n{wrapped}\n");
        let deck = InpReader::new().parse_text(&deck_text).unwrap();
        assert_eq!(deck.data, [record]);
    }

    #[test]
    fn round_trip_through_display() {
        let deck = InpReader::new().parse_text(DECK).unwrap();
        let rendered = deck.to_string();
        let again = InpReader::new().parse_text(&rendered).unwrap();
        assert_eq!(again.cells, deck.cells);
        assert_eq!(again.surfaces, deck.surfaces);
        assert_eq!(again.data, deck.data);
    }
}

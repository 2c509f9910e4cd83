//! Continuation-line wrapping for card output
//!
//! MCNP reads 80-column records, so any rendered card longer than that must
//! be spread over continuation lines. MCNP accepts either a trailing `&`
//! marker or indenting the next physical line five or more columns; output
//! here always uses the five-space indent form, and only ever breaks at
//! token boundaries. Readers accept both forms on input.

// external crates
use textwrap::{Options, WordSplitter};

/// MCNP's column limit for input records
pub const MAX_LINE_WIDTH: usize = 80;

/// Continuation lines are indented five spaces
pub const CONTINUATION_INDENT: &str = "     ";

/// Wrap one rendered card to the MCNP column conventions
///
/// Tokens are never split; numbers like `1.0e-5` must survive intact, so
/// hyphen splitting is turned off explicitly.
///
/// ```rust
/// # use inpdeck::wrap::wrap_card;
/// assert_eq!(wrap_card("cf3 10 20 30"), "cf3 10 20 30");
/// ```
pub fn wrap_card(text: &str) -> String {
    let options = Options::new(MAX_LINE_WIDTH)
        .subsequent_indent(CONTINUATION_INDENT)
        .break_words(false)
        .word_splitter(WordSplitter::NoHyphenation);
    textwrap::fill(text, options)
}

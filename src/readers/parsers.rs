//! Line-shape helpers for the INP file reader
//!
//! Small checks and extractors applied to each physical line before cards
//! are assembled: comment stripping, continuation detection, and the
//! message-block prefix. The card-level grammar lives with the cell types
//! and schemas; these only classify raw lines.

// external crates
use nom::bytes::complete::tag_no_case;
use nom::character::complete::space0;
use nom::sequence::preceded;
use nom::IResult;

/// Columns an MCNP comment marker may occupy
const COMMENT_COLUMNS: usize = 5;

/// Continuation-by-indent threshold, in columns
pub const CONTINUATION_COLUMNS: usize = 5;

/// Full-line comments are a `c` in the first five columns followed by a
/// space or nothing at all
pub fn is_comment_line(line: &str) -> bool {
    let column = line.len() - line.trim_start_matches(' ').len();
    if column >= COMMENT_COLUMNS {
        return false;
    }
    let rest = &line[column..];
    matches!(rest.as_bytes().first(), Some(b'c') | Some(b'C'))
        && matches!(rest.as_bytes().get(1), None | Some(b' ') | Some(b'\t'))
}

/// Strip a trailing `$` comment, keeping the text before it
pub fn strip_trailing_comment(line: &str) -> &str {
    match line.split_once('$') {
        Some((text, _)) => text,
        None => line,
    }
}

/// Blank lines delimit the cell, surface, and data blocks
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A line indented five or more columns continues the previous card
pub fn is_continuation_line(line: &str) -> bool {
    !is_blank(line) && line.starts_with(&" ".repeat(CONTINUATION_COLUMNS))
}

/// A trailing `&` marks the card as continued on the next line
///
/// Returns the text without the marker when one is present.
pub fn split_continuation_marker(line: &str) -> (&str, bool) {
    match line.trim_end().strip_suffix('&') {
        Some(text) => (text, true),
        None => (line, false),
    }
}

/// Recognise the optional `message:` block header
pub fn message_block(line: &str) -> IResult<&str, &str> {
    preceded(space0, tag_no_case("message:"))(line)
}

/// Quick check for the message block header
pub fn is_message_block(line: &str) -> bool {
    message_block(line).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("c this is a comment", true)]
    #[case("C", true)]
    #[case("  c also a comment", true)]
    #[case("cf3 10 20 30", false)]
    #[case("cut:n j 0.0", false)]
    #[case("      c too deep to be a comment", false)]
    fn comment_lines(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_comment_line(line), expected);
    }

    #[test]
    fn trailing_comments_stripped() {
        assert_eq!(strip_trailing_comment("cf3 10 $ flagged cells"), "cf3 10 ");
        assert_eq!(strip_trailing_comment("cf3 10"), "cf3 10");
    }

    #[rstest]
    #[case("     10 20 30", true)]
    #[case("    10 20 30", false)]
    #[case("        ", false)]
    #[case("cf3 10", false)]
    fn continuation_by_indent(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_continuation_line(line), expected);
    }

    #[test]
    fn continuation_marker() {
        assert_eq!(split_continuation_marker("cf3 10 20 &"), ("cf3 10 20 ", true));
        assert_eq!(split_continuation_marker("cf3 10 20"), ("cf3 10 20", false));
    }

    #[rstest]
    #[case("message: datapath=/xs", true)]
    #[case("MESSAGE: continue", true)]
    #[case("cf3 10", false)]
    fn message_blocks(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_message_block(line), expected);
    }
}

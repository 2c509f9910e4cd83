//! Tokenizing of card text
//!
//! Converts the text of one logical card into an ordered queue of string
//! tokens. The text is expected to be already joined and de-commented by the
//! reader preprocessing (see [readers](crate::readers)), so this stage is a
//! pure function of the input and raises no errors of its own. An empty or
//! malformed queue is caught later by the schema matcher.
//!
//! MCNP input is case-insensitive, so tokens are folded to lower case here.
//! This defines the canonical form that rendered cards are compared against.

// standard library
use std::collections::VecDeque;

/// Token separator set for one card kind
///
/// Runs of whitespace always separate tokens. Some card kinds additionally
/// treat `:` or `=` as separators, e.g. the `keyword=value` pairs of source
/// definition cards and cell card parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delimiters {
    /// Also split tokens on `:`
    pub colon: bool,
    /// Also split tokens on `=`
    pub equals: bool,
}

impl Delimiters {
    /// Whitespace only, the MCNP default
    pub const fn whitespace() -> Self {
        Self {
            colon: false,
            equals: false,
        }
    }

    /// Whitespace plus `=`, used by cards with `keyword=value` pairs
    pub const fn keyword_value() -> Self {
        Self {
            colon: false,
            equals: true,
        }
    }
}

/// Ordered queue of card tokens, consumed strictly left to right
///
/// Tokens are popped during record construction and never re-inserted. A
/// non-empty leftover queue once a schema has filled all of its declared
/// fields is an [UnexpectedToken](crate::error::Error::UnexpectedToken)
/// condition, checked by the schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenQueue {
    tokens: VecDeque<String>,
}

impl TokenQueue {
    /// Split card text into a token queue using `delimiters`
    ///
    /// Tokens are folded to lower case. Delimiter characters are dropped,
    /// never kept as tokens themselves.
    ///
    /// ```rust
    /// # use inpdeck::token::{Delimiters, TokenQueue};
    /// let mut queue = TokenQueue::tokenize("CF3 10 20 30", Delimiters::whitespace());
    /// assert_eq!(queue.len(), 4);
    /// assert_eq!(queue.pop(), Some("cf3".to_string()));
    /// ```
    pub fn tokenize(text: &str, delimiters: Delimiters) -> Self {
        let mut tokens = VecDeque::new();

        for span in text.split_whitespace() {
            let mut current = String::new();
            for c in span.chars() {
                let is_delimiter =
                    (delimiters.colon && c == ':') || (delimiters.equals && c == '=');
                if is_delimiter {
                    if !current.is_empty() {
                        tokens.push_back(std::mem::take(&mut current));
                    }
                } else {
                    current.extend(c.to_lowercase());
                }
            }
            if !current.is_empty() {
                tokens.push_back(current);
            }
        }

        Self { tokens }
    }

    /// Next token without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.tokens.front().map(|t| t.as_str())
    }

    /// Consume and return the next token
    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Number of tokens remaining
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True once every token has been consumed
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cf3 10 20 30", &["cf3", "10", "20", "30"])]
    #[case("  mx5:n   1001  8016 ", &["mx5:n", "1001", "8016"])]
    #[case("TOTNU NO", &["totnu", "no"])]
    #[case("", &[])]
    fn whitespace_tokens(#[case] text: &str, #[case] expected: &[&str]) {
        let mut queue = TokenQueue::tokenize(text, Delimiters::whitespace());
        for token in expected {
            assert_eq!(queue.pop().as_deref(), Some(*token));
        }
        assert!(queue.is_empty());
    }

    #[rstest]
    #[case("sdef erg=d5 pos=0 0 0", &["sdef", "erg", "d5", "pos", "0", "0", "0"])]
    #[case("1 1 -18.7 -1 2 imp:n=1", &["1", "1", "-18.7", "-1", "2", "imp:n", "1"])]
    fn equals_delimiter(#[case] text: &str, #[case] expected: &[&str]) {
        let mut queue = TokenQueue::tokenize(text, Delimiters::keyword_value());
        for token in expected {
            assert_eq!(queue.pop().as_deref(), Some(*token));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn colon_delimiter_splits_designator() {
        let delimiters = Delimiters {
            colon: true,
            equals: false,
        };
        let mut queue = TokenQueue::tokenize("f4:n 1 2", delimiters);
        assert_eq!(queue.pop().as_deref(), Some("f4"));
        assert_eq!(queue.pop().as_deref(), Some("n"));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut queue = TokenQueue::tokenize("a b", Delimiters::whitespace());
        assert_eq!(queue.peek(), Some("a"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().as_deref(), Some("a"));
        assert_eq!(queue.len(), 1);
    }
}

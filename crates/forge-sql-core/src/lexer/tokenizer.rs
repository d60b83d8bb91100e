//! SQL tokenizer driving an ordered set of token rules.

use super::{Span, Token, TokenKind, TokenRules};

/// A lossless tokenizer over SQL text.
///
/// Every call to [`Iterator::next`] consumes at least one character, so
/// tokenization terminates on any input. Concatenating the lexemes of all
/// produced tokens yields the input exactly.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    /// The input text.
    input: &'a str,
    /// The current byte position.
    position: usize,
    /// Rules tried at each position, in priority order.
    rules: &'a TokenRules,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer for `input` using `rules`.
    #[must_use]
    pub const fn new(input: &'a str, rules: &'a TokenRules) -> Self {
        Self {
            input,
            position: 0,
            rules,
        }
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Rewinds to the start of the input.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Tokenizes the rest of the input.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Returns the significant tokens of the rest of the input.
    #[must_use]
    pub fn significant(&mut self) -> Vec<Token> {
        self.by_ref().filter(|t| !t.is_trivia()).collect()
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.position;
        let rest = self.input.get(start..).filter(|rest| !rest.is_empty())?;

        let (kind, len) = self.rules.matching(self.input, start).unwrap_or_else(|| {
            let width = rest.chars().next().map_or(1, char::len_utf8);
            (TokenKind::Unknown, width)
        });

        self.position = start + len;
        let span = Span::new(start, self.position);
        Some(Token::new(kind, span.slice(self.input), span))
    }
}

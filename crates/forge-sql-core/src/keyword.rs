//! Reserved-word tables.
//!
//! A table is read-only reference data loaded once per data source and
//! shared by reference between the keyword token rule and `is_keyword`
//! lookups.

use std::collections::HashSet;

/// Reserved words of the ANSI core grammar.
pub const ANSI_KEYWORDS: &str = include_str!("../keywords/ansi.txt");

/// A case-insensitive set of reserved words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTable {
    words: HashSet<String>,
}

impl KeywordTable {
    /// Parses a keyword list: one word per line, blank lines and `#` comments
    /// ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut table = Self::default();
        table.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        table
    }

    /// Adds words to the table.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_ascii_uppercase()));
    }

    /// Returns true if `word` is reserved (ASCII case-insensitive).
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Returns the number of reserved words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the table holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

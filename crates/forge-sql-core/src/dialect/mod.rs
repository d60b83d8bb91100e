//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`] is the
//! descriptor of one of them: its quote characters, its reserved words and the
//! structural features it supports. Rendering rules live in the matching
//! [`Precompiler`](crate::precompiler::Precompiler).

mod generic;

use std::fmt;

pub use generic::GenericDialect;

use crate::keyword::ANSI_KEYWORDS;
use crate::lexer::LexicalOptions;

/// Trait for SQL dialect descriptors.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect, as used in data source configuration.
    fn name(&self) -> &'static str;

    /// Returns the opening and closing identifier quote characters.
    fn identifier_quote(&self) -> (char, char) {
        ('"', '"')
    }

    /// Returns the string literal quotation mark.
    fn literal_quote(&self) -> char {
        '\''
    }

    /// Returns whether `#` starts a line comment.
    fn hash_comments(&self) -> bool {
        true
    }

    /// Returns whether a backslash escapes characters inside string literals.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Returns the reserved-word resource, one word per line.
    fn keyword_list(&self) -> &'static str {
        ANSI_KEYWORDS
    }

    /// Returns whether `UPDATE`/`DELETE` accept `ORDER BY` and `LIMIT`.
    fn supports_mutation_limit(&self) -> bool {
        false
    }

    /// Returns the lexical conventions used to build token rules.
    fn lexical_options(&self) -> LexicalOptions {
        LexicalOptions {
            identifier_quote: self.identifier_quote(),
            literal_quote: self.literal_quote(),
            hash_comments: self.hash_comments(),
            backslash_escapes: self.backslash_escapes(),
        }
    }

    /// Wraps a single, already sanitized name in the identifier quotes.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.identifier_quote();
        format!("{open}{name}{close}")
    }
}

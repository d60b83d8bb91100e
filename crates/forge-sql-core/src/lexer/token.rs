//! Token types produced by the tokenizer.

use std::fmt;

use serde::Serialize;

use super::Span;

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Bare or quoted identifier (e.g., `users`, `"user name"`).
    Identifier,
    /// Reserved word of the active dialect.
    Keyword,
    /// Quoted string literal (e.g., `'it''s'`).
    Literal,
    /// Decimal integer (e.g., `42`).
    Integer,
    /// Decimal real (e.g., `3.14`, `1e10`).
    Real,
    /// Hexadecimal integer (e.g., `0x1F`).
    Hexadecimal,
    /// Operator or punctuation (e.g., `<=`, `||`, `(`).
    Operator,
    /// Whitespace run or comment.
    Whitespace,
    /// `.`
    Dot,
    /// Bound parameter placeholder (e.g., `?`, `:id`).
    Parameter,
    /// Statement terminator `;`.
    Terminal,
    /// Malformed lexeme, such as an unterminated literal.
    Error,
    /// Character no rule recognizes.
    Unknown,
}

impl TokenKind {
    /// Returns the name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "IDENTIFIER",
            Self::Keyword => "KEYWORD",
            Self::Literal => "LITERAL",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Hexadecimal => "HEXADECIMAL",
            Self::Operator => "OPERATOR",
            Self::Whitespace => "WHITESPACE",
            Self::Dot => "DOT",
            Self::Parameter => "PARAMETER",
            Self::Terminal => "TERMINAL",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true for tokens that carry no meaning (whitespace and comments).
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme and its location in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The lexical class.
    pub kind: TokenKind,
    /// The exact text consumed from the input.
    pub lexeme: String,
    /// Where the lexeme sits in the input.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword)
    }

    /// Returns true if this token is whitespace or a comment.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

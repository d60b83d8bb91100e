//! SQL Tokenizer
//!
//! This module provides a hand-written, lossless tokenizer that classifies raw
//! SQL text into typed lexical tokens using an ordered set of token rules.

mod rules;
mod span;
mod token;
mod tokenizer;

pub use rules::{
    BlockCommentRule, KeywordRule, LexicalOptions, LineCommentRule, LiteralRule, NumberRule,
    OperatorRule, QuotedIdentifierRule, SymbolRule, TokenRule, TokenRules, WhitespaceRule,
};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;

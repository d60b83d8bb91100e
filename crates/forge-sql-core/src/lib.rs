//! # forge-sql-core
//!
//! A dialect-aware SQL statement builder.
//!
//! This crate provides:
//! - A hand-written, lossless tokenizer driven by ordered token rules
//! - A [`Precompiler`] trait that validates and renders identifiers, values,
//!   operators, joins and orderings for one dialect
//! - Statement builders ([`Select`], [`Insert`], [`Update`], [`Delete`]) that
//!   render their arguments as soon as they are given
//! - [`Expression`], a raw SQL fragment with named parameters
//!
//! Dialect crates (`forge-sql-sqlite`, `forge-sql-mysql`, `forge-sql-oracle`)
//! implement [`Dialect`] and [`Precompiler`] on top of this crate.
//!
//! ## Building statements
//!
//! ```rust
//! use std::sync::Arc;
//! use forge_sql_core::{Builder, DataSource, DataSourceConfig, GenericDialect, GenericPrecompiler, Update};
//!
//! let source = DataSource::new(DataSourceConfig::new("generic"), Arc::new(GenericDialect)).unwrap();
//! let mut update = Update::new(GenericPrecompiler::new(Arc::new(source)));
//! update
//!     .table("users", None).unwrap()
//!     .set("name", "'; DROP TABLE users; --").unwrap()
//!     .where_clause("id", "=", 1, "AND").unwrap();
//!
//! assert_eq!(
//!     update.statement(false).unwrap(),
//!     r#"UPDATE "users" SET "name" = '''; DROP TABLE users; --' WHERE "id" = 1"#
//! );
//! ```
//!
//! ## Tokenizing
//!
//! ```rust
//! use std::sync::Arc;
//! use forge_sql_core::{DataSource, DataSourceConfig, GenericDialect, TokenKind};
//!
//! let source = DataSource::new(DataSourceConfig::new("generic"), Arc::new(GenericDialect)).unwrap();
//! let tokens = source.tokenizer("SELECT a FROM t -- note").tokenize();
//!
//! assert_eq!(tokens[0].kind, TokenKind::Keyword);
//! let text: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
//! assert_eq!(text, "SELECT a FROM t -- note");
//! ```

pub mod builder;
pub mod command;
pub mod dialect;
pub mod error;
pub mod expression;
pub mod keyword;
pub mod lexer;
pub mod precompiler;
pub mod source;

pub use builder::{BitField, Builder, Delete, Insert, Select, ToValue, Update, Value};
pub use command::Command;
pub use dialect::{Dialect, GenericDialect};
pub use error::{Error, Result};
pub use expression::Expression;
pub use keyword::KeywordTable;
pub use lexer::{Span, Token, TokenKind, TokenRule, TokenRules, Tokenizer};
pub use precompiler::{GenericPrecompiler, Operand, OperatorGroup, Precompiler};
pub use source::{Connection, DataSource, DataSourceConfig, StandardQuoter};

//! Raw SQL fragments with named parameters.
//!
//! An [`Expression`] keeps its text untouched until it is compiled against a
//! precompiler. Placeholders are located with the data source's tokenizer, so
//! text inside string literals and comments is never substituted.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use forge_sql_core::{DataSource, DataSourceConfig, Expression, GenericDialect, GenericPrecompiler};
//!
//! let source = DataSource::new(DataSourceConfig::new("generic"), Arc::new(GenericDialect)).unwrap();
//! let precompiler = GenericPrecompiler::new(Arc::new(source));
//!
//! let expr = Expression::new("COALESCE(price, :fallback) > :min").param("fallback", 0).param(":min", 9.5);
//! assert_eq!(expr.compile(&precompiler).unwrap(), "COALESCE(price, 0) > 9.500000");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::builder::value::{ToValue, Value};
use crate::error::Result;
use crate::lexer::TokenKind;
use crate::precompiler::Precompiler;

/// Normalizes a parameter key to placeholder syntax (`id` becomes `:id`).
fn placeholder(key: &str) -> String {
    if key.starts_with(|c: char| matches!(c, ':' | '?' | '@')) {
        String::from(key)
    } else {
        format!(":{key}")
    }
}

/// A raw SQL fragment with named parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    text: String,
    params: BTreeMap<String, Value>,
}

impl Expression {
    /// Creates an expression from raw SQL.
    ///
    /// **Warning**: Only use this for SQL text that does not contain user
    /// input; bind user input as parameters instead.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
        }
    }

    /// Sets one parameter, replacing any previous value.
    #[must_use]
    pub fn param<T: ToValue>(mut self, key: &str, value: T) -> Self {
        self.bind(key, value);
        self
    }

    /// Sets one parameter in place, replacing any previous value.
    pub fn bind<T: ToValue>(&mut self, key: &str, value: T) -> &mut Self {
        self.params.insert(placeholder(key), value.to_value());
        self
    }

    /// Merges parameters; keys already bound keep their value.
    #[must_use]
    pub fn parameters<I, K, T>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: ToValue,
    {
        for (key, value) in params {
            self.params
                .entry(placeholder(key.as_ref()))
                .or_insert_with(|| value.to_value());
        }
        self
    }

    /// Returns the raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the bound parameters, keyed by placeholder.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    /// Renders the expression, substituting each bound placeholder with the
    /// precompiler's rendering of its value.
    ///
    /// # Errors
    ///
    /// Returns the precompiler's error if a bound value cannot be rendered.
    pub fn compile<P: Precompiler + ?Sized>(&self, precompiler: &P) -> Result<String> {
        if self.params.is_empty() {
            return Ok(self.text.clone());
        }
        let mut sql = String::with_capacity(self.text.len());
        for token in precompiler.data_source().tokenizer(&self.text) {
            match self.params.get(&token.lexeme) {
                Some(value) if token.kind == TokenKind::Parameter => {
                    sql.push_str(&precompiler.prepare_value(value, None)?);
                }
                _ => sql.push_str(&token.lexeme),
            }
        }
        Ok(sql)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

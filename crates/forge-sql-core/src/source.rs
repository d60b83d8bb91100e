//! Data source descriptors and configuration.
//!
//! A [`DataSource`] ties a dialect to its reserved-word table, its token rules
//! and the connection's string quoting primitive. It is created once by the
//! owning configuration layer and shared by reference (`Arc`) between every
//! precompiler bound to it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::keyword::KeywordTable;
use crate::lexer::{TokenRules, Tokenizer};

fn default_id() -> String {
    String::from("default")
}

/// Configuration of a data source, as read from a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Identifier of the data source.
    #[serde(default = "default_id")]
    pub id: String,
    /// Dialect name (e.g., `sqlite`, `mysql`, `oracle`).
    pub dialect: String,
    /// Server version, informational.
    #[serde(default)]
    pub version: Option<String>,
    /// Character set, informational.
    #[serde(default)]
    pub charset: Option<String>,
    /// Extra reserved words on top of the dialect's list.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DataSourceConfig {
    /// Creates a configuration for `dialect` with default settings.
    #[must_use]
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            id: default_id(),
            dialect: dialect.into(),
            version: None,
            charset: None,
            keywords: Vec::new(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed or misses `dialect`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The string escaping primitive of a live database connection.
pub trait Connection: fmt::Debug + Send + Sync {
    /// Escapes and quotes `value` as a string literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the connection cannot quote the value.
    fn quote(&self, value: &str) -> Result<String>;
}

/// Quotes strings by doubling embedded single quotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardQuoter;

impl Connection for StandardQuoter {
    fn quote(&self, value: &str) -> Result<String> {
        let escaped = value.replace('\'', "''");
        Ok(format!("'{escaped}'"))
    }
}

/// A configured dialect with its keyword table and quoting primitive.
#[derive(Debug)]
pub struct DataSource {
    config: DataSourceConfig,
    dialect: Arc<dyn Dialect>,
    keywords: Arc<KeywordTable>,
    rules: OnceLock<TokenRules>,
    connection: Arc<dyn Connection>,
}

impl DataSource {
    /// Binds `config` to `dialect`, loading the dialect's keyword list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialect`] if the configuration names another
    /// dialect.
    pub fn new(config: DataSourceConfig, dialect: Arc<dyn Dialect>) -> Result<Self> {
        if !config.dialect.eq_ignore_ascii_case(dialect.name()) {
            return Err(Error::UnsupportedDialect {
                expected: String::from(dialect.name()),
                found: config.dialect,
            });
        }

        let mut keywords = KeywordTable::parse(dialect.keyword_list());
        keywords.extend(&config.keywords);
        debug!(
            id = %config.id,
            dialect = dialect.name(),
            keywords = keywords.len(),
            "data source ready"
        );

        Ok(Self {
            config,
            dialect,
            keywords: Arc::new(keywords),
            rules: OnceLock::new(),
            connection: Arc::new(StandardQuoter),
        })
    }

    /// Replaces the quoting primitive with a live connection's.
    #[must_use]
    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.connection = connection;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// Returns the dialect descriptor.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the shared keyword table.
    #[must_use]
    pub fn keywords(&self) -> &Arc<KeywordTable> {
        &self.keywords
    }

    /// Returns the quoting primitive.
    #[must_use]
    pub fn connection(&self) -> &dyn Connection {
        self.connection.as_ref()
    }

    /// Returns true if `word` is reserved in this data source.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.is_keyword(word)
    }

    /// Returns the dialect's token rules, built on first use.
    pub fn token_rules(&self) -> &TokenRules {
        self.rules.get_or_init(|| {
            TokenRules::standard(self.dialect.lexical_options(), Arc::clone(&self.keywords))
        })
    }

    /// Creates a tokenizer for `input` using this data source's rules.
    #[must_use]
    pub fn tokenizer<'a>(&'a self, input: &'a str) -> Tokenizer<'a> {
        Tokenizer::new(input, self.token_rules())
    }
}

//! Oracle dialect implementation.

use forge_sql_core::dialect::Dialect;

/// Reserved words of Oracle Database.
pub const ORACLE_KEYWORDS: &str = include_str!("../keywords/oracle.txt");

/// Oracle dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn hash_comments(&self) -> bool {
        false
    }

    fn keyword_list(&self) -> &'static str {
        ORACLE_KEYWORDS
    }
}

//! SQLite dialect implementation.

use forge_sql_core::dialect::Dialect;

/// Reserved words of SQLite.
pub const SQLITE_KEYWORDS: &str = include_str!("../keywords/sqlite.txt");

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn hash_comments(&self) -> bool {
        false
    }

    fn keyword_list(&self) -> &'static str {
        SQLITE_KEYWORDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_sql_core::KeywordTable;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quote(), ('"', '"'));
        assert!(!dialect.hash_comments());
        assert!(!dialect.supports_mutation_limit());
    }

    #[test]
    fn test_sqlite_keywords() {
        let table = KeywordTable::parse(SQLITE_KEYWORDS);
        assert!(table.is_keyword("glob"));
        assert!(table.is_keyword("PRAGMA"));
        assert!(!table.is_keyword("users"));
    }
}

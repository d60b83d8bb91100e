//! MySQL dialect implementation.

use forge_sql_core::dialect::Dialect;

/// Reserved words of MySQL 8.0.
pub const MYSQL_KEYWORDS: &str = include_str!("../keywords/mysql.txt");

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> (char, char) {
        ('`', '`')
    }

    fn backslash_escapes(&self) -> bool {
        true
    }

    fn keyword_list(&self) -> &'static str {
        MYSQL_KEYWORDS
    }

    fn supports_mutation_limit(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.quote_identifier("users"), "`users`");
        assert!(dialect.hash_comments());
        assert!(dialect.backslash_escapes());
        assert!(dialect.supports_mutation_limit());
        assert!(dialect.lexical_options().backslash_escapes);
    }

    #[test]
    fn test_mysql_keywords() {
        let table = forge_sql_core::KeywordTable::parse(MYSQL_KEYWORDS);
        assert!(table.is_keyword("rlike"));
        assert!(table.is_keyword("ORDER"));
        assert!(!table.is_keyword("users"));
    }
}

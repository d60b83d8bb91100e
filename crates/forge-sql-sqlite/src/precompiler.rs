//! SQLite precompiler.

use std::sync::Arc;

use forge_sql_core::precompiler::standard_comparison;
use forge_sql_core::{BitField, DataSource, Precompiler};

/// A precompiler for SQLite.
///
/// SQLite has no `RIGHT` or `FULL` joins, adds the `GLOB`, `MATCH` and
/// `REGEXP` operators, has no bit literals, and needs a `LIMIT` whenever an
/// `OFFSET` is given.
#[derive(Debug, Clone)]
pub struct SqlitePrecompiler {
    source: Arc<DataSource>,
}

impl SqlitePrecompiler {
    /// Binds a precompiler to `source`.
    #[must_use]
    pub const fn new(source: Arc<DataSource>) -> Self {
        Self { source }
    }
}

impl Precompiler for SqlitePrecompiler {
    fn data_source(&self) -> &DataSource {
        &self.source
    }

    fn comparison_operator(&self, op: &str) -> Option<&'static str> {
        standard_comparison(op).or_else(|| match op {
            "GLOB" => Some("GLOB"),
            "NOT GLOB" => Some("NOT GLOB"),
            "MATCH" => Some("MATCH"),
            "NOT MATCH" => Some("NOT MATCH"),
            "REGEXP" => Some("REGEXP"),
            "NOT REGEXP" => Some("NOT REGEXP"),
            _ => None,
        })
    }

    fn set_operator(&self, op: &str) -> Option<&'static str> {
        match op {
            "UNION" => Some("UNION"),
            "UNION ALL" => Some("UNION ALL"),
            "INTERSECT" => Some("INTERSECT"),
            "EXCEPT" => Some("EXCEPT"),
            _ => None,
        }
    }

    fn join_type(&self, join: &str) -> Option<&'static str> {
        match join {
            "CROSS" => Some("CROSS JOIN"),
            "INNER" => Some("INNER JOIN"),
            "LEFT" => Some("LEFT JOIN"),
            "LEFT OUTER" => Some("LEFT OUTER JOIN"),
            "NATURAL" => Some("NATURAL JOIN"),
            "NATURAL INNER" => Some("NATURAL INNER JOIN"),
            "NATURAL LEFT" => Some("NATURAL LEFT JOIN"),
            "NATURAL LEFT OUTER" => Some("NATURAL LEFT OUTER JOIN"),
            _ => None,
        }
    }

    /// Bit fields become integers; wider fields fall back to a binary string.
    fn render_bits(&self, bits: &BitField) -> String {
        bits.to_u64()
            .map_or_else(|| format!("'{}'", bits.as_str()), |n| n.to_string())
    }

    fn paginate(&self, statement: String, limit: u64, offset: u64) -> String {
        let mut sql = statement;
        match (limit, offset) {
            (0, 0) => {}
            (0, offset) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (limit, 0) => sql.push_str(&format!(" LIMIT {limit}")),
            (limit, offset) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
        }
        sql
    }
}

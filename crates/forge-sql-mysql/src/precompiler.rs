//! MySQL precompiler.

use std::sync::Arc;

use forge_sql_core::precompiler::standard_comparison;
use forge_sql_core::{DataSource, Precompiler, Result};

/// Row count used when only an offset is given.
const MAX_ROWS: u64 = u64::MAX;

/// A precompiler for MySQL.
#[derive(Debug, Clone)]
pub struct MysqlPrecompiler {
    source: Arc<DataSource>,
}

impl MysqlPrecompiler {
    /// Binds a precompiler to `source`.
    #[must_use]
    pub const fn new(source: Arc<DataSource>) -> Self {
        Self { source }
    }
}

impl Precompiler for MysqlPrecompiler {
    fn data_source(&self) -> &DataSource {
        &self.source
    }

    fn comparison_operator(&self, op: &str) -> Option<&'static str> {
        standard_comparison(op).or_else(|| match op {
            "<=>" => Some("<=>"),
            "REGEXP" => Some("REGEXP"),
            "NOT REGEXP" => Some("NOT REGEXP"),
            "RLIKE" => Some("RLIKE"),
            "NOT RLIKE" => Some("NOT RLIKE"),
            _ => None,
        })
    }

    fn set_operator(&self, op: &str) -> Option<&'static str> {
        match op {
            "UNION" => Some("UNION"),
            "UNION ALL" => Some("UNION ALL"),
            "UNION DISTINCT" => Some("UNION DISTINCT"),
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
            "RIGHT" => Some("RIGHT JOIN"),
            "RIGHT OUTER" => Some("RIGHT OUTER JOIN"),
            "NATURAL" => Some("NATURAL JOIN"),
            "NATURAL LEFT" => Some("NATURAL LEFT JOIN"),
            "NATURAL LEFT OUTER" => Some("NATURAL LEFT OUTER JOIN"),
            "NATURAL RIGHT" => Some("NATURAL RIGHT JOIN"),
            "NATURAL RIGHT OUTER" => Some("NATURAL RIGHT OUTER JOIN"),
            "STRAIGHT" | "STRAIGHT_JOIN" => Some("STRAIGHT_JOIN"),
            _ => None,
        }
    }

    fn paginate(&self, statement: String, limit: u64, offset: u64) -> String {
        let mut sql = statement;
        match (limit, offset) {
            (0, 0) => {}
            (0, offset) => sql.push_str(&format!(" LIMIT {MAX_ROWS} OFFSET {offset}")),
            (limit, 0) => sql.push_str(&format!(" LIMIT {limit}")),
            (limit, offset) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
        }
        sql
    }

    fn render_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<String> {
        if columns.is_empty() {
            return Ok(format!("INSERT INTO {table} () VALUES ()"));
        }
        let rows: Vec<String> = rows
            .iter()
            .map(|row| format!("({})", row.join(", ")))
            .collect();
        Ok(format!(
            "INSERT INTO {table} ({}) VALUES {}",
            columns.join(", "),
            rows.join(", ")
        ))
    }
}

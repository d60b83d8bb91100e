//! Oracle precompiler.
//!
//! Oracle has no `LIMIT`/`OFFSET` clause before 12c, so a paginated select is
//! rewritten around the compiled statement. The first `n` rows are taken with
//! a single `ROWNUM` filter:
//!
//! ```sql
//! SELECT * FROM (<inner>) WHERE ROWNUM <= n
//! ```
//!
//! An offset needs the row number materialized in an intermediate select,
//! because `ROWNUM` is assigned as rows pass the filter and `ROWNUM > 1` never
//! holds:
//!
//! ```sql
//! SELECT * FROM (SELECT "t0".*, ROWNUM - 1 AS "__row" FROM (<inner>) "t0")
//! WHERE "__row" BETWEEN offset AND offset + n - 1
//! ```

use std::sync::Arc;

use forge_sql_core::precompiler::standard_comparison;
use forge_sql_core::{BitField, DataSource, Error, Precompiler, Result};
use tracing::trace;

/// Alias of the intermediate select in a paginated statement.
const INNER_ALIAS: &str = "\"t0\"";

/// Synthetic zero-based row number column.
const ROW_COLUMN: &str = "\"__row\"";

/// A precompiler for Oracle.
#[derive(Debug, Clone)]
pub struct OraclePrecompiler {
    source: Arc<DataSource>,
}

impl OraclePrecompiler {
    /// Binds a precompiler to `source`.
    #[must_use]
    pub const fn new(source: Arc<DataSource>) -> Self {
        Self { source }
    }
}

impl Precompiler for OraclePrecompiler {
    fn data_source(&self) -> &DataSource {
        &self.source
    }

    fn comparison_operator(&self, op: &str) -> Option<&'static str> {
        standard_comparison(op)
    }

    fn set_operator(&self, op: &str) -> Option<&'static str> {
        match op {
            "UNION" => Some("UNION"),
            "UNION ALL" => Some("UNION ALL"),
            "INTERSECT" => Some("INTERSECT"),
            "MINUS" | "EXCEPT" => Some("MINUS"),
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
            "FULL" => Some("FULL JOIN"),
            "FULL OUTER" => Some("FULL OUTER JOIN"),
            "NATURAL" => Some("NATURAL JOIN"),
            _ => None,
        }
    }

    fn render_bytes(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
        format!("HEXTORAW('{hex}')")
    }

    /// No bit literals; same integer fallback as SQLite.
    fn render_bits(&self, bits: &BitField) -> String {
        bits.to_u64()
            .map_or_else(|| format!("'{}'", bits.as_str()), |n| n.to_string())
    }

    /// Oracle does not accept `AS` before a table alias.
    fn table_alias(&self, table: &str, alias: &str) -> String {
        format!("{table} {alias}")
    }

    fn paginate(&self, statement: String, limit: u64, offset: u64) -> String {
        if limit == 0 && offset == 0 {
            return statement;
        }
        trace!(limit, offset, "rownum pagination applied");
        if offset == 0 {
            return format!("SELECT * FROM ({statement}) WHERE ROWNUM <= {limit}");
        }
        let numbered = format!(
            "SELECT {INNER_ALIAS}.*, ROWNUM - 1 AS {ROW_COLUMN} FROM ({statement}) {INNER_ALIAS}"
        );
        if limit == 0 {
            format!("SELECT * FROM ({numbered}) WHERE {ROW_COLUMN} >= {offset}")
        } else {
            let last = offset.saturating_add(limit - 1);
            format!("SELECT * FROM ({numbered}) WHERE {ROW_COLUMN} BETWEEN {offset} AND {last}")
        }
    }

    /// Several rows become one `INSERT ALL` over `dual`. Oracle has no
    /// insert without a column list.
    fn render_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<String> {
        if columns.is_empty() {
            return Err(Error::invalid("oracle needs at least one insert column", table));
        }
        let columns = columns.join(", ");
        if let [row] = rows {
            return Ok(format!("INSERT INTO {table} ({columns}) VALUES ({})", row.join(", ")));
        }
        let mut sql = String::from("INSERT ALL");
        for row in rows {
            sql.push_str(&format!(" INTO {table} ({columns}) VALUES ({})", row.join(", ")));
        }
        sql.push_str(" SELECT * FROM dual");
        Ok(sql)
    }
}

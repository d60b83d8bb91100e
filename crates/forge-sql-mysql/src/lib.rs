//! # forge-sql-mysql
//!
//! MySQL dialect for `forge-sql-core`.
//!
//! # How MySQL differs from other dialects
//!
//! - **Identifier quoting**: backticks (`` ` ``), unless `ANSI_QUOTES` is
//!   enabled on the server. See [identifiers].
//! - **String literals**: backslash is an escape character inside strings,
//!   so strings are quoted with [`MysqlQuoter`] rather than by doubling
//!   single quotes alone. See [string literals].
//! - **Operators**: `REGEXP`, `RLIKE` and the NULL-safe equality `<=>`.
//!   `UNION DISTINCT` is accepted as a set operator.
//! - **Joins**: `RIGHT [OUTER]` joins and the optimizer hint `STRAIGHT_JOIN`;
//!   no `FULL` outer join.
//! - **Pagination**: an offset without a limit uses the largest unsigned
//!   64-bit row count, as the [`SELECT` reference] recommends.
//! - **Mutations**: `UPDATE` and `DELETE` accept `ORDER BY` and `LIMIT`.
//! - **Comments**: `#` starts a line comment.
//!
//! [identifiers]: https://dev.mysql.com/doc/refman/8.0/en/identifiers.html
//! [string literals]: https://dev.mysql.com/doc/refman/8.0/en/string-literals.html
//! [`SELECT` reference]: https://dev.mysql.com/doc/refman/8.0/en/select.html
//!
//! ## Example
//!
//! ```rust
//! use forge_sql_core::{Builder, DataSourceConfig, Delete};
//!
//! let mut delete = Delete::new(forge_sql_mysql::precompiler(DataSourceConfig::new("mysql")).unwrap());
//! delete
//!     .from("jobs").unwrap()
//!     .where_clause("state", "=", "done", "AND").unwrap()
//!     .order_by("finished_at", "ASC", "").unwrap()
//!     .limit(100).unwrap();
//!
//! assert_eq!(
//!     delete.statement(true).unwrap(),
//!     "DELETE FROM `jobs` WHERE `state` = 'done' ORDER BY `finished_at` ASC LIMIT 100;"
//! );
//! ```

mod dialect;
mod precompiler;
mod quoter;

use std::sync::Arc;

use forge_sql_core::{DataSource, DataSourceConfig, Result};
use tracing::debug;

pub use dialect::{MysqlDialect, MYSQL_KEYWORDS};
pub use precompiler::MysqlPrecompiler;
pub use quoter::MysqlQuoter;

/// Binds `config` to the MySQL dialect, quoting strings with
/// [`MysqlQuoter`].
///
/// # Errors
///
/// Returns [`forge_sql_core::Error::UnsupportedDialect`] if `config` names
/// another dialect.
pub fn data_source(config: DataSourceConfig) -> Result<Arc<DataSource>> {
    let source =
        DataSource::new(config, Arc::new(MysqlDialect::new()))?.with_connection(Arc::new(MysqlQuoter));
    debug!(id = %source.config().id, "mysql data source bound");
    Ok(Arc::new(source))
}

/// Creates a precompiler over a new MySQL data source for `config`.
///
/// # Errors
///
/// Returns the error of [`data_source`].
pub fn precompiler(config: DataSourceConfig) -> Result<MysqlPrecompiler> {
    Ok(MysqlPrecompiler::new(data_source(config)?))
}

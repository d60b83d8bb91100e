//! # forge-sql-sqlite
//!
//! SQLite dialect for `forge-sql-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as the standard
//!   quoting style, though it also accepts backticks and square brackets. See
//!   [SQLite keywords].
//! - **Operators**: `GLOB`, `MATCH` and `REGEXP` (and their negations) are
//!   accepted as [comparison operators]. `MATCH` and `REGEXP` need an
//!   application-defined function at run time.
//! - **Joins**: no `RIGHT` or `FULL` outer joins; `NATURAL` joins combine with
//!   `INNER` and `LEFT [OUTER]`.
//! - **Pagination**: [`LIMIT`/`OFFSET`] are native, but an `OFFSET` requires a
//!   `LIMIT`, so an offset alone renders `LIMIT -1 OFFSET n`.
//! - **Bit fields**: there are no bit literals; bit fields render as integers.
//! - **Comments**: `#` does not start a comment.
//!
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//! [comparison operators]: https://www.sqlite.org/lang_expr.html#the_like_glob_regexp_match_and_extract_operators
//! [`LIMIT`/`OFFSET`]: https://www.sqlite.org/lang_select.html#the_limit_clause
//!
//! ## Example
//!
//! ```rust
//! use forge_sql_core::{Builder, DataSourceConfig, Select};
//!
//! let mut select = Select::new(forge_sql_sqlite::precompiler(DataSourceConfig::new("sqlite")).unwrap());
//! select
//!     .from("files", None).unwrap()
//!     .where_clause("path", "GLOB", "*.rs", "AND").unwrap()
//!     .offset(5);
//!
//! assert_eq!(
//!     select.statement(false).unwrap(),
//!     r#"SELECT * FROM "files" WHERE "path" GLOB '*.rs' LIMIT -1 OFFSET 5"#
//! );
//! ```

mod dialect;
mod precompiler;

use std::sync::Arc;

use forge_sql_core::{DataSource, DataSourceConfig, Result};
use tracing::debug;

pub use dialect::{SqliteDialect, SQLITE_KEYWORDS};
pub use precompiler::SqlitePrecompiler;

/// Binds `config` to the SQLite dialect.
///
/// # Errors
///
/// Returns [`forge_sql_core::Error::UnsupportedDialect`] if `config` names
/// another dialect.
pub fn data_source(config: DataSourceConfig) -> Result<Arc<DataSource>> {
    let source = DataSource::new(config, Arc::new(SqliteDialect::new()))?;
    debug!(id = %source.config().id, "sqlite data source bound");
    Ok(Arc::new(source))
}

/// Creates a precompiler over a new SQLite data source for `config`.
///
/// # Errors
///
/// Returns the error of [`data_source`].
pub fn precompiler(config: DataSourceConfig) -> Result<SqlitePrecompiler> {
    Ok(SqlitePrecompiler::new(data_source(config)?))
}

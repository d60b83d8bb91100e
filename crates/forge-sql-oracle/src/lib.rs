//! # forge-sql-oracle
//!
//! Oracle dialect for `forge-sql-core`.
//!
//! # How Oracle differs from other dialects
//!
//! - **Pagination**: there is no `LIMIT`/`OFFSET`; paginated selects are
//!   wrapped in `ROWNUM`-filtered selects (see [`OraclePrecompiler`]).
//! - **Set operators**: the difference operator is spelled `MINUS`; `EXCEPT`
//!   is accepted and rewritten.
//! - **Aliases**: table aliases take no `AS`.
//! - **Binary data**: byte strings render as `HEXTORAW('..')`.
//! - **Multi-row inserts**: rendered as `INSERT ALL ... SELECT * FROM dual`.
//! - **Mutations**: `UPDATE` and `DELETE` take no `ORDER BY` or `LIMIT`.
//!
//! See the [SQL language reference].
//!
//! [SQL language reference]: https://docs.oracle.com/en/database/oracle/oracle-database/19/sqlrf/
//!
//! ## Example
//!
//! ```rust
//! use forge_sql_core::{Builder, DataSourceConfig, Select};
//!
//! let mut select = Select::new(forge_sql_oracle::precompiler(DataSourceConfig::new("oracle")).unwrap());
//! select
//!     .column("e.ename", None).unwrap()
//!     .from("emp", Some("e")).unwrap()
//!     .order_by("e.sal", "DESC", "").unwrap()
//!     .limit(3);
//!
//! assert_eq!(
//!     select.statement(false).unwrap(),
//!     r#"SELECT * FROM (SELECT "e"."ename" FROM "emp" "e" ORDER BY "e"."sal" DESC) WHERE ROWNUM <= 3"#
//! );
//! ```

mod dialect;
mod precompiler;

use std::sync::Arc;

use forge_sql_core::{DataSource, DataSourceConfig, Result};
use tracing::debug;

pub use dialect::{OracleDialect, ORACLE_KEYWORDS};
pub use precompiler::OraclePrecompiler;

/// Binds `config` to the Oracle dialect.
///
/// # Errors
///
/// Returns [`forge_sql_core::Error::UnsupportedDialect`] if `config` names
/// another dialect.
pub fn data_source(config: DataSourceConfig) -> Result<Arc<DataSource>> {
    let source = DataSource::new(config, Arc::new(OracleDialect::new()))?;
    debug!(id = %source.config().id, "oracle data source bound");
    Ok(Arc::new(source))
}

/// Creates a precompiler over a new Oracle data source for `config`.
///
/// # Errors
///
/// Returns the error of [`data_source`].
pub fn precompiler(config: DataSourceConfig) -> Result<OraclePrecompiler> {
    Ok(OraclePrecompiler::new(data_source(config)?))
}

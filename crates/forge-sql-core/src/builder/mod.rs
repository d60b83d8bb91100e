//! Statement builders.
//!
//! Each builder owns a [`Precompiler`](crate::precompiler::Precompiler) and
//! renders every argument as soon as a clause method is called, so malformed
//! input fails at the offending call. Compiling only assembles the rendered
//! fragments in syntactic order.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use forge_sql_core::{Builder, DataSource, DataSourceConfig, GenericDialect, GenericPrecompiler, Select};
//!
//! let source = Arc::new(DataSource::new(DataSourceConfig::new("generic"), Arc::new(GenericDialect)).unwrap());
//! let mut select = Select::new(GenericPrecompiler::new(source));
//! select
//!     .column("id", None).unwrap()
//!     .from("users", None).unwrap()
//!     .where_clause("active", "=", true, "AND").unwrap()
//!     .limit(10);
//!
//! assert_eq!(
//!     select.statement(true).unwrap(),
//!     r#"SELECT "id" FROM "users" WHERE "active" = '1' LIMIT 10;"#
//! );
//! ```

mod clause;
mod delete;
mod insert;
mod select;
mod update;
pub mod value;

use tracing::debug;

pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;
pub use value::{BitField, ToValue, Value};

use crate::command::Command;
use crate::error::Result;

/// Shared surface of the statement builders.
pub trait Builder {
    /// Statement kind, for diagnostics.
    const KIND: &'static str;

    /// Assembles the rendered clauses into statement text, without terminator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) when a
    /// required clause (such as the target table) is missing.
    fn compile(&self) -> Result<String>;

    /// Clears every clause, returning the builder to its initial state.
    fn reset(&mut self) -> &mut Self;

    /// Returns the statement text, with `;` appended when `terminated`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Builder::compile`].
    fn statement(&self, terminated: bool) -> Result<String> {
        Ok(self.command(terminated)?.into_string())
    }

    /// Returns the compiled command.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Builder::compile`].
    fn command(&self, terminated: bool) -> Result<Command> {
        let sql = self.compile()?;
        debug!(kind = Self::KIND, len = sql.len(), "compiled statement");
        Ok(Command::new(sql, terminated))
    }
}

/// Renders a `ORDER BY` list, or nothing.
fn order_by_clause(order_by: &[String]) -> String {
    if order_by.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", order_by.join(", "))
    }
}

//! DELETE statement builder.

use super::clause::{condition, Conditions};
use super::update::ensure_mutation_limit;
use super::value::ToValue;
use super::{order_by_clause, Builder};
use crate::error::{Error, Result};
use crate::precompiler::{Operand, Precompiler};

#[derive(Debug, Clone, Default)]
struct DeleteClauses {
    table: Option<String>,
    where_: Conditions,
    order_by: Vec<String>,
    limit: u64,
}

/// A DELETE statement builder.
///
/// A statement without `WHERE` deletes every row; nothing guards against it.
#[derive(Debug, Clone)]
pub struct Delete<P: Precompiler> {
    precompiler: P,
    clauses: DeleteClauses,
}

impl<P: Precompiler> Delete<P> {
    /// Creates an empty DELETE builder bound to `precompiler`.
    #[must_use]
    pub fn new(precompiler: P) -> Self {
        Self {
            precompiler,
            clauses: DeleteClauses::default(),
        }
    }

    /// Returns the bound precompiler.
    #[must_use]
    pub const fn precompiler(&self) -> &P {
        &self.precompiler
    }

    /// Sets the target table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid identifier.
    pub fn from(&mut self, table: impl Into<Operand>) -> Result<&mut Self> {
        self.clauses.table = Some(self.precompiler.prepare_identifier(&table.into())?);
        Ok(self)
    }

    /// Adds a `WHERE` predicate joined to the previous one by `connector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid arguments.
    pub fn where_clause(
        &mut self,
        column: impl Into<Operand>,
        operator: &str,
        value: impl ToValue,
        connector: &str,
    ) -> Result<&mut Self> {
        let connector = self.precompiler.prepare_connector(connector)?;
        let predicate = condition(&self.precompiler, &column.into(), operator, &value.to_value())?;
        self.clauses.where_.push(connector, predicate);
        Ok(self)
    }

    /// Opens or closes a parenthesized `WHERE` group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid parentheses or connectors.
    pub fn where_block(&mut self, parenthesis: &str, connector: &str) -> Result<&mut Self> {
        let connector = self.precompiler.prepare_connector(connector)?;
        let parenthesis = self.precompiler.prepare_parenthesis(parenthesis)?;
        self.clauses.where_.push(connector, parenthesis);
        Ok(self)
    }

    /// Adds an ordering term, where the dialect allows ordered deletes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if unsupported, or for an invalid
    /// column.
    pub fn order_by(
        &mut self,
        column: impl Into<Operand>,
        ordering: &str,
        nulls: &str,
    ) -> Result<&mut Self> {
        ensure_mutation_limit(&self.precompiler, "ORDER BY")?;
        let term = self
            .precompiler
            .prepare_ordering(&column.into(), ordering, nulls)?;
        self.clauses.order_by.push(term);
        Ok(self)
    }

    /// Sets the row limit, where the dialect allows limited deletes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if unsupported.
    pub fn limit(&mut self, limit: i64) -> Result<&mut Self> {
        ensure_mutation_limit(&self.precompiler, "LIMIT")?;
        self.clauses.limit = self.precompiler.prepare_natural(limit);
        Ok(self)
    }
}

impl<P: Precompiler> Builder for Delete<P> {
    const KIND: &'static str = "DELETE";

    fn compile(&self) -> Result<String> {
        let clauses = &self.clauses;
        let table = clauses
            .table
            .as_deref()
            .ok_or_else(|| Error::invalid("DELETE needs a target table", ""))?;
        let mut sql = format!("DELETE FROM {table}");
        if !clauses.where_.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.where_.render());
        }
        sql.push_str(&order_by_clause(&clauses.order_by));
        if clauses.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", clauses.limit));
        }
        Ok(sql)
    }

    fn reset(&mut self) -> &mut Self {
        self.clauses = DeleteClauses::default();
        self
    }
}

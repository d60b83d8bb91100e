//! UPDATE statement builder.

use super::clause::{condition, Conditions};
use super::value::ToValue;
use super::{order_by_clause, Builder};
use crate::error::{Error, Result};
use crate::precompiler::{Operand, Precompiler};

#[derive(Debug, Clone, Default)]
struct UpdateClauses {
    table: Option<String>,
    assignments: Vec<String>,
    where_: Conditions,
    order_by: Vec<String>,
    limit: u64,
}

/// An UPDATE statement builder.
#[derive(Debug, Clone)]
pub struct Update<P: Precompiler> {
    precompiler: P,
    clauses: UpdateClauses,
}

impl<P: Precompiler> Update<P> {
    /// Creates an empty UPDATE builder bound to `precompiler`.
    #[must_use]
    pub fn new(precompiler: P) -> Self {
        Self {
            precompiler,
            clauses: UpdateClauses::default(),
        }
    }

    /// Returns the bound precompiler.
    #[must_use]
    pub const fn precompiler(&self) -> &P {
        &self.precompiler
    }

    /// Sets the target table, with an optional alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid identifiers or aliases.
    pub fn table(&mut self, table: impl Into<Operand>, alias: Option<&str>) -> Result<&mut Self> {
        let table = self.precompiler.prepare_identifier(&table.into())?;
        let table = match alias {
            Some(alias) => self
                .precompiler
                .table_alias(&table, &self.precompiler.prepare_alias(alias)?),
            None => table,
        };
        self.clauses.table = Some(table);
        Ok(self)
    }

    /// Adds an assignment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid columns or values.
    pub fn set(&mut self, column: impl Into<Operand>, value: impl ToValue) -> Result<&mut Self> {
        let column = self.precompiler.prepare_identifier(&column.into())?;
        let value = self.precompiler.prepare_value(&value.to_value(), None)?;
        self.clauses.assignments.push(format!("{column} = {value}"));
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

    /// Adds an ordering term, where the dialect allows ordered updates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the dialect does not support
    /// `ORDER BY` on `UPDATE`, or for an invalid column.
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

    /// Sets the row limit, where the dialect allows limited updates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the dialect does not support
    /// `LIMIT` on `UPDATE`.
    pub fn limit(&mut self, limit: i64) -> Result<&mut Self> {
        ensure_mutation_limit(&self.precompiler, "LIMIT")?;
        self.clauses.limit = self.precompiler.prepare_natural(limit);
        Ok(self)
    }
}

/// Fails unless the dialect accepts `ORDER BY`/`LIMIT` on mutations.
pub(super) fn ensure_mutation_limit<P: Precompiler + ?Sized>(
    precompiler: &P,
    clause: &str,
) -> Result<()> {
    let dialect = precompiler.dialect();
    if dialect.supports_mutation_limit() {
        Ok(())
    } else {
        Err(Error::invalid(
            format!("{} does not support this clause on mutations", dialect.name()),
            clause,
        ))
    }
}

impl<P: Precompiler> Builder for Update<P> {
    const KIND: &'static str = "UPDATE";

    fn compile(&self) -> Result<String> {
        let clauses = &self.clauses;
        let table = clauses
            .table
            .as_deref()
            .ok_or_else(|| Error::invalid("UPDATE needs a target table", ""))?;
        if clauses.assignments.is_empty() {
            return Err(Error::invalid("UPDATE needs at least one assignment", table));
        }
        let mut sql = format!("UPDATE {table} SET {}", clauses.assignments.join(", "));
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
        self.clauses = UpdateClauses::default();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precompiler::test_support::generic;
    use crate::precompiler::GenericPrecompiler;

    fn update() -> Update<GenericPrecompiler> {
        Update::new(generic())
    }

    #[test]
    fn test_update() {
        let mut u = update();
        u.table("users", None)
            .unwrap()
            .set("name", "O'Neil")
            .unwrap()
            .set("score", 1.25)
            .unwrap()
            .where_clause("id", "=", 7, "AND")
            .unwrap();
        assert_eq!(
            u.statement(true).unwrap(),
            "UPDATE \"users\" SET \"name\" = 'O''Neil', \"score\" = 1.250000 WHERE \"id\" = 7;"
        );
    }

    #[test]
    fn test_update_with_alias_and_block() {
        let mut u = update();
        u.table("users", Some("u"))
            .unwrap()
            .set("u.flag", false)
            .unwrap()
            .where_block("(", "AND")
            .unwrap()
            .where_clause("u.a", "IS", None::<i32>, "AND")
            .unwrap()
            .where_clause("u.b", "<>", 0, "OR")
            .unwrap()
            .where_block(")", "AND")
            .unwrap();
        assert_eq!(
            u.statement(false).unwrap(),
            "UPDATE \"users\" AS \"u\" SET \"u\".\"flag\" = '0' WHERE (\"u\".\"a\" IS NULL OR \"u\".\"b\" <> 0)"
        );
    }

    #[test]
    fn test_order_and_limit_rejected_without_support() {
        let mut u = update();
        assert!(u.order_by("id", "ASC", "").unwrap_err().is_invalid_argument());
        assert!(u.limit(1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_incomplete_update() {
        assert!(update().command(false).is_err());
        let mut u = update();
        u.table("t", None).unwrap();
        assert!(u.command(false).is_err());
    }
}

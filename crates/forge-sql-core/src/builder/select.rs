//! SELECT statement builder.

use tracing::trace;

use super::clause::{condition, Conditions};
use super::value::{ToValue, Value};
use super::{order_by_clause, Builder};
use crate::command::Command;
use crate::error::{Error, Result};
use crate::precompiler::{is_subselect, Operand, OperatorGroup, Precompiler};

/// How a join is constrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum JoinConstraint {
    /// No constraint (cross and natural joins).
    #[default]
    None,
    /// `ON` predicates, joined by `AND`.
    On(Vec<String>),
    /// `USING` columns.
    Using(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Join {
    clause: String,
    constraint: JoinConstraint,
}

impl Join {
    fn render(&self) -> String {
        match &self.constraint {
            JoinConstraint::None => self.clause.clone(),
            JoinConstraint::On(predicates) => {
                format!("{} ON {}", self.clause, predicates.join(" AND "))
            }
            JoinConstraint::Using(columns) => {
                format!("{} USING ({})", self.clause, columns.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SelectClauses {
    distinct: bool,
    columns: Vec<String>,
    from: Vec<String>,
    joins: Vec<Join>,
    where_: Conditions,
    group_by: Vec<String>,
    having: Conditions,
    combine: Vec<String>,
    order_by: Vec<String>,
    limit: u64,
    offset: u64,
}

/// A SELECT statement builder.
#[derive(Debug, Clone)]
pub struct Select<P: Precompiler> {
    precompiler: P,
    clauses: SelectClauses,
}

impl<P: Precompiler> Select<P> {
    /// Creates an empty SELECT builder bound to `precompiler`.
    #[must_use]
    pub fn new(precompiler: P) -> Self {
        Self {
            precompiler,
            clauses: SelectClauses::default(),
        }
    }

    /// Returns the bound precompiler.
    #[must_use]
    pub const fn precompiler(&self) -> &P {
        &self.precompiler
    }

    /// Sets or clears `DISTINCT`.
    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.clauses.distinct = distinct;
        self
    }

    /// Selects every column (`*`).
    pub fn all(&mut self) -> &mut Self {
        self.clauses.columns.push(String::from("*"));
        self
    }

    /// Adds a column with an optional alias. A name ending in `*` is rendered
    /// as a wildcard and takes no alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid identifiers or aliases.
    pub fn column(&mut self, column: impl Into<Operand>, alias: Option<&str>) -> Result<&mut Self> {
        let rendered = self.render_column(&column.into(), alias)?;
        self.clauses.columns.push(rendered);
        Ok(self)
    }

    /// Adds several columns without aliases. Nothing is added unless every
    /// column renders.
    ///
    /// # Errors
    ///
    /// Returns the error of the first invalid column.
    pub fn columns<I, T>(&mut self, columns: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        let rendered = columns
            .into_iter()
            .map(|column| self.render_column(&column.into(), None))
            .collect::<Result<Vec<_>>>()?;
        self.clauses.columns.extend(rendered);
        Ok(self)
    }

    fn render_column(&self, column: &Operand, alias: Option<&str>) -> Result<String> {
        Ok(match (column, alias) {
            (Operand::Name(name), None) if name.trim_end().ends_with('*') => {
                self.precompiler.prepare_wildcard(name)?
            }
            (Operand::Name(name), Some(alias)) if name.trim_end().ends_with('*') => {
                return Err(Error::invalid(
                    format!("wildcard cannot take alias `{alias}`"),
                    name,
                ));
            }
            (_, None) => self.precompiler.prepare_identifier(column)?,
            (_, Some(alias)) => format!(
                "{} AS {}",
                self.precompiler.prepare_identifier(column)?,
                self.precompiler.prepare_alias(alias)?
            ),
        })
    }

    /// Adds a source table or sub-query, with an optional alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid identifiers or aliases.
    pub fn from(&mut self, table: impl Into<Operand>, alias: Option<&str>) -> Result<&mut Self> {
        let table = self.table_reference(&table.into(), alias)?;
        self.clauses.from.push(table);
        Ok(self)
    }

    /// Adds a join of `table`. Without a join type the plain `JOIN` keyword is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for join types the dialect lacks and
    /// for invalid identifiers.
    pub fn join(
        &mut self,
        table: impl Into<Operand>,
        alias: Option<&str>,
        join_type: Option<&str>,
    ) -> Result<&mut Self> {
        let keyword = match join_type {
            Some(join_type) => self.precompiler.prepare_join(join_type)?,
            None => "JOIN",
        };
        let table = self.table_reference(&table.into(), alias)?;
        self.clauses.joins.push(Join {
            clause: format!("{keyword} {table}"),
            constraint: JoinConstraint::None,
        });
        Ok(self)
    }

    /// Adds an `ON` predicate comparing two columns to the last join.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without a preceding join, after
    /// [`Select::using`] on the same join, or for invalid arguments.
    pub fn on(
        &mut self,
        left: impl Into<Operand>,
        operator: &str,
        right: impl Into<Operand>,
    ) -> Result<&mut Self> {
        let predicate = format!(
            "{} {} {}",
            self.precompiler.prepare_identifier(&left.into())?,
            self.precompiler
                .prepare_operator(operator, OperatorGroup::Comparison)?,
            self.precompiler.prepare_identifier(&right.into())?
        );
        let join = self
            .clauses
            .joins
            .last_mut()
            .ok_or_else(|| Error::invalid("ON needs a preceding join", &predicate))?;
        match &mut join.constraint {
            constraint @ JoinConstraint::None => *constraint = JoinConstraint::On(vec![predicate]),
            JoinConstraint::On(predicates) => predicates.push(predicate),
            JoinConstraint::Using(_) => {
                return Err(Error::invalid("cannot mix ON with USING", predicate));
            }
        }
        Ok(self)
    }

    /// Adds a `USING` column to the last join.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without a preceding join, after
    /// [`Select::on`] on the same join, or for an invalid column.
    pub fn using(&mut self, column: impl Into<Operand>) -> Result<&mut Self> {
        let column = self.precompiler.prepare_identifier(&column.into())?;
        let join = self
            .clauses
            .joins
            .last_mut()
            .ok_or_else(|| Error::invalid("USING needs a preceding join", &column))?;
        match &mut join.constraint {
            constraint @ JoinConstraint::None => *constraint = JoinConstraint::Using(vec![column]),
            JoinConstraint::Using(columns) => columns.push(column),
            JoinConstraint::On(_) => {
                return Err(Error::invalid("cannot mix USING with ON", column));
            }
        }
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
        trace!(predicate = %predicate, "where");
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

    /// Adds a `GROUP BY` column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid column.
    pub fn group_by(&mut self, column: impl Into<Operand>) -> Result<&mut Self> {
        let column = self.precompiler.prepare_identifier(&column.into())?;
        self.clauses.group_by.push(column);
        Ok(self)
    }

    /// Adds a `HAVING` predicate joined to the previous one by `connector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid arguments.
    pub fn having(
        &mut self,
        column: impl Into<Operand>,
        operator: &str,
        value: impl ToValue,
        connector: &str,
    ) -> Result<&mut Self> {
        let connector = self.precompiler.prepare_connector(connector)?;
        let predicate = condition(&self.precompiler, &column.into(), operator, &value.to_value())?;
        self.clauses.having.push(connector, predicate);
        Ok(self)
    }

    /// Opens or closes a parenthesized `HAVING` group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid parentheses or connectors.
    pub fn having_block(&mut self, parenthesis: &str, connector: &str) -> Result<&mut Self> {
        let connector = self.precompiler.prepare_connector(connector)?;
        let parenthesis = self.precompiler.prepare_parenthesis(parenthesis)?;
        self.clauses.having.push(connector, parenthesis);
        Ok(self)
    }

    /// Combines with another select through a set operator.
    ///
    /// `statement` is a compiled sub-query, a raw expression, or text starting
    /// with `SELECT`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for operators outside the dialect's
    /// set group and for any other kind of statement.
    pub fn combine(&mut self, operator: &str, statement: impl ToValue) -> Result<&mut Self> {
        let operator = self.precompiler.prepare_operator(operator, OperatorGroup::Set)?;
        let body = match statement.to_value() {
            Value::Subquery(command) => String::from(command.body()),
            Value::Expression(expr) => expr.compile(&self.precompiler)?,
            Value::Text(text) if is_subselect(text.trim_start()) => {
                String::from(
                    text.trim_start()
                        .trim_end_matches(|c: char| c == ';' || c.is_whitespace()),
                )
            }
            other => {
                return Err(Error::invalid(
                    format!("{operator} needs a select statement"),
                    format!("{other:?}"),
                ));
            }
        };
        self.clauses.combine.push(format!("{operator} {body}"));
        Ok(self)
    }

    /// Adds an ordering term. See
    /// [`Precompiler::prepare_ordering`](crate::Precompiler::prepare_ordering).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid column.
    pub fn order_by(
        &mut self,
        column: impl Into<Operand>,
        ordering: &str,
        nulls: &str,
    ) -> Result<&mut Self> {
        let term = self
            .precompiler
            .prepare_ordering(&column.into(), ordering, nulls)?;
        self.clauses.order_by.push(term);
        Ok(self)
    }

    /// Sets the row limit; zero removes it. Negative values count by their
    /// magnitude.
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.clauses.limit = self.precompiler.prepare_natural(limit);
        self
    }

    /// Sets the number of rows skipped; zero removes it.
    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.clauses.offset = self.precompiler.prepare_natural(offset);
        self
    }

    /// Sets offset and limit at once.
    pub fn page(&mut self, offset: i64, limit: i64) -> &mut Self {
        self.offset(offset).limit(limit)
    }

    fn table_reference(&self, table: &Operand, alias: Option<&str>) -> Result<String> {
        let table = self.precompiler.prepare_identifier(table)?;
        Ok(match alias {
            Some(alias) => self
                .precompiler
                .table_alias(&table, &self.precompiler.prepare_alias(alias)?),
            None => table,
        })
    }
}

impl<P: Precompiler> Builder for Select<P> {
    const KIND: &'static str = "SELECT";

    fn compile(&self) -> Result<String> {
        let clauses = &self.clauses;
        let mut sql = String::from("SELECT");
        if clauses.distinct {
            sql.push_str(" DISTINCT");
        }
        if clauses.columns.is_empty() {
            sql.push_str(" *");
        } else {
            sql.push(' ');
            sql.push_str(&clauses.columns.join(", "));
        }
        if !clauses.from.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&clauses.from.join(", "));
        }
        for join in &clauses.joins {
            sql.push(' ');
            sql.push_str(&join.render());
        }
        if !clauses.where_.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.where_.render());
        }
        if !clauses.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&clauses.group_by.join(", "));
        }
        if !clauses.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&clauses.having.render());
        }
        for combine in &clauses.combine {
            sql.push(' ');
            sql.push_str(combine);
        }
        sql.push_str(&order_by_clause(&clauses.order_by));
        Ok(self
            .precompiler
            .paginate(sql, clauses.limit, clauses.offset))
    }

    fn reset(&mut self) -> &mut Self {
        self.clauses = SelectClauses::default();
        self
    }
}

impl<P: Precompiler> From<&Select<P>> for Operand {
    fn from(select: &Select<P>) -> Self {
        select.to_value().into()
    }
}

impl<P: Precompiler> ToValue for &Select<P> {
    /// Compiles the select as a sub-query. A select that cannot compile yields
    /// `NULL`.
    fn to_value(self) -> Value {
        self.compile()
            .map_or(Value::Null, |sql| Value::Subquery(Command::new(sql, false)))
    }
}

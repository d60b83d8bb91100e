//! INSERT statement builder.

use std::collections::BTreeMap;

use super::value::ToValue;
use super::Builder;
use crate::error::{Error, Result};
use crate::precompiler::{Operand, Precompiler};

#[derive(Debug, Clone, Default)]
struct InsertClauses {
    table: Option<String>,
    columns: Vec<String>,
    rows: Vec<BTreeMap<usize, String>>,
}

/// An INSERT statement builder.
///
/// Values are set cell by cell; a row may leave columns unset, which render
/// as `NULL`. Multi-row rendering is delegated to
/// [`Precompiler::render_insert`].
#[derive(Debug, Clone)]
pub struct Insert<P: Precompiler> {
    precompiler: P,
    clauses: InsertClauses,
}

impl<P: Precompiler> Insert<P> {
    /// Creates an empty INSERT builder bound to `precompiler`.
    #[must_use]
    pub fn new(precompiler: P) -> Self {
        Self {
            precompiler,
            clauses: InsertClauses::default(),
        }
    }

    /// Returns the bound precompiler.
    #[must_use]
    pub const fn precompiler(&self) -> &P {
        &self.precompiler
    }

    /// Sets the target table (the `INTO` clause).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid identifier.
    pub fn table(&mut self, table: impl Into<Operand>) -> Result<&mut Self> {
        self.clauses.table = Some(self.precompiler.prepare_identifier(&table.into())?);
        Ok(self)
    }

    /// Sets `column` on the first row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid columns or values.
    pub fn column(&mut self, column: impl Into<Operand>, value: impl ToValue) -> Result<&mut Self> {
        self.column_at(0, column, value)
    }

    /// Sets `column` on row `row`. `row` is an existing row, or the current
    /// row count to start a new one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid columns or values, and
    /// for a row past the end.
    pub fn column_at(
        &mut self,
        row: usize,
        column: impl Into<Operand>,
        value: impl ToValue,
    ) -> Result<&mut Self> {
        let rows = self.clauses.rows.len();
        if row > rows {
            return Err(Error::invalid(
                format!("row index out of range, the insert has {rows} rows"),
                row,
            ));
        }
        let (column, value) = self.render_cell(column.into(), value)?;
        self.store(row, column, value);
        Ok(self)
    }

    /// Appends a row of `(column, value)` pairs. Nothing is stored unless
    /// every pair renders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for invalid columns or values.
    pub fn row<I, C, V>(&mut self, pairs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<Operand>,
        V: ToValue,
    {
        let cells = pairs
            .into_iter()
            .map(|(column, value)| self.render_cell(column.into(), value))
            .collect::<Result<Vec<_>>>()?;
        let row = self.clauses.rows.len();
        self.clauses.rows.push(BTreeMap::new());
        for (column, value) in cells {
            self.store(row, column, value);
        }
        Ok(self)
    }

    fn render_cell(&self, column: Operand, value: impl ToValue) -> Result<(String, String)> {
        let column = self.precompiler.prepare_identifier(&column)?;
        let value = self.precompiler.prepare_value(&value.to_value(), None)?;
        Ok((column, value))
    }

    /// Stores a rendered cell; `row` is at most the current row count.
    fn store(&mut self, row: usize, column: String, value: String) {
        let index = match self.clauses.columns.iter().position(|c| *c == column) {
            Some(index) => index,
            None => {
                self.clauses.columns.push(column);
                self.clauses.columns.len() - 1
            }
        };
        if row == self.clauses.rows.len() {
            self.clauses.rows.push(BTreeMap::new());
        }
        if let Some(cells) = self.clauses.rows.get_mut(row) {
            cells.insert(index, value);
        }
    }
}

impl<P: Precompiler> Builder for Insert<P> {
    const KIND: &'static str = "INSERT";

    fn compile(&self) -> Result<String> {
        let table = self
            .clauses
            .table
            .as_deref()
            .ok_or_else(|| Error::invalid("INSERT needs a target table", ""))?;
        let rows: Vec<Vec<String>> = self
            .clauses
            .rows
            .iter()
            .map(|cells| {
                (0..self.clauses.columns.len())
                    .map(|index| {
                        cells
                            .get(&index)
                            .cloned()
                            .unwrap_or_else(|| String::from("NULL"))
                    })
                    .collect()
            })
            .collect();
        self.precompiler
            .render_insert(table, &self.clauses.columns, &rows)
    }

    fn reset(&mut self) -> &mut Self {
        self.clauses = InsertClauses::default();
        self
    }
}

//! Clause fragments shared by the statement builders.

use crate::builder::value::Value;
use crate::error::{Error, Result};
use crate::precompiler::{Operand, OperatorGroup, Precompiler};

/// A list of rendered predicates with their connectors, as used by `WHERE`
/// and `HAVING`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Conditions {
    entries: Vec<(&'static str, String)>,
}

impl Conditions {
    /// Appends a rendered predicate or parenthesis.
    pub(crate) fn push(&mut self, connector: &'static str, fragment: impl Into<String>) {
        self.entries.push((connector, fragment.into()));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Joins the entries. A connector is omitted right after an opening
    /// parenthesis and right before a closing one.
    pub(crate) fn render(&self) -> String {
        let mut sql = String::new();
        let mut previous: Option<&str> = None;
        for (connector, fragment) in &self.entries {
            if let Some(prev) = previous {
                if prev != "(" && fragment != ")" {
                    sql.push(' ');
                    sql.push_str(connector);
                    sql.push(' ');
                }
            }
            sql.push_str(fragment);
            previous = Some(fragment.as_str());
        }
        sql
    }
}

/// Renders `column operator value`, checking the value's shape for
/// `BETWEEN` and `IN`.
pub(crate) fn condition<P: Precompiler + ?Sized>(
    precompiler: &P,
    column: &Operand,
    operator: &str,
    value: &Value,
) -> Result<String> {
    let column = precompiler.prepare_identifier(column)?;
    let operator = precompiler.prepare_operator(operator, OperatorGroup::Comparison)?;
    match operator {
        "BETWEEN" | "NOT BETWEEN" => match value {
            Value::Array(bounds) if bounds.len() == 2 => Ok(format!(
                "{column} {operator} {} AND {}",
                precompiler.prepare_value(&bounds[0], None)?,
                precompiler.prepare_value(&bounds[1], None)?
            )),
            other => Err(Error::invalid(
                format!("{operator} needs an array of two bounds"),
                format!("{other:?}"),
            )),
        },
        "IN" | "NOT IN" => {
            let accepted = match value {
                Value::Array(items) => !items.is_empty(),
                Value::Subquery(_) | Value::Expression(_) => true,
                _ => false,
            };
            if !accepted {
                return Err(Error::invalid(
                    format!("{operator} needs a non-empty array or a sub-query"),
                    format!("{value:?}"),
                ));
            }
            Ok(format!(
                "{column} {operator} {}",
                precompiler.prepare_value(value, None)?
            ))
        }
        _ => Ok(format!(
            "{column} {operator} {}",
            precompiler.prepare_value(value, None)?
        )),
    }
}

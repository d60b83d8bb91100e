//! Per-dialect validation and rendering of builder tokens.
//!
//! A [`Precompiler`] is bound to one [`DataSource`] and turns builder-level
//! input (identifiers, values, operators, join types, orderings) into
//! dialect-correct SQL fragments. Every function either renders its input or
//! fails with [`Error::InvalidArgument`] echoing the offending token.
//!
//! Dialects implement the enumerations ([`Precompiler::comparison_operator`],
//! [`Precompiler::set_operator`], [`Precompiler::join_type`]) and override the
//! rendering hooks where their syntax differs; the shared rules are provided.

mod generic;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

pub use generic::GenericPrecompiler;

use crate::builder::value::{BitField, Value};
use crate::command::Command;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::source::DataSource;

/// Strings treated as literal sub-selects by [`Precompiler::prepare_identifier`].
static SUBSELECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^SELECT\b").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
});

/// Characters stripped from identifier segments and aliases.
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9$_ ]").unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
});

/// Strings rendered verbatim as dates (`YYYY-MM-DD[ HH:MM:SS]`).
static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}( [0-9]{2}:[0-9]{2}:[0-9]{2})?$")
        .unwrap_or_else(|e| unreachable!("invalid pattern: {e}"))
});

/// Returns true if `text` starts with the word `SELECT`.
pub(crate) fn is_subselect(text: &str) -> bool {
    SUBSELECT.is_match(text)
}

/// Removes every character outside `[A-Za-z0-9$_ ]`.
#[must_use]
pub fn sanitize(segment: &str) -> String {
    UNSAFE_CHARS.replace_all(segment, "").into_owned()
}

/// Upper-cases a token and collapses its inner whitespace.
#[must_use]
pub fn normalize(token: &str) -> String {
    token
        .split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Comparison operators shared by every dialect.
#[must_use]
pub fn standard_comparison(op: &str) -> Option<&'static str> {
    match op {
        "=" => Some("="),
        "<>" | "!=" => Some("<>"),
        "<" => Some("<"),
        "<=" => Some("<="),
        ">" => Some(">"),
        ">=" => Some(">="),
        "LIKE" => Some("LIKE"),
        "NOT LIKE" => Some("NOT LIKE"),
        "IN" => Some("IN"),
        "NOT IN" => Some("NOT IN"),
        "BETWEEN" => Some("BETWEEN"),
        "NOT BETWEEN" => Some("NOT BETWEEN"),
        "IS" => Some("IS"),
        "IS NOT" => Some("IS NOT"),
        _ => None,
    }
}

/// Operator families accepted by [`Precompiler::prepare_operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorGroup {
    /// Predicates between two operands.
    Comparison,
    /// Compound-select operators.
    Set,
}

impl OperatorGroup {
    /// Parses `COMPARISON` or `SET` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for any other name.
    pub fn parse(group: &str) -> Result<Self> {
        match normalize(group).as_str() {
            "COMPARISON" => Ok(Self::Comparison),
            "SET" => Ok(Self::Set),
            _ => Err(Error::invalid("unknown operator group", group)),
        }
    }

    /// Returns the group name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comparison => "COMPARISON",
            Self::Set => "SET",
        }
    }
}

impl fmt::Display for OperatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input accepted where an identifier is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Dotted name, or a literal sub-select starting with `SELECT`.
    Name(String),
    /// Raw SQL fragment.
    Expression(Expression),
    /// Compiled sub-select.
    Subquery(Command),
    /// Any value; only text, expressions and sub-queries are identifiers.
    Value(Value),
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for Operand {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for Operand {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Self::Expression(expr)
    }
}

impl From<Command> for Operand {
    fn from(command: Command) -> Self {
        Self::Subquery(command)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Validates and renders builder tokens for one dialect.
pub trait Precompiler: fmt::Debug {
    /// Returns the data source this precompiler is bound to.
    fn data_source(&self) -> &DataSource;

    /// Maps a normalized comparison operator to its canonical form.
    fn comparison_operator(&self, op: &str) -> Option<&'static str>;

    /// Maps a normalized set operator to its canonical form.
    fn set_operator(&self, op: &str) -> Option<&'static str>;

    /// Maps a normalized join type to the full join keyword phrase.
    fn join_type(&self, join: &str) -> Option<&'static str>;

    /// Returns the dialect descriptor.
    fn dialect(&self) -> &dyn Dialect {
        self.data_source().dialect()
    }

    /// Returns true if `word` is reserved in the bound data source.
    fn is_keyword(&self, word: &str) -> bool {
        self.data_source().is_keyword(word)
    }

    /// Renders a table or column reference.
    ///
    /// Sub-queries and expressions are rendered in parentheses. A string that
    /// starts with the word `SELECT` is taken as a literal sub-select and
    /// parenthesized verbatim. Any other string is split on `.`, each segment
    /// is stripped of characters outside `[A-Za-z0-9$_ ]` and quoted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for non-text values and names with no
    /// valid characters.
    fn prepare_identifier(&self, expr: &Operand) -> Result<String> {
        match expr {
            Operand::Name(name) => self.prepare_name(name),
            Operand::Expression(expr) => Ok(format!("({})", expr.compile(self)?)),
            Operand::Subquery(command) => Ok(format!("({})", command.body())),
            Operand::Value(Value::Text(name)) => self.prepare_name(name),
            Operand::Value(Value::Expression(expr)) => Ok(format!("({})", expr.compile(self)?)),
            Operand::Value(Value::Subquery(command)) => Ok(format!("({})", command.body())),
            Operand::Value(other) => Err(Error::invalid(
                format!("{} is not an identifier", other.type_name()),
                format!("{other:?}"),
            )),
        }
    }

    /// Renders a textual identifier; see [`Precompiler::prepare_identifier`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no segment survives sanitizing.
    fn prepare_name(&self, name: &str) -> Result<String> {
        if is_subselect(name) {
            warn!(statement = name, "treating string as a literal sub-select");
            let body = name.trim_end_matches(|c: char| c == ';' || c.is_whitespace());
            return Ok(format!("({body})"));
        }
        let segments: Vec<String> = name
            .split('.')
            .map(sanitize)
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.dialect().quote_identifier(&segment))
            .collect();
        if segments.is_empty() {
            return Err(Error::invalid("identifier has no valid characters", name));
        }
        Ok(segments.join("."))
    }

    /// Renders an alias: a single sanitized, quoted name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if nothing survives sanitizing.
    fn prepare_alias(&self, alias: &str) -> Result<String> {
        let clean = sanitize(alias);
        if clean.is_empty() {
            return Err(Error::invalid("alias has no valid characters", alias));
        }
        Ok(self.dialect().quote_identifier(&clean))
    }

    /// Renders a wildcard such as `*` or `t.*`; a trailing `*` is appended
    /// when the last segment is not one.
    ///
    /// # Errors
    ///
    /// Never fails for textual input; kept fallible for dialect overrides.
    fn prepare_wildcard(&self, expr: &str) -> Result<String> {
        let segments: Vec<&str> = expr.split('.').collect();
        let last = segments.len() - 1;
        let mut parts: Vec<String> = segments
            .iter()
            .enumerate()
            .filter(|(i, segment)| !(*i == last && segment.trim() == "*"))
            .map(|(_, segment)| sanitize(segment))
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.dialect().quote_identifier(&segment))
            .collect();
        parts.push(String::from("*"));
        Ok(parts.join("."))
    }

    /// Renders a value; `escape` adds an `ESCAPE` clause to quoted strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for non-finite doubles, or the
    /// connection's error when quoting a string fails.
    fn prepare_value(&self, value: &Value, escape: Option<char>) -> Result<String> {
        match value {
            Value::Null => Ok(String::from("NULL")),
            Value::Bool(true) => Ok(String::from("'1'")),
            Value::Bool(false) => Ok(String::from("'0'")),
            Value::Array(items) => {
                let rendered = items
                    .iter()
                    .map(|item| self.prepare_value(item, escape))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", rendered.join(", ")))
            }
            Value::Subquery(command) => Ok(format!("({})", command.body())),
            Value::Expression(expr) => expr.compile(self),
            Value::Bytes(bytes) => Ok(self.render_bytes(bytes)),
            Value::Bits(bits) => Ok(self.render_bits(bits)),
            Value::Object(text) | Value::Text(text) => self.prepare_string(text, escape),
            Value::Int(n) => Ok(n.to_string()),
            Value::Double(f) => self.render_double(*f),
        }
    }

    /// Renders a string value: date-like strings verbatim in quotes, the
    /// empty string as `''`, anything else through the connection's quoting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an escape character that would
    /// close its own literal, or the connection's error when quoting fails.
    fn prepare_string(&self, text: &str, escape: Option<char>) -> Result<String> {
        if let Some(c) = escape {
            if c == '\'' || (c == '\\' && self.dialect().backslash_escapes()) {
                return Err(Error::invalid("escape character would end its literal", c));
            }
        }
        if DATE_LIKE.is_match(text) {
            return Ok(format!("'{text}'"));
        }
        if text.is_empty() {
            return Ok(String::from("''"));
        }
        let quoted = self.data_source().connection().quote(text)?;
        Ok(match escape {
            Some(c) => format!("{quoted} ESCAPE '{c}'"),
            None => quoted,
        })
    }

    /// Renders a byte string as a hexadecimal literal.
    fn render_bytes(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
        format!("X'{hex}'")
    }

    /// Renders a bit field as a binary literal.
    fn render_bits(&self, bits: &BitField) -> String {
        format!("B'{}'", bits.as_str())
    }

    /// Renders a double in fixed-point notation with six decimals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for NaN and infinities.
    fn render_double(&self, value: f64) -> Result<String> {
        if !value.is_finite() {
            return Err(Error::invalid("double must be finite", value));
        }
        Ok(format!("{value:.6}"))
    }

    /// Validates an operator of `group`, returning its canonical spelling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for operators outside the dialect's
    /// set for `group`.
    fn prepare_operator(&self, op: &str, group: OperatorGroup) -> Result<&'static str> {
        let key = normalize(op);
        let found = match group {
            OperatorGroup::Comparison => self.comparison_operator(&key),
            OperatorGroup::Set => self.set_operator(&key),
        };
        found.ok_or_else(|| {
            Error::invalid(
                format!("unknown {} operator for {}", group, self.dialect().name()),
                op,
            )
        })
    }

    /// Validates a join type, returning the full join keyword phrase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for join types the dialect lacks.
    fn prepare_join(&self, join: &str) -> Result<&'static str> {
        self.join_type(&normalize(join)).ok_or_else(|| {
            Error::invalid(
                format!("unsupported join type for {}", self.dialect().name()),
                join,
            )
        })
    }

    /// Renders an ordering term. `ordering` defaults to `ASC` unless it reads
    /// `DESC`; `nulls` of `FIRST` or `LAST` prepends a tie-breaker column.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Precompiler::prepare_identifier`].
    fn prepare_ordering(&self, column: &Operand, ordering: &str, nulls: &str) -> Result<String> {
        let column = self.prepare_identifier(column)?;
        let ordering = if normalize(ordering) == "DESC" {
            "DESC"
        } else {
            "ASC"
        };
        Ok(match normalize(nulls).as_str() {
            "FIRST" => {
                format!("CASE WHEN {column} IS NULL THEN 0 ELSE 1 END, {column} {ordering}")
            }
            "LAST" => {
                format!("CASE WHEN {column} IS NULL THEN 1 ELSE 0 END, {column} {ordering}")
            }
            _ => format!("{column} {ordering}"),
        })
    }

    /// Validates a logical connector (`AND` or `OR`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for any other connector.
    fn prepare_connector(&self, connector: &str) -> Result<&'static str> {
        match normalize(connector).as_str() {
            "AND" => Ok("AND"),
            "OR" => Ok("OR"),
            _ => Err(Error::invalid("connector must be AND or OR", connector)),
        }
    }

    /// Validates a parenthesis literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for anything but `(` or `)`.
    fn prepare_parenthesis(&self, parenthesis: &str) -> Result<&'static str> {
        match parenthesis.trim() {
            "(" => Ok("("),
            ")" => Ok(")"),
            _ => Err(Error::invalid("parenthesis must be ( or )", parenthesis)),
        }
    }

    /// Coerces an integer to a natural number.
    fn prepare_natural(&self, n: i64) -> u64 {
        n.unsigned_abs()
    }

    /// Coerces a value to a boolean by truthiness.
    fn prepare_boolean(&self, value: &Value) -> bool {
        value.is_truthy()
    }

    /// Renders a table reference with an alias.
    fn table_alias(&self, table: &str, alias: &str) -> String {
        format!("{table} AS {alias}")
    }

    /// Applies `limit` and `offset` (zero meaning absent) to a compiled select.
    fn paginate(&self, statement: String, limit: u64, offset: u64) -> String {
        let mut sql = statement;
        if limit > 0 {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if offset > 0 {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql
    }

    /// Renders an insert of `rows` (each aligned with `columns`) into `table`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the dialect has no form for
    /// the given shape.
    fn render_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<String> {
        if columns.is_empty() {
            return Ok(format!("INSERT INTO {table} DEFAULT VALUES"));
        }
        let rows: Vec<String> = rows
            .iter()
            .map(|row| format!("({})", row.join(", ")))
            .collect();
        Ok(format!(
            "INSERT INTO {table} ({}) VALUES {}",
            columns.join(", "),
            rows.join(", ")
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("na;me\"--"), "name");
        assert_eq!(sanitize("$first name_1"), "$first name_1");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  not   like "), "NOT LIKE");
        assert_eq!(normalize("union\tall"), "UNION ALL");
    }

    #[test]
    fn test_operator_group_parse() {
        assert_eq!(OperatorGroup::parse("comparison").unwrap(), OperatorGroup::Comparison);
        assert_eq!(OperatorGroup::parse("SET").unwrap(), OperatorGroup::Set);
        assert!(OperatorGroup::parse("ARITHMETIC").is_err());
    }

    #[test]
    fn test_standard_comparison_aliases() {
        assert_eq!(standard_comparison("!="), Some("<>"));
        assert_eq!(standard_comparison("<>"), Some("<>"));
        assert_eq!(standard_comparison("GLOB"), None);
    }

    #[test]
    fn test_date_like() {
        assert!(DATE_LIKE.is_match("2024-01-31"));
        assert!(DATE_LIKE.is_match("2024-01-31 23:59:00"));
        assert!(!DATE_LIKE.is_match("2024-01-31T23:59:00"));
        assert!(!DATE_LIKE.is_match("31/01/2024"));
        assert!(!DATE_LIKE.is_match("２０２４-０１-３１"));
    }

    #[test]
    fn test_subselect_heuristic() {
        assert!(SUBSELECT.is_match("select 1"));
        assert!(SUBSELECT.is_match("SELECT\n*"));
        assert!(!SUBSELECT.is_match("selected_at"));
        assert!(!SUBSELECT.is_match(" SELECT 1"));
    }
}

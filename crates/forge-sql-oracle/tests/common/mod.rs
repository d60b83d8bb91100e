#![allow(dead_code)]

use forge_sql_core::{DataSourceConfig, Delete, Insert, Select, Update};
use forge_sql_oracle::OraclePrecompiler;

pub fn precompiler() -> OraclePrecompiler {
    forge_sql_oracle::precompiler(DataSourceConfig::new("oracle"))
        .unwrap_or_else(|e| panic!("Failed to build oracle precompiler: {e}"))
}

pub fn select() -> Select<OraclePrecompiler> {
    Select::new(precompiler())
}

pub fn insert() -> Insert<OraclePrecompiler> {
    Insert::new(precompiler())
}

pub fn update() -> Update<OraclePrecompiler> {
    Update::new(precompiler())
}

pub fn delete() -> Delete<OraclePrecompiler> {
    Delete::new(precompiler())
}

/// Applies the `ROWNUM` filter of a paginated statement to `rows`, which stand
/// for the ordered output of the inner select.
///
/// `ROWNUM` counts the rows that passed the filter so far, so `ROWNUM <= n`
/// keeps a prefix; a materialized `"__row"` column numbers every row.
pub fn apply_rownum_filter<T: Clone>(sql: &str, rows: &[T]) -> Vec<T> {
    let (_, filter) = sql
        .rsplit_once(" WHERE ")
        .unwrap_or_else(|| panic!("No outer filter in: {sql}"));
    let number = |text: &str| -> usize {
        text.trim()
            .parse()
            .unwrap_or_else(|e| panic!("Bad bound {text:?} in {sql}: {e}"))
    };
    if let Some(n) = filter.strip_prefix("ROWNUM <= ") {
        return rows.iter().take(number(n)).cloned().collect();
    }
    if let Some(bounds) = filter.strip_prefix("\"__row\" BETWEEN ") {
        let (low, high) = bounds
            .split_once(" AND ")
            .unwrap_or_else(|| panic!("Bad BETWEEN in: {sql}"));
        let (low, high) = (number(low), number(high));
        return rows
            .iter()
            .enumerate()
            .filter(|(row, _)| (low..=high).contains(row))
            .map(|(_, value)| value.clone())
            .collect();
    }
    if let Some(low) = filter.strip_prefix("\"__row\" >= ") {
        return rows.iter().skip(number(low)).cloned().collect();
    }
    panic!("Unrecognized filter {filter:?} in: {sql}");
}

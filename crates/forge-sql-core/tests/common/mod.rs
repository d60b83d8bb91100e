#![allow(dead_code)]

use std::sync::Arc;

use forge_sql_core::{
    DataSource, DataSourceConfig, Delete, GenericDialect, GenericPrecompiler, Insert, Select,
    Token, Update,
};

pub fn source() -> Arc<DataSource> {
    let source = DataSource::new(DataSourceConfig::new("generic"), Arc::new(GenericDialect))
        .unwrap_or_else(|e| panic!("Failed to build generic data source: {e}"));
    Arc::new(source)
}

pub fn precompiler() -> GenericPrecompiler {
    GenericPrecompiler::new(source())
}

pub fn select() -> Select<GenericPrecompiler> {
    Select::new(precompiler())
}

pub fn insert() -> Insert<GenericPrecompiler> {
    Insert::new(precompiler())
}

pub fn update() -> Update<GenericPrecompiler> {
    Update::new(precompiler())
}

pub fn delete() -> Delete<GenericPrecompiler> {
    Delete::new(precompiler())
}

pub fn tokenize(sql: &str) -> Vec<Token> {
    source().tokenizer(sql).tokenize()
}

/// Asserts that the lexemes of `sql` concatenate back to `sql`.
pub fn assert_lossless(sql: &str) {
    let rebuilt: String = tokenize(sql).iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(rebuilt, sql, "Tokenization is not lossless for: {sql:?}");
}

/// Routes compile logs to the test harness output; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Opens an in-memory DuckDB with a `people` table of ten rows.
pub fn duckdb() -> duckdb::Connection {
    init_tracing();
    let conn = duckdb::Connection::open_in_memory()
        .unwrap_or_else(|e| panic!("Failed to open DuckDB: {e}"));
    conn.execute_batch(
        "CREATE TABLE people (id BIGINT, name VARCHAR, age BIGINT, team VARCHAR);
         INSERT INTO people VALUES
             (1, 'Ann', 34, 'red'),
             (2, 'Bob', NULL, 'blue'),
             (3, 'Cid', 27, 'red'),
             (4, 'Dee', 45, 'green'),
             (5, 'O''Hara', 19, 'blue'),
             (6, 'Eve', NULL, 'red'),
             (7, 'Fay', 52, 'green'),
             (8, 'Gus', 23, 'blue'),
             (9, 'Hal', 38, 'red'),
             (10, 'Ivy', 61, 'blue');",
    )
    .unwrap_or_else(|e| panic!("Failed to create fixture: {e}"));
    conn
}

/// Runs `sql` and returns the first column of every row as integers.
pub fn query_ids(conn: &duckdb::Connection, sql: &str) -> Vec<i64> {
    let mut stmt = conn
        .prepare(sql)
        .unwrap_or_else(|e| panic!("Failed to prepare: {sql}\nError: {e}"));
    let rows = stmt
        .query_map([], |row| row.get::<_, i64>(0))
        .unwrap_or_else(|e| panic!("Failed to run: {sql}\nError: {e}"));
    let ids: Vec<i64> = rows
        .map(|r| r.unwrap_or_else(|e| panic!("Failed to read row: {e}")))
        .collect();
    ids
}

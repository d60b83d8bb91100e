#![allow(dead_code)]

use forge_sql_core::{DataSourceConfig, Delete, Insert, Select, Update};
use forge_sql_sqlite::SqlitePrecompiler;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub fn precompiler() -> SqlitePrecompiler {
    forge_sql_sqlite::precompiler(DataSourceConfig::new("sqlite"))
        .unwrap_or_else(|e| panic!("Failed to build sqlite precompiler: {e}"))
}

pub fn select() -> Select<SqlitePrecompiler> {
    Select::new(precompiler())
}

pub fn insert() -> Insert<SqlitePrecompiler> {
    Insert::new(precompiler())
}

pub fn update() -> Update<SqlitePrecompiler> {
    Update::new(precompiler())
}

pub fn delete() -> Delete<SqlitePrecompiler> {
    Delete::new(precompiler())
}

/// Opens a single-connection in-memory pool with a `books` table.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");
    sqlx::raw_sql(
        "CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT, year INTEGER, shelf TEXT);
         INSERT INTO books VALUES
             (1, 'Dune', 1965, 'sf'),
             (2, 'Emma', 1815, 'classic'),
             (3, 'Ubik', 1969, 'sf'),
             (4, 'Beloved', 1987, NULL),
             (5, 'Solaris', 1961, 'sf'),
             (6, 'Persuasion', 1817, 'classic'),
             (7, 'Neuromancer', 1984, 'sf');",
    )
    .execute(&pool)
    .await
    .expect("Failed to create fixture");
    pool
}

/// Runs `sql` and returns the first column of every row.
pub async fn fetch_ids(pool: &SqlitePool, sql: &str) -> Vec<i64> {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_all(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to run: {sql}\nError: {e}"))
}

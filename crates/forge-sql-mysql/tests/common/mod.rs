#![allow(dead_code)]

use std::sync::Arc;

use forge_sql_core::{DataSource, DataSourceConfig, Delete, Insert, Select, Update};
use forge_sql_mysql::MysqlPrecompiler;

pub fn config() -> DataSourceConfig {
    DataSourceConfig::new("mysql")
}

pub fn source() -> Arc<DataSource> {
    forge_sql_mysql::data_source(config())
        .unwrap_or_else(|e| panic!("Failed to build mysql data source: {e}"))
}

pub fn precompiler() -> MysqlPrecompiler {
    MysqlPrecompiler::new(source())
}

pub fn select() -> Select<MysqlPrecompiler> {
    Select::new(precompiler())
}

pub fn insert() -> Insert<MysqlPrecompiler> {
    Insert::new(precompiler())
}

pub fn update() -> Update<MysqlPrecompiler> {
    Update::new(precompiler())
}

pub fn delete() -> Delete<MysqlPrecompiler> {
    Delete::new(precompiler())
}

//! String quoting with MySQL's backslash escapes.

use forge_sql_core::source::Connection;
use forge_sql_core::Result;

/// Quotes strings the way `mysql_real_escape_string` does.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlQuoter;

impl Connection for MysqlQuoter {
    fn quote(&self, value: &str) -> Result<String> {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('\'');
        for c in value.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '\'' => quoted.push_str("\\'"),
                '"' => quoted.push_str("\\\""),
                '\0' => quoted.push_str("\\0"),
                '\n' => quoted.push_str("\\n"),
                '\r' => quoted.push_str("\\r"),
                '\x1a' => quoted.push_str("\\Z"),
                other => quoted.push(other),
            }
        }
        quoted.push('\'');
        Ok(quoted)
    }
}

//! ANSI precompiler.

use std::sync::Arc;

use super::{standard_comparison, Precompiler};
use crate::source::DataSource;

/// A precompiler for the generic (ANSI) dialect.
#[derive(Debug, Clone)]
pub struct GenericPrecompiler {
    source: Arc<DataSource>,
}

impl GenericPrecompiler {
    /// Binds a precompiler to `source`.
    #[must_use]
    pub const fn new(source: Arc<DataSource>) -> Self {
        Self { source }
    }
}

impl Precompiler for GenericPrecompiler {
    fn data_source(&self) -> &DataSource {
        &self.source
    }

    fn comparison_operator(&self, op: &str) -> Option<&'static str> {
        standard_comparison(op)
    }

    fn set_operator(&self, op: &str) -> Option<&'static str> {
        match op {
            "UNION" => Some("UNION"),
            "UNION ALL" => Some("UNION ALL"),
            "INTERSECT" => Some("INTERSECT"),
            "EXCEPT" => Some("EXCEPT"),
            _ => None,
        }
    }

    fn join_type(&self, join: &str) -> Option<&'static str> {
        match join {
            "CROSS" => Some("CROSS JOIN"),
            "INNER" => Some("INNER JOIN"),
            "LEFT" => Some("LEFT JOIN"),
            "LEFT OUTER" => Some("LEFT OUTER JOIN"),
            "RIGHT" => Some("RIGHT JOIN"),
            "RIGHT OUTER" => Some("RIGHT OUTER JOIN"),
            "FULL" => Some("FULL JOIN"),
            "FULL OUTER" => Some("FULL OUTER JOIN"),
            "NATURAL" => Some("NATURAL JOIN"),
            _ => None,
        }
    }
}

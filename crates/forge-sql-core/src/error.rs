//! Error types for statement building.

use thiserror::Error;

/// Errors raised while validating and rendering statement fragments.
#[derive(Debug, Error)]
pub enum Error {
    /// A token, value, operator, join type, parenthesis or connector fell
    /// outside its accepted domain.
    #[error("invalid argument: {message} (got `{token}`)")]
    InvalidArgument {
        /// What was expected.
        message: String,
        /// The offending input, echoed back for diagnosis.
        token: String,
    },

    /// The connection's quoting primitive failed.
    #[error("database error: {0}")]
    Database(String),

    /// Any other collaborator failure.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Malformed data source configuration.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration was handed to the wrong dialect.
    #[error("unsupported dialect: expected `{expected}`, found `{found}`")]
    UnsupportedDialect {
        /// The dialect the receiver implements.
        expected: String,
        /// The dialect named by the configuration.
        found: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    #[must_use]
    pub fn invalid(message: impl Into<String>, token: impl ToString) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            token: token.to_string(),
        }
    }

    /// Returns true for validation failures.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result type alias for statement building.
pub type Result<T> = std::result::Result<T, Error>;

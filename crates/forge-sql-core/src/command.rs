//! Compiled SQL commands.

use std::fmt;

/// A complete, compiled SQL statement.
///
/// Commands are produced whole by a builder and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    text: String,
    terminated: bool,
}

impl Command {
    /// Creates a command from compiled statement text, appending `;` when
    /// `terminated` is set.
    #[must_use]
    pub fn new(statement: impl Into<String>, terminated: bool) -> Self {
        let mut text = statement.into();
        if terminated {
            text.push(';');
        }
        Self { text, terminated }
    }

    /// Returns the full text, including any terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text without its terminator.
    #[must_use]
    pub fn body(&self) -> &str {
        if self.terminated {
            &self.text[..self.text.len() - 1]
        } else {
            &self.text
        }
    }

    /// Returns whether the command ends with `;`.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Consumes the command, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

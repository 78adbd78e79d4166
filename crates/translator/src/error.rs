//! Error types for VM translation.
//!
//! Both kinds are fatal: a translation run stops at the first bad line.

use thiserror::Error;

/// A problem with a single VM command, independent of where it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The unit name cannot prefix `static` symbols and labels.
    #[error("unit name '{name}' is not a valid name")]
    InvalidUnitName { name: String },

    /// The first field is not a VM command keyword.
    #[error("unknown command '{token}'")]
    UnknownCommand { token: String },

    /// The keyword is known but its operands are not acceptable.
    #[error("malformed command '{command}': {reason}")]
    MalformedCommand { command: String, reason: String },
}

impl CommandError {
    pub(crate) fn malformed(command: &str, reason: impl Into<String>) -> Self {
        CommandError::MalformedCommand {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// A [`CommandError`] located in a source unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{unit}:{line}: {source}")]
pub struct TranslateError {
    /// Name of the source unit (file stem).
    pub unit: String,
    /// 1-based line number within the unit, or 0 when the error is not
    /// tied to a line.
    pub line: usize,
    pub source: CommandError,
}

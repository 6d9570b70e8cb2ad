//! CLI-specific error types and exit codes.

use cellctl_core::ports::CellError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A lifecycle operation failed.
    #[error("could not {action} cell {cell}: {source}")]
    Operation {
        action: &'static str,
        cell: String,
        #[source]
        source: CellError,
    },

    /// Wiring the controller failed before any operation ran.
    #[error("{0}")]
    Core(String),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output could not be produced.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    pub fn operation(action: &'static str, cell: &str, source: CellError) -> Self {
        Self::Operation {
            action,
            cell: cell.to_owned(),
            source,
        }
    }

    /// Map error to exit code.
    ///
    /// - 0: Success
    /// - 1: Any failed operation or unusable configuration
    /// - 2: Misuse of the command line (matches clap's own usage errors)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2,
            Self::Operation { .. } | Self::Core(_) | Self::Config(_) | Self::Io(_) => 1,
        }
    }
}

impl From<CellError> for CliError {
    fn from(err: CellError) -> Self {
        match err {
            CellError::Configuration(msg) => Self::Config(msg),
            other => Self::Core(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.to_string())
    }
}

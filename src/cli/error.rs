//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Tree(e) => match e {
                TreeError::MalformedLine { .. }
                | TreeError::ConflictingParent { .. }
                | TreeError::Conversion { .. } => crate::exitcode::DATAERR,
                TreeError::NodeNotFound(_) => crate::exitcode::DATAERR,
                TreeError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    crate::exitcode::NOINPUT
                }
                TreeError::Io(_) => crate::exitcode::IOERR,
            },
        }
    }
}

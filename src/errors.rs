use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("malformed line ({reason}): {line}")]
    MalformedLine { line: String, reason: String },

    #[error("child {child} already has a different parent {existing}")]
    ConflictingParent { child: String, existing: String },

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("cannot convert name token {token:?}: {reason}")]
    Conversion { token: String, reason: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;

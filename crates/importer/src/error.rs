use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A user log is malformed.
    #[error("{0}")]
    ValidationError(String),

    /// A new daily entry was refused.
    #[error("{0}")]
    LogError(String),
}

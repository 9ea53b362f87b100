use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("duplicate id detected: {0}")]
    DuplicateId(String),

    #[error("invalid edge side: {0} (expected top, bottom, left or right)")]
    InvalidSide(String),

    #[error("invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no 'output' filename specified in JSON")]
    MissingOutput,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CanvasError> = std::result::Result<T, E>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: cannot parse '{token}' as a number")]
    Format { line: usize, token: String },

    #[error("Singular system: zero pivot in column {column}")]
    SingularPivot { column: usize },

    #[error("Malformed system: {rows}x{cols} matrix with right-hand side of length {rhs}")]
    DimensionMismatch { rows: usize, cols: usize, rhs: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FlowResult<T> = Result<T, FlowError>;

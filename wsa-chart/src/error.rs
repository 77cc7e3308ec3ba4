/// Error types for chart rendering and artifact storage
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// The plotting backend failed to draw
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    /// Writing the artifact to disk failed
    #[error("Failed to write chart artifact: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn drawing_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Drawing(err.to_string())
}

/// Type alias for Results using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;

/// Error types for supply curve computation
use thiserror::Error;

/// Main error type for curve parsing and extrapolation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Pressures make the exponent law undefined (non-positive base)
    #[error("Invalid supply curve: {0}")]
    InvalidCurve(String),

    /// A flow or pressure field is missing, null, or not a number
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl CurveError {
    /// Short machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CurveError::InvalidCurve(_) => "invalid_curve",
            CurveError::MalformedInput(_) => "malformed_input",
        }
    }
}

/// Type alias for Results using CurveError
pub type Result<T> = std::result::Result<T, CurveError>;

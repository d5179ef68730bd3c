//! Error types for swing_core

use thiserror::Error;

/// Geometry construction failures
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// The two lines never meet (or coincide), so no angle lies between them
    #[error("lines are parallel")]
    ParallelLines,

    /// A construction parameter was NaN or infinite
    #[error("non-finite {0}")]
    NonFinite(&'static str),
}

/// Result type for swing_core operations
pub type Result<T> = std::result::Result<T, GeometryError>;

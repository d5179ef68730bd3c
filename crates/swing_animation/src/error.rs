//! Error types for swing_animation

use thiserror::Error;

/// Errors raised while constructing animated objects
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A length or radius that must be strictly positive was not
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A parameter that must be finite was NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// A parameter was negative where zero is the smallest legal value
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

impl AnimationError {
    pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<()> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(AnimationError::NonPositive { field, value })
        }
    }

    pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(AnimationError::NonFinite { field, value })
        }
    }

    pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
        Self::check_finite(field, value)?;
        if value < 0.0 {
            Err(AnimationError::Negative { field, value })
        } else {
            Ok(())
        }
    }
}

/// Result type for swing_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

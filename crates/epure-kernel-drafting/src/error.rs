//! Error types for bend template construction.

use thiserror::Error;

/// Errors raised when bend parameters are rejected.
///
/// The construction itself never fails; degenerate geometry shows up as
/// missing primitives in the layout instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftingError {
    /// Bend angle outside the open interval (0°, 180°).
    #[error("bend angle must be strictly between 0 and 180 degrees, got {0}")]
    InvalidAngle(f64),

    /// Bend radius is zero, negative or not finite.
    #[error("bend radius must be positive, got {0} cm")]
    NonPositiveRadius(f64),

    /// Tube diameter is zero, negative or not finite.
    #[error("tube diameter must be positive, got {0} cm")]
    NonPositiveDiameter(f64),
}

/// Result type for drafting operations.
pub type Result<T> = std::result::Result<T, DraftingError>;

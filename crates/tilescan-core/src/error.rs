//! Error handling for tilescan core
//!
//! Unit handling is the only fallible operation at this layer.
//! All error types use `thiserror` for ergonomic error handling.

use crate::units::Units;
use thiserror::Error;

/// Core error type
///
/// Raised when a value cannot be interpreted as a stage length.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The unit tag is recognized but is not a length unit
    #[error("Unit '{unit}' is not a length unit")]
    UnsupportedUnit {
        /// The offending unit tag.
        unit: Units,
    },

    /// The unit name could not be parsed at all
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

//! Error types for the planner crate.
//!
//! Every planner error is a configuration error detected before any grid
//! point is computed.

use thiserror::Error;
use tilescan_core::{CoreError, Point2D};

/// Errors that can occur while planning a tile path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// The region corners are not ordered top-left / bottom-right.
    #[error("Invalid region: top_left {top_left} must be left of and above bottom_right {bottom_right}")]
    InvalidRegion {
        top_left: Point2D,
        bottom_right: Point2D,
    },

    /// A scalar parameter is out of its valid range.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The region unit is not a length unit.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(#[from] CoreError),
}

impl PlannerError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

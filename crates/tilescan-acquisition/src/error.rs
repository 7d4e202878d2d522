//! Error types for the acquisition crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while moving, capturing, or compositing.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The stage rejected or failed a move.
    #[error("Stage motion failed: {0}")]
    Motion(String),

    /// The camera failed to deliver a frame for a grid position.
    #[error("Capture failed at row {row}, column {column}: {reason}")]
    CaptureFailed {
        row: usize,
        column: usize,
        reason: String,
    },

    /// The camera reported an error outside the capture loop.
    #[error("Camera error: {0}")]
    Camera(String),

    /// Captured frames could not be combined.
    #[error("Composite error: {0}")]
    Composite(String),

    /// Image encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error while writing tiles.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for acquisition operations.
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

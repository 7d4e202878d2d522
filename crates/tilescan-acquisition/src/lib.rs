//! # tilescan acquisition
//!
//! Drives a stage and camera along a planned [`MotionPath`] and assembles the
//! captured frames.
//!
//! Supports:
//! - Stage and camera abstractions for real or simulated hardware
//! - Snake-order capture with per-tile PNG output
//! - Naive zero-overlap tiling of the captured grid
//!
//! [`MotionPath`]: tilescan_planner::MotionPath

pub mod capture;
pub mod compositor;
pub mod device;
pub mod error;
pub mod simulated;

pub use capture::{tile_file_name, TileCapture, TileGrid};
pub use compositor::{save_png, Compositor, NaiveTiler};
pub use device::{Camera, Frame, Stage};
pub use error::{AcquisitionError, AcquisitionResult};
pub use simulated::{SimulatedCamera, SimulatedStage, TravelLimits};

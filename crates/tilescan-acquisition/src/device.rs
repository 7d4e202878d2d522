//! Hardware abstractions.
//!
//! Real drivers live outside this workspace; anything that can move to an
//! absolute position in micrometres and hand back a frame can be scanned.

use crate::error::AcquisitionResult;
use tilescan_core::Point2D;

/// One captured camera frame (8-bit mono)
pub type Frame = image::GrayImage;

/// A motorized XY stage
pub trait Stage {
    /// Run the stage's homing cycle
    fn home(&mut self) -> AcquisitionResult<()>;

    /// Move to an absolute position in micrometres, blocking until settled
    fn move_absolute(&mut self, target: Point2D) -> AcquisitionResult<()>;
}

/// A camera that produces frames on demand
pub trait Camera {
    /// Frame width in pixels
    fn frame_width(&self) -> u32;

    /// Frame height in pixels
    fn frame_height(&self) -> u32;

    /// Capture the latest frame
    fn grab_frame(&mut self) -> AcquisitionResult<Frame>;
}

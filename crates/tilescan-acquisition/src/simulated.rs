//! Simulated hardware for dry runs and tests.

use crate::device::{Camera, Frame, Stage};
use crate::error::{AcquisitionError, AcquisitionResult};
use image::Luma;
use tilescan_core::Point2D;
use tracing::trace;

/// Rectangular travel range of a stage (um)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLimits {
    pub min: Point2D,
    pub max: Point2D,
}

impl TravelLimits {
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Whether `point` lies inside the range (edges included)
    pub fn contains(&self, point: Point2D) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// Stage that records every move instead of moving
#[derive(Debug, Clone, Default)]
pub struct SimulatedStage {
    position: Point2D,
    visited: Vec<Point2D>,
    homed: bool,
    limits: Option<TravelLimits>,
}

impl SimulatedStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject moves outside `limits`
    pub fn with_limits(mut self, limits: TravelLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    /// Every target reached so far, in order
    pub fn visited(&self) -> &[Point2D] {
        &self.visited
    }

    pub fn is_homed(&self) -> bool {
        self.homed
    }
}

impl Stage for SimulatedStage {
    fn home(&mut self) -> AcquisitionResult<()> {
        self.position = Point2D::default();
        self.homed = true;
        Ok(())
    }

    fn move_absolute(&mut self, target: Point2D) -> AcquisitionResult<()> {
        if let Some(limits) = &self.limits {
            if !limits.contains(target) {
                return Err(AcquisitionError::Motion(format!(
                    "target {} outside travel range {} to {}",
                    target, limits.min, limits.max
                )));
            }
        }
        trace!("Simulated stage at {}", target);
        self.position = target;
        self.visited.push(target);
        Ok(())
    }
}

/// Camera producing deterministic synthetic frames
#[derive(Debug, Clone)]
pub struct SimulatedCamera {
    width: u32,
    height: u32,
    frames_captured: usize,
    fail_after: Option<usize>,
}

impl SimulatedCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames_captured: 0,
            fail_after: None,
        }
    }

    /// Fail every grab after `frames` successful ones
    pub fn fail_after(mut self, frames: usize) -> Self {
        self.fail_after = Some(frames);
        self
    }

    pub fn frames_captured(&self) -> usize {
        self.frames_captured
    }

    /// Pixel value every frame `index` is filled with
    pub fn frame_value(index: usize) -> u8 {
        (index % 256) as u8
    }
}

impl Camera for SimulatedCamera {
    fn frame_width(&self) -> u32 {
        self.width
    }

    fn frame_height(&self) -> u32 {
        self.height
    }

    fn grab_frame(&mut self) -> AcquisitionResult<Frame> {
        if self.fail_after.is_some_and(|n| self.frames_captured >= n) {
            return Err(AcquisitionError::Camera(
                "simulated camera failed to capture image".to_string(),
            ));
        }
        let value = Self::frame_value(self.frames_captured);
        self.frames_captured += 1;
        Ok(Frame::from_pixel(self.width, self.height, Luma([value])))
    }
}

//! Snake tile path generation.
//!
//! Produces the stage targets for tiling a rectangular region with camera
//! frames that overlap their neighbours by a requested fraction. Rows are
//! visited top to bottom and alternate direction, and every target is placed
//! along the camera's horizontal axis rather than the stage's, which undoes a
//! rotated sensor mount.

use crate::coverage::AxisPlan;
use crate::error::{PlannerError, PlannerResult};
use crate::motion_path::MotionPath;
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};
use tilescan_core::{convert_point_to_microns, Point2D, Units};
use tracing::{debug, info};

/// Parameters for a single snake path plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakePathParameters {
    /// Upper-left corner of the region (in `units`)
    pub top_left: Point2D,
    /// Lower-right corner of the region (in `units`)
    pub bottom_right: Point2D,
    /// Unit of both corners
    pub units: Units,
    /// Width of the sample covered by one frame (um)
    pub frame_width_um: f64,
    /// Height of the sample covered by one frame (um)
    pub frame_height_um: f64,
    /// Fraction of a frame shared with its horizontal neighbour, in [0, 1)
    pub overlap_h: f64,
    /// Fraction of a frame shared with its vertical neighbour, in [0, 1)
    pub overlap_v: f64,
    /// Camera sensor rotation relative to the stage axes (radians)
    pub rotation_rad: f64,
}

impl SnakePathParameters {
    /// Check every precondition of [`plan_snake`]
    pub fn validate(&self) -> PlannerResult<()> {
        check_positive("frame_width_um", self.frame_width_um)?;
        check_positive("frame_height_um", self.frame_height_um)?;
        check_overlap("overlap_h", self.overlap_h)?;
        check_overlap("overlap_v", self.overlap_v)?;

        if !self.rotation_rad.is_finite() {
            return Err(PlannerError::invalid_parameter(
                "rotation_rad",
                format!("must be finite, got {}", self.rotation_rad),
            ));
        }
        if !self.top_left.is_finite() || !self.bottom_right.is_finite() {
            return Err(PlannerError::invalid_parameter(
                "region",
                format!(
                    "corners must be finite, got {} and {}",
                    self.top_left, self.bottom_right
                ),
            ));
        }

        if self.top_left.x > self.bottom_right.x || self.top_left.y < self.bottom_right.y {
            return Err(PlannerError::InvalidRegion {
                top_left: self.top_left,
                bottom_right: self.bottom_right,
            });
        }

        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> PlannerResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::invalid_parameter(
            name,
            format!("must be a positive length, got {}", value),
        ))
    }
}

fn check_overlap(name: &str, value: f64) -> PlannerResult<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(PlannerError::invalid_parameter(
            name,
            format!("must be in [0, 1), got {}", value),
        ))
    }
}

/// Largest number of frames a single plan may contain
pub const MAX_FRAMES: usize = 1_000_000;

fn axis_plan(name: &str, step_um: f64, extent_um: f64) -> PlannerResult<AxisPlan> {
    AxisPlan::checked(step_um, extent_um, MAX_FRAMES).ok_or_else(|| {
        PlannerError::invalid_parameter(
            name,
            format!(
                "{} um cannot be covered in at most {} steps of {} um",
                extent_um, MAX_FRAMES, step_um
            ),
        )
    })
}

/// Plan a snake path over the region described by `params`.
///
/// All validation happens before any point is generated; on error no path
/// is produced.
pub fn plan_snake(params: &SnakePathParameters) -> PlannerResult<MotionPath> {
    build_path(params, &Rotation2::new(params.rotation_rad))
}

fn build_path(params: &SnakePathParameters, rotation: &Rotation2<f64>) -> PlannerResult<MotionPath> {
    params.validate()?;

    let top_left = convert_point_to_microns(params.top_left, params.units)?;
    let bottom_right = convert_point_to_microns(params.bottom_right, params.units)?;
    if !top_left.is_finite() || !bottom_right.is_finite() {
        return Err(PlannerError::invalid_parameter(
            "region",
            format!(
                "corners overflow when converted to um ({} and {} {})",
                params.top_left, params.bottom_right, params.units
            ),
        ));
    }

    let x = axis_plan(
        "region width",
        (1.0 - params.overlap_h) * params.frame_width_um,
        bottom_right.x - top_left.x,
    )?;
    let y = axis_plan(
        "region height",
        (1.0 - params.overlap_v) * params.frame_height_um,
        top_left.y - bottom_right.y,
    )?;
    if x.steps.checked_mul(y.steps).filter(|&frames| frames <= MAX_FRAMES).is_none() {
        return Err(PlannerError::invalid_parameter(
            "region",
            format!(
                "{} x {} frames exceeds the limit of {}",
                x.steps, y.steps, MAX_FRAMES
            ),
        ));
    }
    debug!(
        "x axis: extent {:.3} um, step {:.3} um, {} steps, coverage {:.3} um",
        x.extent_um, x.step_um, x.steps, x.coverage_um
    );
    debug!(
        "y axis: extent {:.3} um, step {:.3} um, {} steps, coverage {:.3} um",
        y.extent_um, y.step_um, y.steps, y.coverage_um
    );

    // Push the excess coverage out equally on both edges. y grows upward, so
    // the top edge moves up and the rows march down from there.
    let x_left = top_left.x - x.margin_um;
    let x_right = bottom_right.x + x.margin_um;
    let y_top = top_left.y + y.margin_um;

    let rows: Vec<Vec<Point2D>> = (0..y.steps)
        .map(|row| {
            let y_pos = y_top - row as f64 * y.step_um;
            (0..x.steps)
                .map(|col| {
                    let x_pos = if row % 2 == 0 {
                        x_left + col as f64 * x.step_um
                    } else {
                        x_right - col as f64 * x.step_um
                    };
                    // Rotate the offset from the row's left reference, never
                    // the absolute position.
                    let offset = rotation * Vector2::new(x_pos - x_left, 0.0);
                    Point2D::new(x_left + offset.x, y_pos + offset.y)
                })
                .collect()
        })
        .collect();

    info!(
        "Planned snake path: {} rows x {} columns ({} frames)",
        y.steps,
        x.steps,
        x.steps * y.steps
    );

    Ok(MotionPath::new(rows, x, y))
}

/// Fixed camera calibration used by every plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    /// Physical width of one sensor pixel on the sample (um)
    pub pixel_width_um: f64,
    /// Physical height of one sensor pixel on the sample (um)
    pub pixel_height_um: f64,
    /// Sensor rotation relative to the stage axes (radians)
    pub rotation_rad: f64,
}

/// Planner instance bound to one camera
///
/// Built once from calibration data and the camera's frame size, then used
/// for any number of regions.
#[derive(Debug, Clone)]
pub struct SnakePathGenerator {
    calibration: CameraCalibration,
    frame_width_px: u32,
    frame_height_px: u32,
    rotation: Rotation2<f64>,
}

impl SnakePathGenerator {
    /// Create a generator for a camera producing `frame_width_px` x `frame_height_px` frames
    pub fn new(calibration: CameraCalibration, frame_width_px: u32, frame_height_px: u32) -> Self {
        Self {
            calibration,
            frame_width_px,
            frame_height_px,
            rotation: Rotation2::new(calibration.rotation_rad),
        }
    }

    pub fn calibration(&self) -> &CameraCalibration {
        &self.calibration
    }

    /// Physical width and height of the sample covered by one frame (um)
    pub fn frame_footprint_um(&self) -> (f64, f64) {
        (
            self.calibration.pixel_width_um * f64::from(self.frame_width_px),
            self.calibration.pixel_height_um * f64::from(self.frame_height_px),
        )
    }

    /// Parameters that [`generate`](Self::generate) plans with
    pub fn parameters(
        &self,
        top_left: Point2D,
        bottom_right: Point2D,
        units: Units,
        overlap_h: f64,
        overlap_v: f64,
    ) -> SnakePathParameters {
        let (frame_width_um, frame_height_um) = self.frame_footprint_um();
        SnakePathParameters {
            top_left,
            bottom_right,
            units,
            frame_width_um,
            frame_height_um,
            overlap_h,
            overlap_v,
            rotation_rad: self.calibration.rotation_rad,
        }
    }

    /// Generate the snake path for a region
    pub fn generate(
        &self,
        top_left: Point2D,
        bottom_right: Point2D,
        units: Units,
        overlap_h: f64,
        overlap_v: f64,
    ) -> PlannerResult<MotionPath> {
        let params = self.parameters(top_left, bottom_right, units, overlap_h, overlap_v);
        build_path(&params, &self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SnakePathParameters {
        SnakePathParameters {
            top_left: Point2D::new(0.0, 0.0),
            bottom_right: Point2D::new(10.0, 0.0),
            units: Units::Millimetres,
            frame_width_um: 1000.0,
            frame_height_um: 1000.0,
            overlap_h: 0.0,
            overlap_v: 0.0,
            rotation_rad: 0.0,
        }
    }

    #[test]
    fn test_single_row_scan() {
        let path = plan_snake(&params()).unwrap();
        assert_eq!(path.num_rows(), 1);
        assert_eq!(path.num_columns(), 11);
        for (i, p) in path.rows()[0].iter().enumerate() {
            assert_eq!(*p, Point2D::new(i as f64 * 1000.0, 0.0));
        }
    }

    #[test]
    fn test_inverted_region_rejected() {
        let mut p = params();
        p.top_left = Point2D::new(5.0, 0.0);
        p.bottom_right = Point2D::new(0.0, 0.0);
        assert!(matches!(
            plan_snake(&p),
            Err(PlannerError::InvalidRegion { .. })
        ));

        let mut p = params();
        p.bottom_right = Point2D::new(10.0, 3.0);
        assert!(matches!(
            plan_snake(&p),
            Err(PlannerError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_overlap_bounds() {
        for bad in [1.0, 1.5, -0.1, f64::NAN] {
            let mut p = params();
            p.overlap_h = bad;
            assert!(matches!(
                plan_snake(&p),
                Err(PlannerError::InvalidParameter { ref name, .. }) if name == "overlap_h"
            ));
        }
        let mut p = params();
        p.overlap_v = 0.999;
        assert!(plan_snake(&p).is_ok());
    }

    #[test]
    fn test_footprint_must_be_positive() {
        let mut p = params();
        p.frame_height_um = 0.0;
        assert!(matches!(
            plan_snake(&p),
            Err(PlannerError::InvalidParameter { ref name, .. }) if name == "frame_height_um"
        ));
    }

    #[test]
    fn test_non_length_unit_rejected() {
        let mut p = params();
        p.units = Units::Degrees;
        assert!(matches!(
            plan_snake(&p),
            Err(PlannerError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_generator_footprint() {
        let calibration = CameraCalibration {
            pixel_width_um: 2.0,
            pixel_height_um: 3.0,
            rotation_rad: 0.0,
        };
        let generator = SnakePathGenerator::new(calibration, 500, 400);
        assert_eq!(generator.frame_footprint_um(), (1000.0, 1200.0));
    }

    #[test]
    fn test_generator_matches_free_function() {
        let calibration = CameraCalibration {
            pixel_width_um: 1.0,
            pixel_height_um: 1.0,
            rotation_rad: 0.045,
        };
        let generator = SnakePathGenerator::new(calibration, 1000, 800);
        let tl = Point2D::new(51.6, 48.7);
        let br = Point2D::new(55.0, 44.0);
        let from_generator = generator
            .generate(tl, br, Units::Millimetres, 0.5, 0.5)
            .unwrap();
        let from_fn = plan_snake(&generator.parameters(tl, br, Units::Millimetres, 0.5, 0.5))
            .unwrap();
        assert_eq!(from_generator, from_fn);
    }
}

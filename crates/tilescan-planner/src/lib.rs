//! # tilescan planner
//!
//! Plans the stage positions for tiling a rectangular sample region with
//! camera frames.
//!
//! ## Pieces
//!
//! - **Coverage**: minimum step count per axis that still spans the region
//! - **Snake Path**: centered boustrophedon grid with camera rotation correction
//! - **Motion Path**: the immutable result handed to acquisition

pub mod coverage;
pub mod error;
pub mod motion_path;
pub mod snake_path;

pub use coverage::{checked_steps_and_coverage, steps_and_coverage, AxisPlan};
pub use error::{PlannerError, PlannerResult};
pub use motion_path::MotionPath;
pub use snake_path::{
    plan_snake, CameraCalibration, SnakePathGenerator, SnakePathParameters, MAX_FRAMES,
};

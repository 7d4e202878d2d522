//! # tilescan
//!
//! Snake raster tile scanning for motorized microscope stages:
//! - Plans a centered boustrophedon grid of stage positions over a region
//! - Corrects the grid for camera sensor rotation
//! - Drives a stage and camera along the grid and saves one PNG per tile
//! - Naively tiles the captured frames into one image
//!
//! ## Architecture
//!
//! tilescan is organized as a workspace with multiple crates:
//!
//! 1. **tilescan-core** - Points, unit tags, length conversion
//! 2. **tilescan-planner** - Step/coverage math and snake path generation
//! 3. **tilescan-acquisition** - Stage/camera traits, capture loop, compositing
//! 4. **tilescan-settings** - Scan configuration files
//! 5. **tilescan** - Main binary that integrates all crates

pub use tilescan_core::{
    convert_length_to_microns, convert_point_to_microns, CoreError, Point2D, Units,
};

pub use tilescan_planner::{
    plan_snake, steps_and_coverage, AxisPlan, CameraCalibration, MotionPath, PlannerError,
    SnakePathGenerator, SnakePathParameters,
};

pub use tilescan_acquisition::{
    save_png, tile_file_name, AcquisitionError, Camera, Compositor, Frame, NaiveTiler,
    SimulatedCamera, SimulatedStage, Stage, TileCapture, TileGrid, TravelLimits,
};

pub use tilescan_settings::{default_config_path, ScanConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, leaving stdout for command output
/// - RUST_LOG environment variable support (INFO by default)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Capture a full scan with the simulated stage and camera.
///
/// Tiles go to the configured save folder, and the naive tiled image is
/// written next to them when enabled. Returns the captured grid.
pub fn simulate_scan(config: &ScanConfig) -> anyhow::Result<TileGrid> {
    for note in config.advisories() {
        tracing::warn!("{}", note);
    }

    let path = config.plan()?;
    tracing::info!(
        "Simulating stage on {} and a {}x{} px camera",
        config.stage.serial_port,
        config.camera.frame_width_px,
        config.camera.frame_height_px
    );
    let camera = SimulatedCamera::new(config.camera.frame_width_px, config.camera.frame_height_px);
    let mut capture = TileCapture::new(SimulatedStage::new(), camera)
        .with_save_folder(&config.output.save_folder)
        .with_homing(config.stage.home_before_scan);

    let grid = capture.run(&path)?;

    if config.output.run_naive_tiling {
        let image = NaiveTiler::new().compose(&grid)?;
        let out = config.output.tiled_image_path();
        save_png(&image, &out)?;
        tracing::info!("Saved naive tiled image to {}", out.display());
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }
}

//! Scan configuration
//!
//! Everything an operator tunes for one tiling run lives here, loaded once
//! from a JSON or TOML file and treated as immutable afterwards.
//!
//! Configuration is organized into logical sections:
//! - Stage settings (port, homing)
//! - Camera calibration (pixel size, sensor rotation, frame size)
//! - Region to tile and the unit its corners are given in
//! - Overlap between neighbouring frames
//! - Output (tile folder, naive tiling)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilescan_core::{Point2D, Units};
use tilescan_planner::{CameraCalibration, MotionPath, SnakePathGenerator};

/// Stage connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSettings {
    /// Serial port of the stage controller
    pub serial_port: String,
    /// Run the homing cycle before the first move
    #[serde(default)]
    pub home_before_scan: bool,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            serial_port: "/dev/ttyUSB0".to_string(),
            home_before_scan: true,
        }
    }
}

/// Camera calibration and frame size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Pixel width on the sample (um)
    pub pixel_width_um: f64,
    /// Pixel height on the sample (um)
    pub pixel_height_um: f64,
    /// Sensor rotation relative to the stage axes (radians)
    #[serde(default)]
    pub rotation_rad: f64,
    /// Frame width in pixels
    pub frame_width_px: u32,
    /// Frame height in pixels
    pub frame_height_px: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pixel_width_um: 1.0,
            pixel_height_um: 1.0,
            rotation_rad: 0.0,
            frame_width_px: 1920,
            frame_height_px: 1200,
        }
    }
}

impl CameraSettings {
    pub fn calibration(&self) -> CameraCalibration {
        CameraCalibration {
            pixel_width_um: self.pixel_width_um,
            pixel_height_um: self.pixel_height_um,
            rotation_rad: self.rotation_rad,
        }
    }
}

/// Region to tile, as copied from the stage controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSettings {
    pub top_left: Point2D,
    pub bottom_right: Point2D,
    /// Unit of both corners
    pub units: Units,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            top_left: Point2D::new(0.0, 0.0),
            bottom_right: Point2D::new(10.0, 0.0),
            units: Units::Millimetres,
        }
    }
}

impl RegionSettings {
    /// Midpoint of the region, in the region's units
    pub fn centre(&self) -> Point2D {
        Point2D::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }
}

/// Fractional overlap between neighbouring frames
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlapSettings {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Where and how results are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Folder receiving one PNG per tile
    pub save_folder: PathBuf,
    /// Concatenate tiles into one image after capture
    pub run_naive_tiling: bool,
    /// File name of the naively tiled image inside `save_folder`
    pub tiled_image_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            save_folder: PathBuf::from("tiles"),
            run_naive_tiling: true,
            tiled_image_name: "naive_tiled_image.png".to_string(),
        }
    }
}

impl OutputSettings {
    pub fn tiled_image_path(&self) -> PathBuf {
        self.save_folder.join(&self.tiled_image_name)
    }
}

/// Complete configuration of one tiling run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub stage: StageSettings,
    pub camera: CameraSettings,
    pub region: RegionSettings,
    #[serde(default)]
    pub overlap: OverlapSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Default config location: `<config dir>/tilescan/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("tilescan").join("config.toml"))
        .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into())
}

impl ScanConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.stage.serial_port.trim().is_empty() {
            return Err(SettingsError::invalid(
                "stage.serial_port",
                "must name the stage controller port",
            ));
        }

        let region = &self.region;
        if !region.top_left.is_finite() || !region.bottom_right.is_finite() {
            return Err(SettingsError::invalid("region", "corners must be finite"));
        }
        if region.top_left.x > region.bottom_right.x {
            return Err(SettingsError::invalid(
                "region",
                "it must be that top_left.x <= bottom_right.x",
            ));
        }
        if region.top_left.y < region.bottom_right.y {
            return Err(SettingsError::invalid(
                "region",
                "it must be that top_left.y >= bottom_right.y",
            ));
        }
        if !region.units.is_length() {
            return Err(SettingsError::invalid(
                "region.units",
                format!("'{}' is not a length unit", region.units),
            ));
        }

        let camera = &self.camera;
        if !(camera.pixel_width_um > 0.0 && camera.pixel_width_um.is_finite()) {
            return Err(SettingsError::invalid(
                "camera.pixel_width_um",
                "must be greater than 0",
            ));
        }
        if !(camera.pixel_height_um > 0.0 && camera.pixel_height_um.is_finite()) {
            return Err(SettingsError::invalid(
                "camera.pixel_height_um",
                "must be greater than 0",
            ));
        }
        if camera.frame_width_px == 0 || camera.frame_height_px == 0 {
            return Err(SettingsError::invalid(
                "camera.frame_size",
                "frame dimensions must be > 0",
            ));
        }
        if !camera.rotation_rad.is_finite() {
            return Err(SettingsError::invalid(
                "camera.rotation_rad",
                "must be finite",
            ));
        }

        for (key, value) in [
            ("overlap.horizontal", self.overlap.horizontal),
            ("overlap.vertical", self.overlap.vertical),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(SettingsError::invalid(key, "must be in [0, 1)"));
            }
        }

        if self.output.run_naive_tiling && self.output.tiled_image_name.trim().is_empty() {
            return Err(SettingsError::invalid(
                "output.tiled_image_name",
                "must not be empty when naive tiling is enabled",
            ));
        }

        Ok(())
    }

    /// Non-fatal warnings about settings that will probably give poor results
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.output.run_naive_tiling
            && (self.overlap.horizontal > 0.0 || self.overlap.vertical > 0.0)
        {
            notes.push(
                "0.0 overlap is suggested for naive tiling; overlapping tiles will repeat content"
                    .to_string(),
            );
        }
        if self.region.top_left == self.region.bottom_right {
            notes.push("Region is a single point; only one frame will be captured".to_string());
        }
        notes
    }

    /// Planner bound to the configured camera
    pub fn planner(&self) -> SnakePathGenerator {
        SnakePathGenerator::new(
            self.camera.calibration(),
            self.camera.frame_width_px,
            self.camera.frame_height_px,
        )
    }

    /// Plan the configured region
    pub fn plan(&self) -> SettingsResult<MotionPath> {
        self.validate()?;
        let path = self.planner().generate(
            self.region.top_left,
            self.region.bottom_right,
            self.region.units,
            self.overlap.horizontal,
            self.overlap.vertical,
        )?;
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScanConfig::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_region_rejected() {
        let mut config = ScanConfig::new();
        config.region.top_left = Point2D::new(5.0, 0.0);
        config.region.bottom_right = Point2D::new(0.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "region"
        ));
    }

    #[test]
    fn test_empty_serial_port_rejected() {
        let mut config = ScanConfig::new();
        config.stage.serial_port = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "stage.serial_port"
        ));
    }

    #[test]
    fn test_non_length_unit_rejected() {
        let mut config = ScanConfig::new();
        config.region.units = Units::Radians;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlap_range() {
        let mut config = ScanConfig::new();
        config.overlap.vertical = 1.0;
        assert!(config.validate().is_err());
        config.overlap.vertical = 0.9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pixel_size_must_be_positive() {
        let mut config = ScanConfig::new();
        config.camera.pixel_height_um = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_advisories() {
        let mut config = ScanConfig::new();
        assert!(config.advisories().is_empty());

        config.overlap.horizontal = 0.2;
        assert_eq!(config.advisories().len(), 1);

        config.output.run_naive_tiling = false;
        assert!(config.advisories().is_empty());
    }

    #[test]
    fn test_plan_uses_camera_footprint() {
        let mut config = ScanConfig::new();
        config.camera.frame_width_px = 1000;
        config.camera.frame_height_px = 1000;
        let path = config.plan().unwrap();
        assert_eq!(path.num_rows(), 1);
        assert_eq!(path.num_columns(), 11);
    }

    #[test]
    fn test_region_centre() {
        let region = RegionSettings {
            top_left: Point2D::new(0.0, 4.0),
            bottom_right: Point2D::new(10.0, 0.0),
            units: Units::Millimetres,
        };
        assert_eq!(region.centre(), Point2D::new(5.0, 2.0));
    }

    #[test]
    fn test_unknown_extension() {
        let err = ConfigFormat::from_path(Path::new("scan.yaml")).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }
}

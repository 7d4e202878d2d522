//! tilescan Settings Crate
//!
//! Handles scan configuration: loading, saving, and validating the
//! parameters that describe one tiling run.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CameraSettings, OutputSettings, OverlapSettings, RegionSettings,
    ScanConfig, StageSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};

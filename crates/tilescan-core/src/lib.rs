//! # tilescan core
//!
//! Core types shared by the tilescan crates:
//! stage coordinates, motion-controller unit tags and the length
//! converter, and the core error type.

pub mod data;
pub mod error;
pub mod units;

pub use data::Point2D;
pub use error::{CoreError, CoreResult};
pub use units::{convert_length_to_microns, convert_point_to_microns, Units};

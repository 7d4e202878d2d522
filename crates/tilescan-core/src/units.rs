//! Unit conversion utilities
//!
//! Stage coordinates are reported by the motion controller in whatever unit
//! the operator copied them in. The planner works exclusively in
//! micrometres, so every length passes through [`convert_length_to_microns`].
//!
//! The unit tag set mirrors what a motion controller exposes, which includes
//! angular and native-step units. Those are valid tags but not lengths, and
//! converting them is an error rather than a pass-through.

use crate::data::Point2D;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Motion controller unit tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Units {
    /// Metres
    Metres,
    /// Centimetres
    Centimetres,
    /// Millimetres
    #[default]
    Millimetres,
    /// Micrometres (planner base unit)
    Micrometres,
    /// Nanometres
    Nanometres,
    /// Inches
    Inches,
    /// Angular degrees
    Degrees,
    /// Angular radians
    Radians,
    /// Controller native steps
    Native,
}

impl Units {
    /// All length units, in descending magnitude order except inches
    pub const LENGTHS: [Units; 6] = [
        Units::Metres,
        Units::Centimetres,
        Units::Millimetres,
        Units::Micrometres,
        Units::Nanometres,
        Units::Inches,
    ];

    /// Whether this tag describes a length
    pub fn is_length(self) -> bool {
        self.to_microns_factor().is_ok()
    }

    /// Multiplicative factor taking a value in this unit to micrometres
    pub fn to_microns_factor(self) -> CoreResult<f64> {
        match self {
            Units::Metres => Ok(1e9),
            Units::Centimetres => Ok(1e6),
            Units::Millimetres => Ok(1e3),
            Units::Micrometres => Ok(1.0),
            Units::Nanometres => Ok(0.001),
            Units::Inches => Ok(25400.0),
            Units::Degrees | Units::Radians | Units::Native => {
                Err(CoreError::UnsupportedUnit { unit: self })
            }
        }
    }

    /// Short symbol used in config files and log output
    pub fn symbol(self) -> &'static str {
        match self {
            Units::Metres => "m",
            Units::Centimetres => "cm",
            Units::Millimetres => "mm",
            Units::Micrometres => "um",
            Units::Nanometres => "nm",
            Units::Inches => "in",
            Units::Degrees => "deg",
            Units::Radians => "rad",
            Units::Native => "native",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Units {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "metre" | "metres" | "meter" | "meters" => Ok(Self::Metres),
            "cm" | "centimetre" | "centimetres" | "centimeter" | "centimeters" => {
                Ok(Self::Centimetres)
            }
            "mm" | "millimetre" | "millimetres" | "millimeter" | "millimeters" => {
                Ok(Self::Millimetres)
            }
            "um" | "µm" | "micrometre" | "micrometres" | "micrometer" | "micrometers"
            | "micron" | "microns" => Ok(Self::Micrometres),
            "nm" | "nanometre" | "nanometres" | "nanometer" | "nanometers" => {
                Ok(Self::Nanometres)
            }
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            "native" => Ok(Self::Native),
            _ => Err(CoreError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Units> for String {
    fn from(unit: Units) -> Self {
        unit.symbol().to_string()
    }
}

/// Convert a length from `unit` to micrometres
///
/// Fails with [`CoreError::UnsupportedUnit`] for non-length tags.
pub fn convert_length_to_microns(value: f64, unit: Units) -> CoreResult<f64> {
    Ok(value * unit.to_microns_factor()?)
}

/// Convert both components of a point from `unit` to micrometres
pub fn convert_point_to_microns(point: Point2D, unit: Units) -> CoreResult<Point2D> {
    let factor = unit.to_microns_factor()?;
    Ok(point.scaled(factor))
}

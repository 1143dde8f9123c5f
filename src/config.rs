//! Imaging configuration
use crate::error::{Error, Result};
use crate::model::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of the sensor array, the propagation model and the grid
///
/// Every field has a default, so a JSON configuration file only needs
/// to name the values it changes:
///
/// ```
/// # use sai::config::Config;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config: Config = serde_json::from_str(r#"{"horizontal_sensor_count": 4}"#)?;
/// assert_eq!(config.horizontal_sensor_count, 4);
/// assert_eq!(config.aperture_half_spacing, 0.464);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Number of horizontal sensor positions in one vertical slice
    pub horizontal_sensor_count: usize,
    /// Spacing between vertical sensor positions
    pub vertical_gap: f32,
    /// Propagation speed in the units of the locations and frequencies
    pub propagation_constant: f32,
    /// Half the spacing of the virtual two-element aperture
    pub aperture_half_spacing: f32,
    /// Edge length of one grid cell
    pub cell_size: f32,
    /// Width of the unit suffix trailing every frequency table entry
    pub frequency_suffix_len: usize,
    /// First corner of the target region
    pub corner1: Point,
    /// Opposite corner of the target region
    pub corner2: Point,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            horizontal_sensor_count: 10,
            vertical_gap: 0.05,
            propagation_constant: 29979.2458,
            aperture_half_spacing: 0.464,
            cell_size: 0.05,
            frequency_suffix_len: 4,
            corner1: Point::new(0.0, 2.0, 0.0),
            corner2: Point::new(2.0, 8.0, 0.0),
        }
    }
}

impl Config {
    /// Read a configuration from a JSON file and validate it
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or holds
    /// values rejected by [`Config::validate`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if self.horizontal_sensor_count == 0 {
            return Err(Error::InvalidArgument(
                "horizontal sensor count must be at least 1".to_string(),
            ));
        }
        positive("cell size", self.cell_size)?;
        positive("vertical gap", self.vertical_gap)?;
        positive("propagation constant", self.propagation_constant)?;
        if !self.aperture_half_spacing.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "aperture half spacing must be finite, got {}",
                self.aperture_half_spacing
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

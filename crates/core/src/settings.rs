//! Generation input: grid dimensions, seed, waypoints and branch probabilities.
//!
//! Settings are plain data. They can be built in code, taken from the
//! presets below, or loaded from a TOML file:
//!
//! ```toml
//! width = 16
//! height = 16
//! unit_size = 3
//! seed = 1
//! door_percentages = [50, 30, 20, 10]
//!
//! [[map_points]]
//! x = 0.2
//! y = 0.2
//! label = "Start"
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A mandatory waypoint, in fractions of the grid size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MapPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, label: None }
    }

    pub fn labelled(x: f32, y: f32, label: impl Into<String>) -> Self {
        Self { x, y, label: Some(label.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Grid width in room-units.
    pub width: usize,
    /// Grid height in room-units.
    pub height: usize,
    /// Tiles per room-unit along each axis.
    pub unit_size: usize,
    pub seed: u64,
    pub map_points: Vec<MapPoint>,
    /// Chance (0-100) of attaching a neighbour at each depth away from the spine.
    pub door_percentages: Vec<u32>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: 24,
            height: 16,
            unit_size: 5,
            seed: 1,
            map_points: Vec::new(),
            door_percentages: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file")]
    Io(#[from] io::Error),
    #[error("failed to parse settings file")]
    Parse(#[from] toml::de::Error),
    #[error("unit size must be at least 1")]
    ZeroUnitSize,
    #[error("map point {index} at ({x}, {y}) lies outside the unit square")]
    MapPointOutOfRange { index: usize, x: f32, y: f32 },
    #[error("door percentage {value} at depth {depth} exceeds 100")]
    PercentageOutOfRange { depth: usize, value: u32 },
}

impl MapSettings {
    /// Four waypoints near the corners of a 32x32 grid with decaying branch chances.
    pub fn four_corners() -> Self {
        Self {
            width: 32,
            height: 32,
            unit_size: 3,
            seed: 1,
            map_points: corner_points(),
            door_percentages: vec![50, 30, 20, 10],
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn actual_width(&self) -> usize {
        self.width * self.unit_size
    }

    pub fn actual_height(&self) -> usize {
        self.height * self.unit_size
    }

    /// Rejects values that cannot describe any map.
    ///
    /// A zero-sized grid is accepted here; generation reports it by exhausting
    /// the waypoint placement budget.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.unit_size == 0 {
            return Err(SettingsError::ZeroUnitSize);
        }
        for (index, point) in self.map_points.iter().enumerate() {
            let in_range = (0.0..=1.0).contains(&point.x) && (0.0..=1.0).contains(&point.y);
            if !in_range {
                return Err(SettingsError::MapPointOutOfRange { index, x: point.x, y: point.y });
            }
        }
        for (depth, &value) in self.door_percentages.iter().enumerate() {
            if value > 100 {
                return Err(SettingsError::PercentageOutOfRange { depth, value });
            }
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn corner_points() -> Vec<MapPoint> {
    vec![
        MapPoint::new(0.2, 0.2),
        MapPoint::new(0.8, 0.2),
        MapPoint::new(0.8, 0.8),
        MapPoint::new(0.2, 0.8),
    ]
}

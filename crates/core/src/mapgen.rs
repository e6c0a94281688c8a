//! Procedural map generation split into placement, routing, connection and
//! rasterization stages.

pub mod graph;
pub mod model;
pub mod pathfinding;

mod adjacency;
mod doors;
mod generator;
mod grid;
mod layout;
mod seed;
mod tilemap;

pub use generator::{GeneratedMap, MapGenerator};
pub use graph::RoomGraph;
pub use grid::OccupancyGrid;
pub use layout::MAX_RETRY_ATTEMPTS;
pub use model::{Door, GeneratedLayout, GenerationReport, Room};
pub use pathfinding::{Footprint, Pathfinder};

use crate::error::GenerateError;
use crate::settings::MapSettings;

pub fn generate_layout(settings: &MapSettings) -> Result<GeneratedMap, GenerateError> {
    MapGenerator::new(settings).generate()
}

pub mod error;
pub mod map;
pub mod mapgen;
pub mod settings;
pub mod tile;
pub mod types;

mod hash;
mod observers;

pub use error::{GenerateError, PathError};
pub use map::Map;
pub use mapgen::{
    Door, GeneratedLayout, GeneratedMap, GenerationReport, MAX_RETRY_ATTEMPTS, Room,
    generate_layout,
};
pub use observers::{RebuildCallback, TileCallback};
pub use settings::{MapPoint, MapSettings, SettingsError};
pub use tile::{Tile, TileEdge, TileGrid};
pub use types::*;

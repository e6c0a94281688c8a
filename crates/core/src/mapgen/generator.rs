//! High-level generation orchestration: placement, routing, connection and
//! rasterization, all drawn from one seeded stream.

use tracing::{debug, info};

use crate::error::GenerateError;
use crate::settings::MapSettings;
use crate::tile::TileGrid;
use crate::types::TileType;

use super::doors::connect_rooms;
use super::graph::RoomGraph;
use super::layout::{PlacedRooms, place_rooms};
use super::model::{GeneratedLayout, GenerationReport};
use super::pathfinding::Pathfinder;
use super::seed::MapRng;
use super::tilemap::build_tile_map;

/// Output of one successful pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub layout: GeneratedLayout,
    pub tiles: TileGrid,
    pub report: GenerationReport,
}

pub struct MapGenerator<'a> {
    settings: &'a MapSettings,
}

impl<'a> MapGenerator<'a> {
    pub fn new(settings: &'a MapSettings) -> Self {
        Self { settings }
    }

    pub fn generate(&self) -> Result<GeneratedMap, GenerateError> {
        let settings = self.settings;
        settings.validate()?;
        let mut rng = MapRng::new(settings.seed);

        let PlacedRooms { mut rooms, waypoints, grid } = place_rooms(settings, &mut rng)?;
        debug!(rooms = rooms.len(), waypoints = waypoints.len(), "rooms placed");

        let spine = {
            let graph = RoomGraph::build(&rooms);
            Pathfinder::new(&graph, &rooms).path_between(&waypoints)?
        };
        debug!(length = spine.len(), "spine routed");

        let connected = connect_rooms(&mut rooms, &spine, &settings.door_percentages, &mut rng);
        let tile_map = build_tile_map(
            &rooms,
            &connected,
            settings.unit_size,
            settings.actual_width(),
            settings.actual_height(),
        )?;

        let report = GenerationReport {
            seed: settings.seed,
            rooms_placed: rooms.len(),
            rooms_connected: connected.len(),
            spine_length: spine.len(),
            floor_tiles: tile_map.tiles.count(TileType::Floor),
            door_tiles: tile_map.door_tiles,
            collisions: tile_map.collisions,
        };
        info!(
            seed = report.seed,
            rooms = report.rooms_placed,
            connected = report.rooms_connected,
            collisions = report.collisions,
            "map generated"
        );

        let layout = GeneratedLayout {
            width: settings.width,
            height: settings.height,
            rooms,
            waypoints,
            spine,
            connected,
            grid,
        };
        Ok(GeneratedMap { layout, tiles: tile_map.tiles, report })
    }
}

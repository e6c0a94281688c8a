//! Room placement: waypoint anchoring, prototype space filling and the final
//! deterministic packing scan.

use tracing::{debug, warn};

use crate::error::GenerateError;
use crate::settings::{MapPoint, MapSettings};
use crate::types::RoomId;

use super::adjacency::resolve_neighbours;
use super::grid::OccupancyGrid;
use super::model::Room;
use super::seed::MapRng;

/// Attempts allowed per waypoint, and per batch of one room prototype.
pub const MAX_RETRY_ATTEMPTS: u32 = 10_000;

/// Room-unit distance a waypoint room may drift from its requested point.
const WAYPOINT_RADIUS: usize = 5;

/// Placed by random sampling, largest first.
const SAMPLED_PROTOTYPES: [(usize, usize); 6] = [(5, 5), (5, 3), (3, 3), (2, 3), (2, 2), (2, 1)];

/// Smallest room, packed into whatever space the sampled passes left over.
const PACKING_PROTOTYPE: (usize, usize) = (1, 1);

pub(super) struct PlacedRooms {
    pub(super) rooms: Vec<Room>,
    pub(super) waypoints: Vec<RoomId>,
    pub(super) grid: OccupancyGrid,
}

pub(super) fn place_rooms(
    settings: &MapSettings,
    rng: &mut MapRng,
) -> Result<PlacedRooms, GenerateError> {
    let mut placer = RoomPlacer::new(settings.width, settings.height);
    let waypoints = placer.anchor_waypoints(&settings.map_points, rng)?;
    placer.fill_space(rng);

    for room in &mut placer.rooms {
        room.difficulty = rng.range(1, 100) as u32;
    }
    for index in 0..placer.rooms.len() {
        let neighbours = resolve_neighbours(&placer.rooms[index], &placer.grid);
        placer.rooms[index].neighbours = neighbours;
    }

    Ok(PlacedRooms { rooms: placer.rooms, waypoints, grid: placer.grid })
}

struct RoomPlacer {
    grid: OccupancyGrid,
    rooms: Vec<Room>,
}

impl RoomPlacer {
    fn new(width: usize, height: usize) -> Self {
        Self { grid: OccupancyGrid::new(width, height), rooms: Vec::new() }
    }

    fn place(&mut self, x: usize, y: usize, width: usize, height: usize) -> RoomId {
        let id = RoomId::from_index(self.rooms.len());
        let room = Room::placed(id, x, y, width, height);
        self.grid.fill(&room);
        self.rooms.push(room);
        id
    }

    fn anchor_waypoints(
        &mut self,
        points: &[MapPoint],
        rng: &mut MapRng,
    ) -> Result<Vec<RoomId>, GenerateError> {
        let width = self.grid.width();
        let height = self.grid.height();
        let mut waypoints = Vec::with_capacity(points.len());

        for (index, point) in points.iter().enumerate() {
            let px = (point.x * width as f32).floor() as usize;
            let py = (point.y * height as f32).floor() as usize;

            let (min_x, max_x) =
                (px.saturating_sub(WAYPOINT_RADIUS), (px + WAYPOINT_RADIUS).min(width));
            let (min_y, max_y) =
                (py.saturating_sub(WAYPOINT_RADIUS), (py + WAYPOINT_RADIUS).min(height));

            let mut spot = None;
            for _ in 0..MAX_RETRY_ATTEMPTS {
                let x = rng.range(min_x, max_x);
                let y = rng.range(min_y, max_y);
                if self.grid.fits(x, y, 1, 1) {
                    spot = Some((x, y));
                    break;
                }
            }

            let Some((x, y)) = spot else {
                warn!(waypoint = index, width, height, "waypoint placement budget exhausted");
                return Err(GenerateError::PlacementExhausted {
                    waypoint: index,
                    attempts: MAX_RETRY_ATTEMPTS,
                });
            };

            let id = self.place(x, y, 1, 1);
            self.rooms[id.index()].label = point.label.clone();
            waypoints.push(id);
        }

        Ok(waypoints)
    }

    fn fill_space(&mut self, rng: &mut MapRng) {
        for (width, height) in SAMPLED_PROTOTYPES {
            let before = self.rooms.len();
            while self.place_sampled(width, height, rng) {}
            debug!(width, height, placed = self.rooms.len() - before, "room prototype exhausted");
        }

        let before = self.rooms.len();
        self.place_scanned(PACKING_PROTOTYPE.0, PACKING_PROTOTYPE.1);
        debug!(placed = self.rooms.len() - before, "packing scan complete");
    }

    /// One batch: a fresh orientation and up to `MAX_RETRY_ATTEMPTS` positions.
    fn place_sampled(&mut self, width: usize, height: usize, rng: &mut MapRng) -> bool {
        let (width, height) = if rng.coin() { (width, height) } else { (height, width) };
        for _ in 0..MAX_RETRY_ATTEMPTS {
            let x = rng.range(0, self.grid.width());
            let y = rng.range(0, self.grid.height());
            if self.grid.fits(x, y, width, height) {
                self.place(x, y, width, height);
                return true;
            }
        }
        false
    }

    fn place_scanned(&mut self, width: usize, height: usize) {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if self.grid.fits(x, y, width, height) {
                    self.place(x, y, width, height);
                }
            }
        }
    }
}

//! Neighbour discovery by scanning the occupancy grid one cell beyond each room edge.

use std::collections::BTreeSet;

use crate::types::RoomId;

use super::grid::OccupancyGrid;
use super::model::Room;

/// Rooms sharing an edge with `room`, ordered by id. Diagonal contact does not count.
pub(super) fn resolve_neighbours(room: &Room, grid: &OccupancyGrid) -> Vec<RoomId> {
    let mut ids = BTreeSet::new();
    let mut visit = |x: usize, y: usize| {
        if let Some(id) = grid.occupant(x, y)
            && id != room.id
        {
            ids.insert(id);
        }
    };

    if room.y > 0 {
        for x in room.x..room.max_x() {
            visit(x, room.y - 1);
        }
    }
    if room.max_y() < grid.height() {
        for x in room.x..room.max_x() {
            visit(x, room.max_y());
        }
    }
    if room.x > 0 {
        for y in room.y..room.max_y() {
            visit(room.x - 1, y);
        }
    }
    if room.max_x() < grid.width() {
        for y in room.y..room.max_y() {
            visit(room.max_x(), y);
        }
    }

    ids.into_iter().collect()
}

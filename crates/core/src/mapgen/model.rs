//! Public data models for placed rooms, doors and the generated layout.

use crate::types::{Rect, RoomId};

use super::grid::OccupancyGrid;

/// Shared boundary segment between two connected rooms, in the owning room's
/// local room-unit coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub rect: Rect,
    /// Room on the other side of the segment.
    pub to: RoomId,
}

impl Door {
    /// Door on a west or east wall.
    pub fn is_vertical(&self) -> bool {
        self.rect.width == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Traversal cost in `[1, 100)`, assigned once placement is complete.
    pub difficulty: u32,
    pub doors: Vec<Door>,
    /// Directly touching rooms, ordered by id.
    pub neighbours: Vec<RoomId>,
    /// Label of the waypoint this room anchors, if any.
    pub label: Option<String>,
}

impl Room {
    pub(crate) fn placed(id: RoomId, x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            difficulty: 0,
            doors: Vec::new(),
            neighbours: Vec::new(),
            label: None,
        }
    }

    pub fn max_x(&self) -> usize {
        self.x + self.width
    }

    pub fn max_y(&self) -> usize {
        self.y + self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn has_door_to(&self, other: RoomId) -> bool {
        self.doors.iter().any(|door| door.to == other)
    }

    /// Door rectangle translated back into grid coordinates.
    pub fn door_in_grid(&self, door: &Door) -> Rect {
        Rect::new(self.x + door.rect.x, self.y + door.rect.y, door.rect.width, door.rect.height)
    }
}

/// Everything one generation pass produced at room granularity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLayout {
    pub width: usize,
    pub height: usize,
    /// Every placed room; `rooms[id.index()]` is the room with that id.
    pub rooms: Vec<Room>,
    /// Anchored waypoint rooms in settings order.
    pub waypoints: Vec<RoomId>,
    /// Concatenated route through every waypoint, first to last.
    pub spine: Vec<RoomId>,
    /// Rooms that made it into the map, in the order they were connected.
    pub connected: Vec<RoomId>,
    pub grid: OccupancyGrid,
}

impl GeneratedLayout {
    /// Room with the given id; `None` for ids this layout never issued.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.checked_index()?)
    }

    pub fn connected_rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.connected.iter().filter_map(|&id| self.room(id))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.id.0.to_le_bytes());
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
            bytes.extend(room.difficulty.to_le_bytes());
            bytes.extend((room.neighbours.len() as u32).to_le_bytes());
            for neighbour in &room.neighbours {
                bytes.extend(neighbour.0.to_le_bytes());
            }
            bytes.extend((room.doors.len() as u32).to_le_bytes());
            for door in &room.doors {
                bytes.extend(door.to.0.to_le_bytes());
                for value in [door.rect.x, door.rect.y, door.rect.width, door.rect.height] {
                    bytes.extend((value as u32).to_le_bytes());
                }
            }
        }

        for ids in [&self.waypoints, &self.spine, &self.connected] {
            bytes.extend((ids.len() as u32).to_le_bytes());
            for id in ids {
                bytes.extend(id.0.to_le_bytes());
            }
        }

        bytes
    }
}

/// Summary of a successful generation pass, handed to rebuild subscribers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub seed: u64,
    pub rooms_placed: usize,
    pub rooms_connected: usize,
    pub spine_length: usize,
    pub floor_tiles: usize,
    pub door_tiles: usize,
    /// Tiles written by more than one room and marked `TileType::Debug`.
    pub collisions: usize,
}

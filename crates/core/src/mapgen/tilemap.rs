//! Rasterizes connected rooms into the fine tile grid and burns doors into
//! their boundary tiles.

use tracing::warn;

use crate::error::GenerateError;
use crate::tile::{Tile, TileEdge, TileGrid};
use crate::types::{Facing, Pos, RoomId, TileEdgeKind, TileType};

use super::model::{Door, Room};

pub(super) struct TileMap {
    pub(super) tiles: TileGrid,
    pub(super) collisions: usize,
    /// Distinct tiles turned into doors; two doors may share a corner tile.
    pub(super) door_tiles: usize,
}

pub(super) fn build_tile_map(
    rooms: &[Room],
    connected: &[RoomId],
    unit_size: usize,
    width: usize,
    height: usize,
) -> Result<TileMap, GenerateError> {
    if connected.is_empty() {
        return Err(GenerateError::NoRooms);
    }

    let mut map = TileMap { tiles: TileGrid::new(width, height), collisions: 0, door_tiles: 0 };
    for &id in connected {
        map.rasterize(&rooms[id.index()], unit_size);
    }
    for &id in connected {
        let room = &rooms[id.index()];
        for door in &room.doors {
            map.burn_door(room, door, unit_size);
        }
    }
    Ok(map)
}

impl TileMap {
    fn rasterize(&mut self, room: &Room, unit_size: usize) {
        let (room_width, room_height) = (room.width * unit_size, room.height * unit_size);
        let (origin_x, origin_y) = (room.x * unit_size, room.y * unit_size);

        for y in 0..room_height {
            for x in 0..room_width {
                let pos = Pos { x: (origin_x + x) as i32, y: (origin_y + y) as i32 };
                let Some(slot) = self.tiles.slot_mut(pos) else {
                    warn!(room = %room.id, x = pos.x, y = pos.y, "room tile outside tile map");
                    continue;
                };
                if let Some(existing) = slot.as_mut() {
                    warn!(
                        room = %room.id,
                        owner = %existing.room,
                        x = pos.x,
                        y = pos.y,
                        "tile written twice"
                    );
                    existing.kind = TileType::Debug;
                    self.collisions += 1;
                    continue;
                }
                *slot = Some(Tile {
                    pos,
                    kind: TileType::Floor,
                    edges: boundary_edges(x, y, room_width, room_height),
                    room: room.id,
                });
            }
        }
    }

    fn burn_door(&mut self, room: &Room, door: &Door, unit_size: usize) {
        let pos = door_tile(room, door, unit_size);
        let facing = door_facing(door);
        let Some(tile) = self.tiles.get_mut(pos) else {
            warn!(room = %room.id, to = %door.to, x = pos.x, y = pos.y, "door tile missing");
            return;
        };
        if tile.kind == TileType::Floor {
            tile.kind = TileType::Door;
            self.door_tiles += 1;
        }
        if let Some(edge) = tile.edge_mut(facing) {
            edge.kind = TileEdgeKind::Door;
        }
    }
}

/// Wall edges for a tile at room-local `(x, y)` inside a `width` by `height` room.
fn boundary_edges(x: usize, y: usize, width: usize, height: usize) -> Vec<TileEdge> {
    let mut edges = Vec::new();
    if x == 0 {
        edges.push(TileEdge::wall(Facing::West));
    }
    if x + 1 == width {
        edges.push(TileEdge::wall(Facing::East));
    }
    if y == 0 {
        edges.push(TileEdge::wall(Facing::South));
    }
    if y + 1 == height {
        edges.push(TileEdge::wall(Facing::North));
    }
    edges
}

/// Tile that carries a door: centred along the shared segment, pulled back
/// inside the room when the segment lies on its far edge.
fn door_tile(room: &Room, door: &Door, unit_size: usize) -> Pos {
    let rect = door.rect;
    let (mut x, mut y) = if door.is_vertical() {
        let centre = (rect.height * unit_size).saturating_sub(1) / 2;
        ((room.x + rect.x) * unit_size, (room.y + rect.y) * unit_size + centre)
    } else {
        let centre = (rect.width * unit_size).saturating_sub(1) / 2;
        ((room.x + rect.x) * unit_size + centre, (room.y + rect.y) * unit_size)
    };
    if x == room.max_x() * unit_size {
        x -= 1;
    }
    if y == room.max_y() * unit_size {
        y -= 1;
    }
    Pos { x: x as i32, y: y as i32 }
}

fn door_facing(door: &Door) -> Facing {
    match (door.is_vertical(), door.rect) {
        (true, rect) if rect.x == 0 => Facing::West,
        (true, _) => Facing::East,
        (false, rect) if rect.y == 0 => Facing::South,
        (false, _) => Facing::North,
    }
}

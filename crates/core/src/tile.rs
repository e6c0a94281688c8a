//! Fine-grid tiles produced by rasterizing the connected rooms.

use crate::types::{Facing, Pos, RoomId, TileEdgeKind, TileType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileEdge {
    pub facing: Facing,
    pub kind: TileEdgeKind,
}

impl TileEdge {
    pub fn wall(facing: Facing) -> Self {
        Self { facing, kind: TileEdgeKind::Wall }
    }
}

/// One cell of the tile map. Only cells on a room boundary carry edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub pos: Pos,
    pub kind: TileType,
    pub edges: Vec<TileEdge>,
    /// Room whose footprint produced this tile.
    pub room: RoomId,
}

impl Tile {
    pub const WIDTH: usize = 1;
    pub const HEIGHT: usize = 1;

    pub fn edge(&self, facing: Facing) -> Option<&TileEdge> {
        self.edges.iter().find(|edge| edge.facing == facing)
    }

    pub(crate) fn edge_mut(&mut self, facing: Facing) -> Option<&mut TileEdge> {
        self.edges.iter_mut().find(|edge| edge.facing == facing)
    }
}

/// Row-major tile storage. Cells not covered by a connected room stay empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Tile>>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![None; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Tile at `pos`; `None` when out of range or not covered by any room.
    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        self.index(pos).and_then(|index| self.cells[index].as_ref())
    }

    pub(crate) fn get_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        let index = self.index(pos)?;
        self.cells[index].as_mut()
    }

    pub(crate) fn slot_mut(&mut self, pos: Pos) -> Option<&mut Option<Tile>> {
        let index = self.index(pos)?;
        Some(&mut self.cells[index])
    }

    /// Populated tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    pub fn count(&self, kind: TileType) -> usize {
        self.iter().filter(|tile| tile.kind == kind).count()
    }

    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }
}

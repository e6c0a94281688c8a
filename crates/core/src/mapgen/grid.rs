//! Room-unit occupancy grid used for placement validation and adjacency scans.

use crate::types::RoomId;

use super::model::Room;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Room occupying the cell, `None` for empty or out-of-range cells.
    pub fn occupant(&self, x: usize, y: usize) -> Option<RoomId> {
        if !self.in_bounds(x, y) {
            return None;
        }
        match self.cells[y * self.width + x] {
            0 => None,
            id => Some(RoomId(id)),
        }
    }

    /// True when every footprint cell is inside the grid and unoccupied.
    pub fn fits(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        for cy in y..y + height {
            for cx in x..x + width {
                if !self.in_bounds(cx, cy) || self.cells[cy * self.width + cx] != 0 {
                    return false;
                }
            }
        }
        true
    }

    pub(super) fn fill(&mut self, room: &Room) {
        for cy in room.y..room.max_y() {
            for cx in room.x..room.max_x() {
                self.cells[cy * self.width + cx] = room.id.0;
            }
        }
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&id| id != 0).count()
    }
}

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// Handle returned by every `Map::subscribe_*` call.
    pub struct SubscriptionId;
}

/// Fine-grid tile coordinate. Signed so that out-of-range queries stay representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Identifier of a placed room. Ids start at 1; 0 marks an empty occupancy cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub u32);

impl RoomId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Arena position, or `None` for the reserved id 0.
    pub fn checked_index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// Position of the room inside the arena returned by generation.
    pub fn index(self) -> usize {
        debug_assert!(self.0 > 0, "room id 0 is reserved for empty cells");
        (self.0 - 1) as usize
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned integer rectangle in room-unit space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(self) -> usize {
        self.x + self.width
    }

    pub fn max_y(self) -> usize {
        self.y + self.height
    }

    /// Overlap of two rectangles, edges included.
    ///
    /// Rectangles that only touch along an edge produce a degenerate rectangle
    /// (zero width or zero height) covering the shared segment. Rectangles with
    /// no contact at all produce `None`.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let touches_x = self.x <= other.max_x() && other.x <= self.max_x();
        let touches_y = self.y <= other.max_y() && other.y <= self.max_y();
        if !touches_x || !touches_y {
            return None;
        }
        let left = self.x.max(other.x);
        let right = self.max_x().min(other.max_x());
        let bottom = self.y.max(other.y);
        let top = self.max_y().min(other.max_y());
        Some(Rect { x: left, y: bottom, width: right - left, height: top - bottom })
    }

    /// Strict area overlap; shared edges do not count.
    pub fn overlaps(self, other: Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    pub fn is_segment(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Direction a tile edge faces. Y grows northwards, so row 0 of a room is its south side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileType {
    Floor,
    Wall,
    Door,
    /// Written twice during rasterization. Never expected from valid placement.
    Debug,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileEdgeKind {
    #[default]
    Wall,
    Door,
}

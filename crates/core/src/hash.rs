//! Stable snapshot hashing for determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::map::Map;
use crate::types::{Facing, TileEdgeKind, TileType};

impl Map {
    /// Hash of the settings seed, the room layout and every tile. `None` until
    /// a generation pass has succeeded.
    pub fn snapshot_hash(&self) -> Option<u64> {
        let layout = self.layout()?;
        let tiles = self.tiles()?;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.settings().seed);
        hasher.write(&layout.canonical_bytes());
        hasher.write_u64(tiles.width() as u64);
        hasher.write_u64(tiles.height() as u64);
        for cell in tiles.cells() {
            let Some(tile) = cell else {
                hasher.write_u8(0);
                continue;
            };
            hasher.write_u8(match tile.kind {
                TileType::Floor => 1,
                TileType::Wall => 2,
                TileType::Door => 3,
                TileType::Debug => 4,
            });
            hasher.write_u32(tile.room.0);
            hasher.write_u8(tile.edges.len() as u8);
            for edge in &tile.edges {
                hasher.write_u8(match edge.facing {
                    Facing::North => 0,
                    Facing::East => 1,
                    Facing::South => 2,
                    Facing::West => 3,
                });
                hasher.write_u8(match edge.kind {
                    TileEdgeKind::Wall => 0,
                    TileEdgeKind::Door => 1,
                });
            }
        }
        Some(hasher.finish())
    }
}

//! Change notification registry shared by every tile of a map.
//!
//! Listeners live in one slot map keyed by `SubscriptionId`. Tile-scoped
//! listeners are tied to the tile set they were registered against and are
//! dropped whenever the map rebuilds its tiles.

use std::fmt;

use slotmap::SlotMap;

use crate::mapgen::GenerationReport;
use crate::tile::Tile;
use crate::types::{Pos, SubscriptionId};

pub type TileCallback = Box<dyn FnMut(&Tile)>;
pub type RebuildCallback = Box<dyn FnMut(&GenerationReport)>;

enum Listener {
    AnyTile(TileCallback),
    Tile(Pos, TileCallback),
    Rebuilt(RebuildCallback),
}

#[derive(Default)]
pub(crate) struct Observers {
    listeners: SlotMap<SubscriptionId, Listener>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("listeners", &self.listeners.len()).finish()
    }
}

impl Observers {
    pub(crate) fn add_any_tile(&mut self, callback: TileCallback) -> SubscriptionId {
        self.listeners.insert(Listener::AnyTile(callback))
    }

    pub(crate) fn add_tile(&mut self, pos: Pos, callback: TileCallback) -> SubscriptionId {
        self.listeners.insert(Listener::Tile(pos, callback))
    }

    pub(crate) fn add_rebuilt(&mut self, callback: RebuildCallback) -> SubscriptionId {
        self.listeners.insert(Listener::Rebuilt(callback))
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub(crate) fn drop_tile_listeners(&mut self) {
        self.listeners.retain(|_, listener| !matches!(listener, Listener::Tile(..)));
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn tile_changed(&mut self, tile: &Tile) {
        for listener in self.listeners.values_mut() {
            match listener {
                Listener::AnyTile(callback) => callback(tile),
                Listener::Tile(pos, callback) if *pos == tile.pos => callback(tile),
                Listener::Tile(..) | Listener::Rebuilt(_) => {}
            }
        }
    }

    pub(crate) fn rebuilt(&mut self, report: &GenerationReport) {
        for listener in self.listeners.values_mut() {
            if let Listener::Rebuilt(callback) = listener {
                callback(report);
            }
        }
    }
}

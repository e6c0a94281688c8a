//! The `Map` facade: owns settings, the last generated layout and tiles, and
//! the subscriber registry.

use tracing::warn;

use crate::error::GenerateError;
use crate::mapgen::{GeneratedLayout, GeneratedMap, GenerationReport, Room, generate_layout};
use crate::observers::Observers;
use crate::settings::MapSettings;
use crate::tile::{Tile, TileGrid};
use crate::types::{Facing, Pos, SubscriptionId, TileEdgeKind, TileType};

#[derive(Debug)]
pub struct Map {
    settings: MapSettings,
    generated: Option<GeneratedMap>,
    observers: Observers,
}

impl Map {
    pub fn new(settings: MapSettings) -> Self {
        Self { settings, generated: None, observers: Observers::default() }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Runs a full generation pass with the current settings.
    ///
    /// The previous layout and tiles are discarded first, along with every
    /// per-tile subscription. On failure the map is left empty. Map-level
    /// subscriptions survive either way; rebuild listeners fire on success only.
    pub fn generate(&mut self) -> Result<GenerationReport, GenerateError> {
        self.generated = None;
        self.observers.drop_tile_listeners();

        let generated = generate_layout(&self.settings).inspect_err(|error| {
            warn!(seed = self.settings.seed, %error, "map generation failed");
        })?;
        let report = generated.report.clone();
        self.generated = Some(generated);
        self.observers.rebuilt(&report);
        Ok(report)
    }

    pub fn regenerate(&mut self, settings: MapSettings) -> Result<GenerationReport, GenerateError> {
        self.settings = settings;
        self.generate()
    }

    pub fn is_generated(&self) -> bool {
        self.generated.is_some()
    }

    pub fn actual_width(&self) -> usize {
        self.settings.actual_width()
    }

    pub fn actual_height(&self) -> usize {
        self.settings.actual_height()
    }

    pub fn layout(&self) -> Option<&GeneratedLayout> {
        self.generated.as_ref().map(|generated| &generated.layout)
    }

    pub fn tiles(&self) -> Option<&TileGrid> {
        self.generated.as_ref().map(|generated| &generated.tiles)
    }

    pub fn report(&self) -> Option<&GenerationReport> {
        self.generated.as_ref().map(|generated| &generated.report)
    }

    /// Rooms that made it into the map, in connection order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.layout().into_iter().flat_map(|layout| layout.connected_rooms())
    }

    /// Tile at fine-grid `(x, y)`; `None` out of range, on empty cells, or
    /// before a successful generation.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tiles()?.get(Pos { x, y })
    }

    /// Changes a tile's type and notifies listeners when it actually changed.
    /// Returns false when there is no tile at `(x, y)`.
    pub fn set_tile_kind(&mut self, x: i32, y: i32, kind: TileType) -> bool {
        let Some(tile) = self.generated.as_mut().and_then(|g| g.tiles.get_mut(Pos { x, y })) else {
            return false;
        };
        if tile.kind != kind {
            tile.kind = kind;
            self.observers.tile_changed(tile);
        }
        true
    }

    /// Changes one edge of a tile. Returns false when the tile or the edge is missing.
    pub fn set_edge_kind(&mut self, x: i32, y: i32, facing: Facing, kind: TileEdgeKind) -> bool {
        let Some(tile) = self.generated.as_mut().and_then(|g| g.tiles.get_mut(Pos { x, y })) else {
            return false;
        };
        let Some(edge) = tile.edge_mut(facing) else {
            return false;
        };
        if edge.kind != kind {
            edge.kind = kind;
            self.observers.tile_changed(tile);
        }
        true
    }

    /// Listener for changes to any tile. Survives regeneration.
    pub fn subscribe_tile_changes(
        &mut self,
        callback: impl FnMut(&Tile) + 'static,
    ) -> SubscriptionId {
        self.observers.add_any_tile(Box::new(callback))
    }

    /// Listener for one tile of the current tile set. Returns `None` when no
    /// tile exists there. Dropped on the next generation.
    pub fn subscribe_tile(
        &mut self,
        x: i32,
        y: i32,
        callback: impl FnMut(&Tile) + 'static,
    ) -> Option<SubscriptionId> {
        let pos = self.tile_at(x, y)?.pos;
        Some(self.observers.add_tile(pos, Box::new(callback)))
    }

    /// Listener fired once after every successful generation.
    pub fn subscribe_rebuilt(
        &mut self,
        callback: impl FnMut(&GenerationReport) + 'static,
    ) -> SubscriptionId {
        self.observers.add_rebuilt(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    pub fn subscription_count(&self) -> usize {
        self.observers.len()
    }
}

//! Failure taxonomy for map generation.
//!
//! Every variant aborts `generate` as a whole; tile collisions are not errors
//! and are reported through `GenerationReport` instead.

use thiserror::Error;

use crate::settings::SettingsError;
use crate::types::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("a route needs at least two waypoints, got {count}")]
    TooFewWaypoints { count: usize },
    #[error("no route from room {from} to room {to}")]
    NoPath { from: RoomId, to: RoomId },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid settings")]
    InvalidSettings(#[from] SettingsError),
    #[error("waypoint {waypoint} could not be placed within {attempts} attempts")]
    PlacementExhausted { waypoint: usize, attempts: u32 },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("tile map requested before any rooms were connected")]
    NoRooms,
}

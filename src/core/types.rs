//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for observable world entities
///
/// Supplied by the host (actor index, object id, ground item id); the core
/// never mints ids of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Identifier for a registered automation task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

/// Identifier for an interactive prompt / dialog surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptId(pub u32);

/// Position on the tiled world grid
///
/// `plane` is the elevation layer; x/y are tile coordinates within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub plane: i32,
    pub x: i32,
    pub y: i32,
}

impl WorldPoint {
    pub fn new(plane: i32, x: i32, y: i32) -> Self {
        Self { plane, x, y }
    }

    /// Grid (Chebyshev) distance to another point
    ///
    /// Points on different planes are unreachable and report `i32::MAX`,
    /// which keeps them last in any nearest-first ordering.
    pub fn distance_to(&self, other: &WorldPoint) -> i32 {
        if self.plane != other.plane {
            return i32::MAX;
        }
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }
}

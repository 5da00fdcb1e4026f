//! Observable world objects and player-status readings

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, PromptId, WorldPoint};

/// What flavor of world object an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A character (NPC or player)
    Actor,
    /// A placed scene object (boat, rock, bank chest, altar)
    Object,
    /// An item lying on a tile
    GroundItem,
}

/// One observation of a world object
///
/// Entities are immutable per observation: they are created from spawn
/// notifications and dropped on despawn or plane change, never mutated in
/// place. A later observation of the same id is a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Display name; absent for nameless scene fixtures
    pub name: Option<String>,
    pub position: WorldPoint,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, name: impl Into<String>, position: WorldPoint) -> Self {
        Self {
            id,
            kind,
            name: Some(name.into()),
            position,
        }
    }

    pub fn unnamed(id: EntityId, kind: EntityKind, position: WorldPoint) -> Self {
        Self {
            id,
            kind,
            name: None,
            position,
        }
    }

    /// Case-insensitive substring match against the entity's name
    ///
    /// Nameless entities never match.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .as_deref()
            .map(|n| n.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }

    /// Case-insensitive exact name match
    pub fn name_is(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .map(|n| n.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }
}

/// One occupied inventory slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSlot {
    /// Slot index within the container
    pub slot: u32,
    pub name: String,
    pub quantity: u32,
}

impl ItemSlot {
    pub fn new(slot: u32, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            slot,
            name: name.into(),
            quantity,
        }
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Boostable player statistics the tasks watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vital {
    Health,
    Prayer,
    Ranged,
}

/// A current/maximum reading of one vital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalLevel {
    /// Boosted (current) level
    pub current: i32,
    /// Real (unboosted maximum) level
    pub max: i32,
}

impl VitalLevel {
    pub fn new(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    /// True when the current level sits below `fraction` of the maximum
    ///
    /// A zero maximum never reads as low; that is a not-yet-loaded reading,
    /// not an empty resource.
    pub fn below_fraction(&self, fraction: f64) -> bool {
        if self.max <= 0 {
            return false;
        }
        (self.current as f64) < (self.max as f64) * fraction
    }
}

/// An open interactive prompt with labelled options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub options: Vec<String>,
}

impl Prompt {
    pub fn new(id: PromptId, options: Vec<String>) -> Self {
        Self { id, options }
    }

    /// Index of the option matching `label`, case-insensitively
    pub fn option_index(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o.eq_ignore_ascii_case(label))
    }
}

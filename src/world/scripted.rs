//! Deterministic in-memory world for harness demos and scenario tests
//!
//! Implements [`Perception`] over plain vectors so a test or the demo binary
//! can script exactly what each tick observes.

use ahash::AHashMap;

use crate::core::types::{EntityId, WorldPoint};
use crate::world::entity::{Entity, ItemSlot, Prompt, Vital, VitalLevel};
use crate::world::snapshot::Perception;

#[derive(Debug, Clone, Default)]
pub struct ScriptedWorld {
    player: Option<WorldPoint>,
    entities: Vec<Entity>,
    inventory: Vec<ItemSlot>,
    vitals: AHashMap<Vital, VitalLevel>,
    prompt: Option<Prompt>,
}

impl ScriptedWorld {
    pub fn new(player: WorldPoint) -> Self {
        Self {
            player: Some(player),
            ..Default::default()
        }
    }

    /// A world whose scene has not loaded: every query comes back empty
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn set_player(&mut self, position: WorldPoint) {
        self.player = Some(position);
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove by id, returning the observation if it was present
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }

    pub fn add_item(&mut self, item: ItemSlot) {
        self.inventory.push(item);
    }

    pub fn remove_item(&mut self, slot: u32) -> Option<ItemSlot> {
        let index = self.inventory.iter().position(|s| s.slot == slot)?;
        Some(self.inventory.remove(index))
    }

    pub fn set_vital(&mut self, vital: Vital, level: VitalLevel) {
        self.vitals.insert(vital, level);
    }

    pub fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn clear_prompt(&mut self) {
        self.prompt = None;
    }
}

impl Perception for ScriptedWorld {
    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn player_position(&self) -> Option<WorldPoint> {
        self.player
    }

    fn inventory(&self) -> &[ItemSlot] {
        &self.inventory
    }

    fn vital(&self, vital: Vital) -> Option<VitalLevel> {
        self.vitals.get(&vital).copied()
    }

    fn open_prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }
}

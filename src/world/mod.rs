pub mod entity;
pub mod scripted;
pub mod snapshot;

pub use entity::{Entity, EntityKind, ItemSlot, Prompt, Vital, VitalLevel};
pub use scripted::ScriptedWorld;
pub use snapshot::{nearest_actor, nearest_entity, nearest_object, Perception, INVENTORY_CAPACITY};

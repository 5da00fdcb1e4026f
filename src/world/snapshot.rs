//! Read-only query surface over the current tick's world state
//!
//! The host implements [`Perception`]; tasks only ever read through it. Every
//! query tolerates "scene not loaded yet" by returning empty/`None` — a
//! normal, frequent condition during transitions, never an error.

use crate::core::types::WorldPoint;
use crate::world::entity::{Entity, EntityKind, ItemSlot, Prompt, Vital, VitalLevel};

/// Number of slots in the player's carried-item container
pub const INVENTORY_CAPACITY: usize = 28;

/// Snapshot queries supplied by the host for one tick
pub trait Perception {
    /// All currently observable entities, in the host's scan order
    ///
    /// The order is stable within a tick; nearest-entity ties are broken by
    /// this order, so hosts must not shuffle it between queries.
    fn entities(&self) -> &[Entity];

    /// The agent's own position, or `None` while the scene is loading
    fn player_position(&self) -> Option<WorldPoint>;

    /// Occupied inventory slots; empty while the container is inaccessible
    fn inventory(&self) -> &[ItemSlot];

    /// Current/max reading of one vital, or `None` if not yet loaded
    fn vital(&self, vital: Vital) -> Option<VitalLevel>;

    /// The interactive prompt currently open, if any
    fn open_prompt(&self) -> Option<&Prompt>;

    /// Entities of one kind, in scan order
    fn entities_of_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.entities().iter().filter(|e| e.kind == kind).collect()
    }

    /// Whether any actor with a matching name is present
    fn actor_present(&self, name: &str) -> bool {
        self.entities()
            .iter()
            .any(|e| e.kind == EntityKind::Actor && e.name_contains(name))
    }

    /// Total quantity across inventory slots whose name contains `needle`
    fn inventory_count(&self, needle: &str) -> u32 {
        self.inventory()
            .iter()
            .filter(|s| s.name_contains(needle))
            .map(|s| s.quantity)
            .sum()
    }

    /// First inventory slot whose name contains `needle`
    fn find_inventory_slot(&self, needle: &str) -> Option<&ItemSlot> {
        self.inventory().iter().find(|s| s.name_contains(needle))
    }

    /// True once every slot of the container is occupied
    fn inventory_full(&self) -> bool {
        self.inventory().len() >= INVENTORY_CAPACITY
    }

    /// True when `vital` reads below `fraction` of its maximum
    fn vital_below(&self, vital: Vital, fraction: f64) -> bool {
        self.vital(vital)
            .map(|v| v.below_fraction(fraction))
            .unwrap_or(false)
    }

    /// The open prompt, but only if it carries an option labelled `label`
    fn prompt_with_option(&self, label: &str) -> Option<(&Prompt, usize)> {
        let prompt = self.open_prompt()?;
        let index = prompt.option_index(label)?;
        Some((prompt, index))
    }
}

/// Nearest entity satisfying `predicate`, by grid distance to the player
///
/// Linear scan in the snapshot's iteration order. Comparison is strict, so
/// equidistant candidates resolve to the first one encountered — a
/// deterministic tie-break that callers rely on.
pub fn nearest_entity<'a, P>(world: &'a dyn Perception, predicate: P) -> Option<&'a Entity>
where
    P: Fn(&Entity) -> bool,
{
    let player = world.player_position()?;
    let mut best: Option<(&Entity, i32)> = None;
    for entity in world.entities() {
        if !predicate(entity) {
            continue;
        }
        let distance = entity.position.distance_to(&player);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((entity, distance)),
        }
    }
    best.map(|(e, _)| e)
}

/// Nearest actor whose name contains `name`
pub fn nearest_actor<'a>(world: &'a dyn Perception, name: &str) -> Option<&'a Entity> {
    nearest_entity(world, |e| e.kind == EntityKind::Actor && e.name_contains(name))
}

/// Nearest scene object whose name contains `name`
pub fn nearest_object<'a>(world: &'a dyn Perception, name: &str) -> Option<&'a Entity> {
    nearest_entity(world, |e| e.kind == EntityKind::Object && e.name_contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;
    use crate::world::scripted::ScriptedWorld;

    fn actor(id: u64, name: &str, x: i32, y: i32) -> Entity {
        Entity::new(EntityId(id), EntityKind::Actor, name, WorldPoint::new(0, x, y))
    }

    #[test]
    fn test_nearest_picks_minimum_distance() {
        let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
        world.add_entity(actor(1, "Guard", 10, 0));
        world.add_entity(actor(2, "Guard", 3, 1));
        world.add_entity(actor(3, "Guard", 7, 7));

        let found = nearest_actor(&world, "guard").unwrap();
        assert_eq!(found.id, EntityId(2));
    }

    #[test]
    fn test_equidistant_tie_keeps_first_in_scan_order() {
        let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
        // Both at Chebyshev distance 5
        world.add_entity(actor(10, "Guard", 5, 0));
        world.add_entity(actor(11, "Guard", 0, 5));

        let found = nearest_actor(&world, "guard").unwrap();
        assert_eq!(found.id, EntityId(10));
    }

    #[test]
    fn test_unloaded_player_yields_none() {
        let mut world = ScriptedWorld::unloaded();
        world.add_entity(actor(1, "Guard", 1, 1));
        assert!(nearest_actor(&world, "guard").is_none());
    }

    #[test]
    fn test_kind_filter_excludes_objects() {
        let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
        world.add_entity(Entity::new(
            EntityId(1),
            EntityKind::Object,
            "Guard statue",
            WorldPoint::new(0, 1, 1),
        ));
        assert!(nearest_actor(&world, "guard").is_none());
        assert!(nearest_object(&world, "guard").is_some());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The scan must return an entity at the true minimum distance.
            #[test]
            fn nearest_is_global_minimum(coords in prop::collection::vec((-50i32..50, -50i32..50), 1..20)) {
                let player = WorldPoint::new(0, 0, 0);
                let mut world = ScriptedWorld::new(player);
                for (i, (x, y)) in coords.iter().enumerate() {
                    world.add_entity(actor(i as u64, "Guard", *x, *y));
                }
                let found = nearest_actor(&world, "guard").unwrap();
                let best = coords
                    .iter()
                    .map(|(x, y)| WorldPoint::new(0, *x, *y).distance_to(&player))
                    .min()
                    .unwrap();
                prop_assert_eq!(found.position.distance_to(&player), best);
            }
        }
    }
}

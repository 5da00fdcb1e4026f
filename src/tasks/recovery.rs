//! Low-vital recovery: find a consumable and sip it
//!
//! The resource-threshold interrupt shared by the automations. It is a
//! pre-emptive branch, not a failure path: tasks consult it before their
//! normal transition and substitute the sip when a vital runs low.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::core::config::percent_to_fraction;
use crate::world::entity::Vital;
use crate::world::snapshot::Perception;

/// When and what to consume on a low vital
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// The vital being watched
    pub vital: Vital,
    /// Percentage of the maximum below which recovery triggers
    pub threshold_percent: u32,
    /// Consumable name substrings, any of which qualifies
    pub consumables: Vec<String>,
    /// Verb applied to the inventory slot
    pub verb: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            vital: Vital::Prayer,
            threshold_percent: 20,
            consumables: vec![
                "prayer potion".into(),
                "super restore".into(),
                "sanfew".into(),
            ],
            verb: "Drink".into(),
        }
    }
}

impl RecoveryConfig {
    /// Whether the watched vital currently reads below the cutoff
    pub fn is_low(&self, world: &dyn Perception) -> bool {
        world.vital_below(self.vital, percent_to_fraction(self.threshold_percent))
    }

    /// The sip action, if a qualifying consumable is carried
    ///
    /// Scans inventory in slot order and takes the first slot matching any
    /// rule. A miss is recoverable: the caller just proceeds with its
    /// normal transition this tick.
    pub fn sip(&self, world: &dyn Perception) -> Option<Action> {
        for slot in world.inventory() {
            if self.consumables.iter().any(|c| slot.name_contains(c)) {
                tracing::info!(item = %slot.name, "Low {:?}, consuming", self.vital);
                return Some(Action::inventory_op(self.verb.clone(), slot.name.clone(), slot.slot));
            }
        }
        tracing::warn!("Low {:?} but no qualifying consumable carried", self.vital);
        None
    }

    /// Combined check: the sip action iff the vital is low and a
    /// consumable is available
    pub fn interrupt(&self, world: &dyn Perception) -> Option<Action> {
        if !self.is_low(world) {
            return None;
        }
        self.sip(world)
    }
}

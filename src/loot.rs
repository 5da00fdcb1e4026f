//! Loot classification and per-task tracking of dropped items
//!
//! A task holds exactly one filter policy — inclusion-only or
//! exclusion-only. The enum makes a mixed policy unrepresentable, so the
//! "name matches both lists" ambiguity cannot arise.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, WorldPoint};
use crate::world::entity::Entity;

/// Name-matching policy for ground items
///
/// Rules are case-insensitive substrings of the item name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LootFilter {
    /// Accept only names matching at least one rule
    Whitelist(Vec<String>),
    /// Reject names matching any rule
    Blacklist(Vec<String>),
    /// Accept everything
    All,
}

impl LootFilter {
    pub fn whitelist<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Whitelist(rules.into_iter().map(|r| r.into().to_lowercase()).collect())
    }

    pub fn blacklist<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Blacklist(rules.into_iter().map(|r| r.into().to_lowercase()).collect())
    }

    /// Whether an item with this name should be tracked
    pub fn accepts(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            Self::Whitelist(rules) => rules.iter().any(|r| name.contains(r.as_str())),
            Self::Blacklist(rules) => !rules.iter().any(|r| name.contains(r.as_str())),
            Self::All => true,
        }
    }
}

/// Ground items a task has seen spawn and still intends to pick up
///
/// Appended from spawn notifications that pass the filter, removed by
/// identity on despawn notifications, and bulk-cleared after an agent-death
/// event. Owned exclusively by its task's context.
#[derive(Debug, Clone, Default)]
pub struct PendingLoot {
    items: Vec<Entity>,
}

impl PendingLoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a spawned item if the filter accepts its name
    ///
    /// Nameless ground items are never tracked. Returns whether the item
    /// was added.
    pub fn offer(&mut self, entity: &Entity, filter: &LootFilter) -> bool {
        let accepted = entity
            .name
            .as_deref()
            .map(|n| filter.accepts(n))
            .unwrap_or(false);
        if accepted {
            self.items.push(entity.clone());
        }
        accepted
    }

    /// Drop a tracked item by identity (despawn or successful pickup)
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.id != id);
        self.items.len() != before
    }

    /// The tracked item nearest to `player`, ties to the earliest tracked
    pub fn nearest(&self, player: WorldPoint) -> Option<&Entity> {
        let mut best: Option<(&Entity, i32)> = None;
        for item in &self.items {
            let distance = item.position.distance_to(&player);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((item, distance)),
            }
        }
        best.map(|(e, _)| e)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }
}

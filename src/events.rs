//! Asynchronous world-change notifications and their delivery queue
//!
//! The host pushes events between ticks; the task host drains the mailbox at
//! one single point, at the start of the next tick's decision step. Nothing
//! in the core reads events mid-tick, which is what makes the
//! notification-then-decide ordering reliable.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;
use crate::world::entity::Entity;

/// A typed world-change notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// An entity spawned into the scene
    EntityAppeared(Entity),
    /// An entity left the scene (picked up, expired, destroyed)
    EntityVanished(EntityId),
    /// A tracked actor was removed: death or departure of the agent itself
    /// or of another watched character
    ActorRemoved(EntityId),
    /// A projectile of the given host type id was launched
    ProjectileLaunched(i32),
    /// A chat-style text event
    Text(String),
}

/// Event queue owned by the task host
///
/// Pushes happen between decision steps; `drain` empties the queue in
/// arrival order.
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: VecDeque<WorldEvent>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: WorldEvent) {
        self.queue.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<WorldEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Fixed phrase table mapping text events to boolean flag toggles
///
/// Each rule fires when its phrase occurs as a substring of the event text
/// and yields `(flag, value)` for the task to apply.
#[derive(Debug, Clone)]
pub struct PhraseTable<F> {
    rules: Vec<(String, F, bool)>,
}

impl<F: Copy> PhraseTable<F> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Set `flag` when `phrase` is seen
    pub fn set_on(mut self, phrase: impl Into<String>, flag: F) -> Self {
        self.rules.push((phrase.into(), flag, true));
        self
    }

    /// Clear `flag` when `phrase` is seen
    pub fn clear_on(mut self, phrase: impl Into<String>, flag: F) -> Self {
        self.rules.push((phrase.into(), flag, false));
        self
    }

    /// All toggles triggered by `text`, in rule order
    pub fn matches(&self, text: &str) -> Vec<(F, bool)> {
        self.rules
            .iter()
            .filter(|(phrase, _, _)| text.contains(phrase.as_str()))
            .map(|(_, flag, value)| (*flag, *value))
            .collect()
    }
}

impl<F: Copy> Default for PhraseTable<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailbox_preserves_arrival_order() {
        let mut mailbox = Mailbox::new();
        mailbox.push(WorldEvent::Text("first".into()));
        mailbox.push(WorldEvent::EntityVanished(EntityId(1)));
        let drained = mailbox.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], WorldEvent::Text("first".into()));
        assert!(mailbox.is_empty());
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Flag {
        Spawned,
    }

    #[test]
    fn test_phrase_table_substring_toggle() {
        let table = PhraseTable::new()
            .set_on("guard has been spawned", Flag::Spawned)
            .clear_on("You have been awarded", Flag::Spawned);

        assert_eq!(
            table.matches("A security guard has been spawned nearby!"),
            vec![(Flag::Spawned, true)]
        );
        assert_eq!(
            table.matches("You have been awarded 50 points."),
            vec![(Flag::Spawned, false)]
        );
        assert!(table.matches("unrelated chatter").is_empty());
    }
}

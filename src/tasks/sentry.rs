//! Phrase-triggered sentry: wait for an announcement, then engage
//!
//! Demonstrates the text-event path: a fixed phrase table toggles between
//! watching and responding, and while responding the task periodically
//! talks to the nearest matching actor.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::events::{PhraseTable, WorldEvent};
use crate::task::{Task, TaskContext, Transition};
use crate::world::snapshot::{nearest_actor, Perception};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentryState {
    /// No target announced; idle re-poll
    Watching,
    /// Announcement seen; periodically engaging the target
    Responding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SentryFlag {
    TargetAnnounced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentryConfig {
    /// Actor name substring to engage
    pub target_name: String,
    /// Phrase announcing the target's arrival
    pub spawn_phrase: String,
    /// Phrase announcing the target has been dealt with
    pub done_phrase: String,
    /// Ticks between engagement attempts while responding
    pub respond_interval: u32,
    /// Ticks between idle re-polls while watching
    pub watch_interval: u32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            target_name: "security guard".into(),
            spawn_phrase: "A security guard has been spawned".into(),
            done_phrase: "You have been awarded".into(),
            respond_interval: 20,
            watch_interval: 7,
        }
    }
}

pub struct SentryTask {
    config: SentryConfig,
    phrases: PhraseTable<SentryFlag>,
    state: SentryState,
}

impl SentryTask {
    pub fn new(config: SentryConfig) -> Self {
        let phrases = PhraseTable::new()
            .set_on(config.spawn_phrase.clone(), SentryFlag::TargetAnnounced)
            .clear_on(config.done_phrase.clone(), SentryFlag::TargetAnnounced);
        Self {
            config,
            phrases,
            state: SentryState::Watching,
        }
    }

    pub fn state(&self) -> SentryState {
        self.state
    }
}

impl Task for SentryTask {
    fn name(&self) -> &str {
        "sentry"
    }

    fn on_event(&mut self, _ctx: &mut TaskContext, event: &WorldEvent) {
        let WorldEvent::Text(text) = event else {
            return;
        };
        for (flag, value) in self.phrases.matches(text) {
            match flag {
                SentryFlag::TargetAnnounced => {
                    if value {
                        tracing::info!("Target spawn announced");
                        self.state = SentryState::Responding;
                    } else {
                        tracing::info!("Target dealt with");
                        self.state = SentryState::Watching;
                    }
                }
            }
        }
    }

    fn on_tick(&mut self, _ctx: &mut TaskContext, world: &dyn Perception) -> Transition {
        match self.state {
            SentryState::Watching => {
                tracing::debug!("Still waiting for the target announcement");
                Transition::wait(self.config.watch_interval)
            }
            SentryState::Responding => match nearest_actor(world, &self.config.target_name) {
                Some(target) => {
                    let action = Action::talk_to(
                        target.name.clone().unwrap_or_default(),
                        target.id,
                        target.position.x,
                        target.position.y,
                    );
                    Transition::act(action, self.config.respond_interval)
                }
                None => {
                    tracing::debug!(target = %self.config.target_name, "No target found nearby, waiting");
                    Transition::wait(self.config.respond_interval)
                }
            },
        }
    }

    fn on_stop(&mut self, _ctx: &mut TaskContext) {
        self.state = SentryState::Watching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PacingConfig;
    use crate::core::types::{EntityId, TaskId, WorldPoint};
    use crate::loot::LootFilter;
    use crate::world::entity::{Entity, EntityKind};
    use crate::world::scripted::ScriptedWorld;

    fn task_and_ctx() -> (SentryTask, TaskContext) {
        (
            SentryTask::new(SentryConfig::default()),
            TaskContext::new(TaskId(1), PacingConfig::default(), LootFilter::All),
        )
    }

    #[test]
    fn test_announcement_flips_state() {
        let (mut task, mut ctx) = task_and_ctx();
        assert_eq!(task.state(), SentryState::Watching);

        task.on_event(
            &mut ctx,
            &WorldEvent::Text("A security guard has been spawned nearby!".into()),
        );
        assert_eq!(task.state(), SentryState::Responding);

        task.on_event(
            &mut ctx,
            &WorldEvent::Text("You have been awarded 10 points.".into()),
        );
        assert_eq!(task.state(), SentryState::Watching);
    }

    #[test]
    fn test_watching_never_acts() {
        let (mut task, mut ctx) = task_and_ctx();
        let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
        world.add_entity(Entity::new(
            EntityId(1),
            EntityKind::Actor,
            "Security guard",
            WorldPoint::new(0, 2, 2),
        ));

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
    }

    #[test]
    fn test_responding_talks_to_nearest_target() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = SentryState::Responding;
        let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
        world.add_entity(Entity::new(
            EntityId(1),
            EntityKind::Actor,
            "Security guard",
            WorldPoint::new(0, 9, 9),
        ));
        world.add_entity(Entity::new(
            EntityId(2),
            EntityKind::Actor,
            "Security guard",
            WorldPoint::new(0, 1, 1),
        ));

        let t = task.on_tick(&mut ctx, &world);
        let action = t.action.unwrap();
        assert_eq!(action.verb, "Talk-to");
        assert_eq!(action.target_id, 2);
        assert_eq!(t.rearm, Some(task.config.respond_interval));
    }

    #[test]
    fn test_responding_miss_waits_without_action() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = SentryState::Responding;
        let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
        assert_eq!(t.rearm, Some(task.config.respond_interval));
    }
}

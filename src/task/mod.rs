//! Task lifecycle trait and per-task owned state
//!
//! A task is one automation: a closed state enum plus a decision function.
//! The host owns scheduling; the task owns only its state. All the mutable
//! bookkeeping a task needs between ticks lives in one [`TaskContext`],
//! passed by reference into the decision step — no process-wide state.

pub mod host;

use crate::action::Action;
use crate::core::config::PacingConfig;
use crate::core::types::{EntityId, TaskId, Tick};
use crate::events::WorldEvent;
use crate::loot::{LootFilter, PendingLoot};
use crate::world::snapshot::Perception;

/// Output of one decision step
///
/// At most one action; an optional re-arm of the task's cooldown; an
/// optional deferred follow-up action. A step that emits an action is always
/// suppressed for at least the following tick, whether or not it re-arms
/// explicitly — the host enforces this.
#[derive(Debug, Clone, Default)]
pub struct Transition {
    pub action: Option<Action>,
    pub rearm: Option<u32>,
    pub followup: Option<(Action, u32)>,
}

impl Transition {
    /// No action, no cooldown change: re-check next eligible tick
    pub fn idle() -> Self {
        Self::default()
    }

    /// No action; sleep for `ticks` before the next decision
    pub fn wait(ticks: u32) -> Self {
        Self {
            rearm: Some(ticks),
            ..Default::default()
        }
    }

    /// Emit `action`, then sleep for `ticks`
    pub fn act(action: Action, ticks: u32) -> Self {
        Self {
            action: Some(action),
            rearm: Some(ticks),
            ..Default::default()
        }
    }

    /// Additionally schedule a follow-up action `delay` ticks out
    pub fn then(mut self, action: Action, delay: u32) -> Self {
        self.followup = Some((action, delay));
        self
    }
}

/// The automation contract implemented per task
///
/// `on_tick` is only invoked on ticks where the task's cooldown has run out;
/// events are applied before any decision step of the same tick.
pub trait Task {
    fn name(&self) -> &str;

    /// Called once when the host starts the task
    fn on_start(&mut self, _ctx: &mut TaskContext) {}

    /// Observe one drained notification. Context bookkeeping (pending loot,
    /// death handling) has already been applied when this runs.
    fn on_event(&mut self, _ctx: &mut TaskContext, _event: &WorldEvent) {}

    /// The decision step: read the world, produce zero or one action
    fn on_tick(&mut self, ctx: &mut TaskContext, world: &dyn Perception) -> Transition;

    /// Called on external stop, after the host has cleared timers, pending
    /// loot and any deferred action. Reset internal state here.
    fn on_stop(&mut self, _ctx: &mut TaskContext) {}
}

/// Mutable state owned by one task instance
#[derive(Debug)]
pub struct TaskContext {
    pub id: TaskId,
    /// Host tick counter at the current decision step
    pub tick: Tick,
    pub pacing: PacingConfig,
    pub loot_filter: LootFilter,
    pub pending_loot: PendingLoot,
    /// Identity of the agent's own actor, if the host reports one; used to
    /// tell the agent's death apart from other actor removals
    pub agent: Option<EntityId>,
    /// Set by tasks around a self-initiated teleport so the resulting
    /// actor-removal is not mistaken for a death
    travel_in_progress: bool,
    loot_clear_in: Option<u32>,
}

impl TaskContext {
    pub fn new(id: TaskId, pacing: PacingConfig, loot_filter: LootFilter) -> Self {
        Self {
            id,
            tick: 0,
            pacing,
            loot_filter,
            pending_loot: PendingLoot::new(),
            agent: None,
            travel_in_progress: false,
            loot_clear_in: None,
        }
    }

    /// Mark the start of a self-initiated departure (teleport, boat ride)
    pub fn begin_travel(&mut self) {
        self.travel_in_progress = true;
    }

    pub fn travel_in_progress(&self) -> bool {
        self.travel_in_progress
    }

    /// Ticks until a scheduled post-death loot clear, if one is pending
    pub fn loot_clear_pending(&self) -> bool {
        self.loot_clear_in.is_some()
    }

    /// Apply one notification to the context's own bookkeeping
    pub(crate) fn apply_event(&mut self, event: &WorldEvent) {
        match event {
            WorldEvent::EntityAppeared(entity) => {
                if self.pending_loot.offer(entity, &self.loot_filter) {
                    tracing::debug!(name = ?entity.name, "Loot spawned");
                }
            }
            WorldEvent::EntityVanished(id) => {
                self.pending_loot.remove(*id);
            }
            WorldEvent::ActorRemoved(id) => {
                if self.agent == Some(*id) {
                    if self.travel_in_progress {
                        tracing::debug!("Agent despawned due to travel");
                        self.travel_in_progress = false;
                    } else {
                        tracing::info!(
                            delay = self.pacing.death_loot_clear_delay,
                            "Agent despawned (likely died), scheduling loot clear"
                        );
                        self.loot_clear_in = Some(self.pacing.death_loot_clear_delay);
                    }
                }
            }
            WorldEvent::ProjectileLaunched(_) | WorldEvent::Text(_) => {}
        }
    }

    /// Per-tick context upkeep, run before the decision step
    pub(crate) fn begin_tick(&mut self, tick: Tick) {
        self.tick = tick;
        if let Some(remaining) = self.loot_clear_in {
            if remaining == 0 {
                tracing::info!("Clearing tracked loot after death");
                self.pending_loot.clear();
                self.loot_clear_in = None;
            } else {
                self.loot_clear_in = Some(remaining - 1);
            }
        }
    }

    /// Discard all transient state (external stop)
    pub(crate) fn reset(&mut self) {
        self.pending_loot.clear();
        self.loot_clear_in = None;
        self.travel_in_progress = false;
    }
}

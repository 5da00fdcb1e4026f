//! Per-tick driver tying the components together
//!
//! Order within one host tick, per task:
//! drain mailbox → run deferred action → cooldown gate → decision step →
//! dispatch. Events always land before the decision that reads them, and a
//! tick never carries more than one external action per task.

use crate::action::{ActionDispatcher, Actuator};
use crate::core::config::PacingConfig;
use crate::core::error::{BotError, Result};
use crate::core::types::{TaskId, Tick};
use crate::events::{Mailbox, WorldEvent};
use crate::loot::LootFilter;
use crate::scheduler::CooldownScheduler;
use crate::task::{Task, TaskContext};
use crate::world::snapshot::Perception;

struct TaskSlot {
    task: Box<dyn Task>,
    ctx: TaskContext,
    dispatcher: ActionDispatcher,
    running: bool,
}

/// Owns every registered task and drives them one decision step per tick
#[derive(Default)]
pub struct TaskHost {
    slots: Vec<TaskSlot>,
    scheduler: CooldownScheduler,
    mailbox: Mailbox,
    tick: Tick,
    next_id: u32,
}

impl TaskHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task; it stays stopped until [`TaskHost::start`]
    pub fn register(
        &mut self,
        task: Box<dyn Task>,
        loot_filter: LootFilter,
        pacing: PacingConfig,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.slots.push(TaskSlot {
            ctx: TaskContext::new(id, pacing, loot_filter),
            task,
            dispatcher: ActionDispatcher::new(),
            running: false,
        });
        id
    }

    /// Mutable access to a task's context (e.g. to set the agent identity)
    pub fn context_mut(&mut self, id: TaskId) -> Option<&mut TaskContext> {
        self.slots.iter_mut().find(|s| s.ctx.id == id).map(|s| &mut s.ctx)
    }

    pub fn start(&mut self, id: TaskId) -> Result<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.ctx.id == id)
            .ok_or(BotError::UnknownTask(id))?;
        if !slot.running {
            tracing::info!(task = slot.task.name(), "Task started");
            slot.running = true;
            slot.task.on_start(&mut slot.ctx);
        }
        Ok(())
    }

    /// Stop immediately: reset state, clear loot and timers, discard any
    /// deferred action without completing it
    pub fn stop(&mut self, id: TaskId) -> Result<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.ctx.id == id)
            .ok_or(BotError::UnknownTask(id))?;
        if slot.running {
            tracing::info!(task = slot.task.name(), "Task stopped");
            slot.running = false;
            slot.dispatcher.cancel_deferred();
            slot.ctx.reset();
            slot.task.on_stop(&mut slot.ctx);
        }
        self.scheduler.reset(id);
        Ok(())
    }

    /// Queue a notification for delivery at the start of the next tick
    pub fn push_event(&mut self, event: WorldEvent) {
        self.mailbox.push(event);
    }

    /// Current host tick counter
    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    /// Run one simulation tick against the given snapshot
    pub fn tick(&mut self, world: &dyn Perception, actuator: &mut dyn Actuator) {
        self.tick += 1;

        // Single drain point: every queued notification lands before any
        // decision step of this tick.
        for event in self.mailbox.drain() {
            for slot in self.slots.iter_mut().filter(|s| s.running) {
                slot.ctx.apply_event(&event);
                slot.task.on_event(&mut slot.ctx, &event);
            }
        }

        for slot in self.slots.iter_mut().filter(|s| s.running) {
            slot.ctx.begin_tick(self.tick);

            // A firing deferred action consumes this tick's action budget.
            if slot.dispatcher.run_deferred(actuator) {
                continue;
            }

            if !self.scheduler.tick(slot.ctx.id) {
                continue;
            }

            let transition = slot.task.on_tick(&mut slot.ctx, world);

            let acted = match &transition.action {
                Some(action) => slot.dispatcher.dispatch(actuator, action),
                None => false,
            };
            if let Some((action, delay)) = transition.followup {
                slot.dispatcher.defer(action, delay);
            }

            // Emitting an action always suppresses at least the next tick;
            // a retry of the same decision within one tick can only come
            // from the eligibility gate, never from the task itself.
            let rearm = transition.rearm.unwrap_or(0).max(u32::from(acted));
            if rearm > 0 {
                self.scheduler.arm(slot.ctx.id, rearm);
            }
        }
    }
}

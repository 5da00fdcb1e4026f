//! Action intents and the fire-and-forget dispatch path
//!
//! An [`Action`] mirrors the host actuator's menu-invocation surface: verb,
//! target name, target identifier, an action-kind code and two positional
//! parameters. The actuator only enqueues intent — there is no success
//! channel back, so tasks must re-derive world state fresh each eligible
//! tick instead of assuming an action landed.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, PromptId};

/// Host-side interpretation of an action's parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Operate a UI component (drink, withdraw, deposit)
    ComponentOp,
    /// First context option on an actor (talk-to)
    ActorFirstOption,
    /// Second context option on an actor (attack)
    ActorSecondOption,
    /// First context option on a scene object (board, mine, use)
    ObjectFirstOption,
    /// Third context option on a ground item (take)
    GroundItemThirdOption,
    /// Advance an interactive prompt
    PromptContinue,
}

/// One action intent, write-once per dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub verb: String,
    pub target: String,
    pub target_id: i64,
    pub kind: ActionKind,
    pub param0: i32,
    pub param1: i32,
}

impl Action {
    pub fn new(
        verb: impl Into<String>,
        target: impl Into<String>,
        target_id: i64,
        kind: ActionKind,
        param0: i32,
        param1: i32,
    ) -> Self {
        Self {
            verb: verb.into(),
            target: target.into(),
            target_id,
            kind,
            param0,
            param1,
        }
    }

    /// Attack a named actor
    pub fn attack(name: impl Into<String>, id: EntityId) -> Self {
        Self::new("Attack", name, id.0 as i64, ActionKind::ActorSecondOption, 0, 0)
    }

    /// Open dialogue with a named actor standing at (x, y)
    pub fn talk_to(name: impl Into<String>, id: EntityId, x: i32, y: i32) -> Self {
        Self::new("Talk-to", name, id.0 as i64, ActionKind::ActorFirstOption, x, y)
    }

    /// Pick up a ground item lying at (x, y)
    pub fn take(name: impl Into<String>, id: EntityId, x: i32, y: i32) -> Self {
        Self::new("Take", name, id.0 as i64, ActionKind::GroundItemThirdOption, x, y)
    }

    /// Apply `verb` to a scene object at (x, y)
    pub fn interact_object(
        verb: impl Into<String>,
        name: impl Into<String>,
        id: EntityId,
        x: i32,
        y: i32,
    ) -> Self {
        Self::new(verb, name, id.0 as i64, ActionKind::ObjectFirstOption, x, y)
    }

    /// Choose option `option_index` of an open prompt
    pub fn prompt_continue(prompt: PromptId, option_index: usize) -> Self {
        Self::new(
            "Continue",
            "",
            0,
            ActionKind::PromptContinue,
            option_index as i32,
            prompt.0 as i32,
        )
    }

    /// Operate an inventory slot (e.g. "Drink" a potion, "Use" an item)
    pub fn inventory_op(verb: impl Into<String>, name: impl Into<String>, slot: u32) -> Self {
        Self::new(verb, name, 0, ActionKind::ComponentOp, slot as i32, 0)
    }
}

/// The external actuator boundary
///
/// Synchronous, enqueue-only on the host side; no return value indicates
/// success or failure.
pub trait Actuator {
    fn invoke(&mut self, action: &Action);
}

/// Actuator that records intents, for the demo harness and tests
#[derive(Debug, Default)]
pub struct RecordingActuator {
    pub actions: Vec<Action>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_all(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl Actuator for RecordingActuator {
    fn invoke(&mut self, action: &Action) {
        self.actions.push(action.clone());
    }
}

#[derive(Debug, Clone)]
struct Deferred {
    action: Action,
    due_in: u32,
}

/// Validates and forwards at most one action intent per tick
///
/// One dispatcher per task. A deferred action is a follow-up that must trail
/// a UI transition by some ticks (e.g. the prompt-continue after a teleport);
/// it fires automatically without re-entering the decision function, and at
/// most one may be pending at a time — registering another replaces it.
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    deferred: Option<Deferred>,
    dispatched: u64,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward `action` to the actuator; returns whether it was accepted
    pub fn dispatch(&mut self, actuator: &mut dyn Actuator, action: &Action) -> bool {
        if action.verb.is_empty() {
            tracing::warn!(?action, "Rejecting action with empty verb");
            return false;
        }
        tracing::debug!(verb = %action.verb, target = %action.target, "Dispatching action");
        actuator.invoke(action);
        self.dispatched += 1;
        true
    }

    /// Schedule `action` to fire after `delay` ticks
    pub fn defer(&mut self, action: Action, delay: u32) {
        if self.deferred.is_some() {
            tracing::debug!("Replacing pending deferred action");
        }
        self.deferred = Some(Deferred {
            action,
            due_in: delay,
        });
    }

    /// Advance the deferred countdown; fires the action on its due tick
    ///
    /// Returns whether an action fired, in which case the caller skips this
    /// tick's decision step to keep the one-action-per-tick invariant.
    pub fn run_deferred(&mut self, actuator: &mut dyn Actuator) -> bool {
        match self.deferred.as_mut() {
            None => return false,
            Some(deferred) if deferred.due_in > 0 => {
                deferred.due_in -= 1;
                return false;
            }
            Some(_) => {}
        }
        match self.deferred.take() {
            Some(deferred) => self.dispatch(actuator, &deferred.action),
            None => false,
        }
    }

    /// Discard the pending follow-up without executing it (external stop)
    pub fn cancel_deferred(&mut self) {
        if self.deferred.take().is_some() {
            tracing::debug!("Discarded pending deferred action");
        }
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Total actions forwarded since construction
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

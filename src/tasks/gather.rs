//! Gather-until-full / bank cycle
//!
//! Two-state machine: work the nearest matching resource object until the
//! inventory fills up, then open the bank and deposit everything through a
//! deferred follow-up, giving the bank interface one tick to open.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind};
use crate::task::{Task, TaskContext, Transition};
use crate::tasks::recovery::RecoveryConfig;
use crate::world::snapshot::{nearest_object, Perception};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatherState {
    /// Working the resource object
    Gathering,
    /// Inventory full; depositing at the bank
    Banking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    /// Resource object name substring (e.g. an ore rock)
    pub resource_name: String,
    /// Verb applied to the resource object
    pub gather_verb: String,
    /// Bank object name substring
    pub bank_name: String,
    /// Host component id of the deposit-all button
    pub deposit_component: i32,
    /// Low-vital interrupt; `None` disables recovery
    pub recovery: Option<RecoveryConfig>,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            resource_name: "adamantite".into(),
            gather_verb: "Mine".into(),
            bank_name: "Bank chest".into(),
            deposit_component: 786474,
            recovery: None,
        }
    }
}

pub struct GatherTask {
    config: GatherConfig,
    state: GatherState,
}

impl GatherTask {
    pub fn new(config: GatherConfig) -> Self {
        Self {
            config,
            state: GatherState::Gathering,
        }
    }

    pub fn state(&self) -> GatherState {
        self.state
    }

    fn handle_gathering(&mut self, ctx: &TaskContext, world: &dyn Perception) -> Transition {
        if world.inventory_full() {
            tracing::info!("Inventory full, switching to banking");
            self.state = GatherState::Banking;
            return Transition::idle();
        }
        match nearest_object(world, &self.config.resource_name) {
            Some(resource) => {
                let action = Action::interact_object(
                    self.config.gather_verb.clone(),
                    resource.name.clone().unwrap_or_default(),
                    resource.id,
                    resource.position.x,
                    resource.position.y,
                );
                Transition::act(action, ctx.pacing.retry_delay)
            }
            None => {
                tracing::info!(resource = %self.config.resource_name, "No resource nearby");
                Transition::idle()
            }
        }
    }

    fn handle_banking(&mut self, ctx: &TaskContext, world: &dyn Perception) -> Transition {
        match nearest_object(world, &self.config.bank_name) {
            Some(bank) => {
                let open = Action::interact_object(
                    "Use",
                    bank.name.clone().unwrap_or_default(),
                    bank.id,
                    bank.position.x,
                    bank.position.y,
                );
                let deposit = Action::new(
                    "Deposit-All",
                    "",
                    -1,
                    ActionKind::ComponentOp,
                    -1,
                    self.config.deposit_component,
                );
                self.state = GatherState::Gathering;
                Transition::act(open, ctx.pacing.return_delay).then(deposit, 1)
            }
            None => {
                tracing::warn!(bank = %self.config.bank_name, "No bank found nearby");
                Transition::wait(ctx.pacing.retry_delay)
            }
        }
    }
}

impl Task for GatherTask {
    fn name(&self) -> &str {
        "gather"
    }

    fn on_tick(&mut self, ctx: &mut TaskContext, world: &dyn Perception) -> Transition {
        if let Some(recovery) = &self.config.recovery {
            if let Some(sip) = recovery.interrupt(world) {
                return Transition::act(sip, ctx.pacing.recovery_delay);
            }
        }
        match self.state {
            GatherState::Gathering => self.handle_gathering(ctx, world),
            GatherState::Banking => self.handle_banking(ctx, world),
        }
    }

    fn on_stop(&mut self, _ctx: &mut TaskContext) {
        self.state = GatherState::Gathering;
    }
}

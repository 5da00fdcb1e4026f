//! Instanced-boss cycle: board, confirm, wait, fight, loot, return
//!
//! The richest automation in the family. One full cycle walks
//! Idle → Boarding → AwaitConfirmation → AwaitTarget → Engaging → Looting →
//! Returning and back to Idle, indefinitely until externally stopped. Every
//! lookup miss is recoverable by waiting or falling back one state.
//!
//! Priority policy, applied consistently here and in the other tasks:
//! pending loot beats the recovery interrupt; the recovery interrupt beats
//! everything else.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind};
use crate::core::types::PromptId;
use crate::task::{Task, TaskContext, Transition};
use crate::tasks::recovery::RecoveryConfig;
use crate::world::snapshot::{nearest_actor, nearest_object, Perception};

/// States of the boss automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Idle,
    /// Looking for the embarkation object and boarding it
    Boarding,
    /// Boarded; waiting for the yes/no prompt and confirming it
    AwaitConfirmation,
    /// Inside the instance; waiting for the boss to spawn
    AwaitTarget,
    /// Boss sighted; attack once, then watch until it goes down
    Engaging,
    /// Boss down; picking up tracked drops
    Looting,
    /// Teleporting back out to restart the cycle
    Returning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    /// Scene object boarded to enter the instance
    pub boat_name: String,
    /// Prompt option label that confirms the ride
    pub confirm_option: String,
    /// The boss actor's name
    pub boss_name: String,
    /// Verb on the teleport component used to leave
    pub teleport_verb: String,
    pub teleport_target: String,
    /// Host component id carrying the teleport option
    pub teleport_component: i32,
    /// Prompt advanced one tick after the teleport action
    pub continue_prompt: u32,
    /// Low-vital interrupt; `None` disables recovery
    pub recovery: Option<RecoveryConfig>,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            boat_name: "Sacrificial Boat".into(),
            confirm_option: "Yes".into(),
            boss_name: "Zulrah".into(),
            teleport_verb: "Previous-teleport".into(),
            teleport_target: "Home Teleport".into(),
            teleport_component: 14286948,
            continue_prompt: 14352385,
            recovery: Some(RecoveryConfig::default()),
        }
    }
}

pub struct BossTask {
    config: BossConfig,
    state: BossState,
    /// Whether the attack for the current engagement was already issued
    attacked: bool,
}

impl BossTask {
    pub fn new(config: BossConfig) -> Self {
        Self {
            config,
            state: BossState::Idle,
            attacked: false,
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    fn enter(&mut self, next: BossState) {
        tracing::info!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }

    fn handle_boarding(&mut self, ctx: &TaskContext, world: &dyn Perception) -> Transition {
        match nearest_object(world, &self.config.boat_name) {
            Some(boat) => {
                let action = Action::interact_object(
                    "Board",
                    boat.name.clone().unwrap_or_default(),
                    boat.id,
                    boat.position.x,
                    boat.position.y,
                );
                self.enter(BossState::AwaitConfirmation);
                Transition::act(action, ctx.pacing.travel_delay)
            }
            None => {
                tracing::warn!(object = %self.config.boat_name, "Boarding object not found, retrying");
                Transition::wait(ctx.pacing.retry_delay)
            }
        }
    }

    fn handle_confirmation(&mut self, ctx: &TaskContext, world: &dyn Perception) -> Transition {
        if let Some((prompt, index)) = world.prompt_with_option(&self.config.confirm_option) {
            let action = Action::prompt_continue(prompt.id, index);
            self.enter(BossState::AwaitTarget);
            return Transition::act(action, ctx.pacing.confirm_delay);
        }
        if world.open_prompt().is_some() {
            // Prompt is up but the expected option is missing; keep polling.
            tracing::warn!(option = %self.config.confirm_option, "Prompt option not found");
            return Transition::idle();
        }
        tracing::warn!("Confirmation prompt not open, re-boarding");
        self.enter(BossState::Boarding);
        Transition::wait(ctx.pacing.retry_delay)
    }

    fn handle_engaging(&mut self, ctx: &TaskContext, world: &dyn Perception) -> Transition {
        if world.player_position().is_none() {
            // Scene not loaded; skip this tick without state change.
            return Transition::idle();
        }
        match nearest_actor(world, &self.config.boss_name) {
            Some(target) if !self.attacked => {
                self.attacked = true;
                let action = Action::attack(target.name.clone().unwrap_or_default(), target.id);
                Transition::act(action, ctx.pacing.engage_delay)
            }
            Some(_) => Transition::wait(ctx.pacing.engage_delay),
            // An absent target only means death once the attack went out;
            // before that it is a lookup miss, so fall back one state.
            None if !self.attacked => {
                tracing::warn!(boss = %self.config.boss_name, "Target lost before engaging, re-awaiting");
                self.enter(BossState::AwaitTarget);
                Transition::wait(ctx.pacing.retry_delay)
            }
            None => {
                tracing::info!("Target down, waiting for loot to spawn");
                self.attacked = false;
                self.enter(BossState::Looting);
                Transition::wait(ctx.pacing.loot_wait)
            }
        }
    }

    fn handle_looting(&mut self, ctx: &mut TaskContext, world: &dyn Perception) -> Transition {
        let Some(player) = world.player_position() else {
            // Scene not loaded; skip this tick without state change.
            return Transition::idle();
        };
        if let Some(item) = ctx.pending_loot.nearest(player).cloned() {
            ctx.pending_loot.remove(item.id);
            let action = Action::take(
                item.name.clone().unwrap_or_default(),
                item.id,
                item.position.x,
                item.position.y,
            );
            tracing::info!(item = ?item.name, "Picking up loot");
            return Transition::act(action, ctx.pacing.loot_pace);
        }
        // Loot outranks recovery; with nothing left to pick up the
        // interrupt gets its turn before we leave.
        if let Some(recovery) = &self.config.recovery {
            if let Some(sip) = recovery.interrupt(world) {
                return Transition::act(sip, ctx.pacing.recovery_delay);
            }
        }
        tracing::info!("No more loot, returning");
        self.enter(BossState::Returning);
        Transition::idle()
    }

    fn handle_returning(&mut self, ctx: &mut TaskContext) -> Transition {
        ctx.begin_travel();
        let teleport = Action::new(
            self.config.teleport_verb.clone(),
            self.config.teleport_target.clone(),
            2,
            ActionKind::ComponentOp,
            -1,
            self.config.teleport_component,
        );
        let advance = Action::prompt_continue(PromptId(self.config.continue_prompt), 0);
        self.enter(BossState::Idle);
        Transition::act(teleport, ctx.pacing.return_delay).then(advance, 1)
    }
}

impl Task for BossTask {
    fn name(&self) -> &str {
        "boss-run"
    }

    fn on_tick(&mut self, ctx: &mut TaskContext, world: &dyn Perception) -> Transition {
        // Recovery pre-empts the normal step everywhere except Looting,
        // which orders pending loot above it.
        if self.state != BossState::Looting {
            if let Some(recovery) = &self.config.recovery {
                if let Some(sip) = recovery.interrupt(world) {
                    return Transition::act(sip, ctx.pacing.recovery_delay);
                }
            }
        }

        match self.state {
            BossState::Idle => {
                tracing::info!("Starting cycle");
                self.enter(BossState::Boarding);
                Transition::idle()
            }
            BossState::Boarding => self.handle_boarding(ctx, world),
            BossState::AwaitConfirmation => self.handle_confirmation(ctx, world),
            BossState::AwaitTarget => {
                if world.actor_present(&self.config.boss_name) {
                    tracing::info!(boss = %self.config.boss_name, "Target spawned");
                    self.enter(BossState::Engaging);
                }
                Transition::idle()
            }
            BossState::Engaging => self.handle_engaging(ctx, world),
            BossState::Looting => self.handle_looting(ctx, world),
            BossState::Returning => self.handle_returning(ctx),
        }
    }

    fn on_stop(&mut self, _ctx: &mut TaskContext) {
        self.state = BossState::Idle;
        self.attacked = false;
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

    fn task_and_ctx() -> (BossTask, TaskContext) {
        let task = BossTask::new(BossConfig {
            recovery: None,
            ..Default::default()
        });
        let ctx = TaskContext::new(TaskId(1), PacingConfig::default(), LootFilter::All);
        (task, ctx)
    }

    #[test]
    fn test_boarding_miss_stays_and_waits() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::Boarding;
        let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
        assert_eq!(t.rearm, Some(ctx.pacing.retry_delay));
        assert_eq!(task.state(), BossState::Boarding);
    }

    #[test]
    fn test_missing_prompt_falls_back_to_boarding() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::AwaitConfirmation;
        let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
        assert_eq!(task.state(), BossState::Boarding);
    }

    #[test]
    fn test_engage_attacks_exactly_once_while_target_lives() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::Engaging;
        let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
        world.add_entity(Entity::new(
            EntityId(5),
            EntityKind::Actor,
            "Zulrah",
            WorldPoint::new(0, 3, 3),
        ));

        let first = task.on_tick(&mut ctx, &world);
        assert_eq!(first.action.unwrap().verb, "Attack");

        let second = task.on_tick(&mut ctx, &world);
        assert!(second.action.is_none());
        assert_eq!(task.state(), BossState::Engaging);
    }

    #[test]
    fn test_unloaded_scene_mid_fight_holds_engaging() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::Engaging;
        let world = ScriptedWorld::unloaded();

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
        assert!(t.rearm.is_none());
        assert_eq!(task.state(), BossState::Engaging);

        // Same while an attack is already out: no death call either way
        task.attacked = true;
        task.on_tick(&mut ctx, &world);
        assert_eq!(task.state(), BossState::Engaging);
    }

    #[test]
    fn test_target_lost_before_attack_reverts_to_awaiting() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::Engaging;
        let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
        assert_eq!(t.rearm, Some(ctx.pacing.retry_delay));
        assert_eq!(task.state(), BossState::AwaitTarget);
    }

    #[test]
    fn test_target_death_enters_loot_wait() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::Engaging;
        task.attacked = true;
        let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));

        let t = task.on_tick(&mut ctx, &world);
        assert!(t.action.is_none());
        assert_eq!(t.rearm, Some(ctx.pacing.loot_wait));
        assert_eq!(task.state(), BossState::Looting);
        assert!(!task.attacked);
    }

    #[test]
    fn test_returning_emits_teleport_with_followup() {
        let (mut task, mut ctx) = task_and_ctx();
        task.state = BossState::Returning;
        let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));

        let t = task.on_tick(&mut ctx, &world);
        assert_eq!(t.action.unwrap().verb, "Previous-teleport");
        let (followup, delay) = t.followup.unwrap();
        assert_eq!(followup.kind, ActionKind::PromptContinue);
        assert_eq!(delay, 1);
        assert_eq!(task.state(), BossState::Idle);
        assert!(ctx.travel_in_progress());
    }
}

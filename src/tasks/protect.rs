//! Projectile-reactive protection switching
//!
//! Purely event-driven: a launch notification selects the protection that
//! counters the incoming projectile type, and the next decision step toggles
//! it. The task runs on its own cooldown slot, so another automation's
//! in-flight timer never delays the switch.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind};
use crate::events::WorldEvent;
use crate::task::{Task, TaskContext, Transition};
use crate::world::snapshot::Perception;

/// One projectile type and the protection countering it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionRule {
    /// Host projectile type id
    pub projectile: i32,
    /// Protection name, for logs
    pub protection: String,
    /// Host component id of the protection toggle
    pub component: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectConfig {
    pub rules: Vec<ProtectionRule>,
}

impl Default for ProtectConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ProtectionRule {
                    projectile: 1044,
                    protection: "Protect from Missiles".into(),
                    component: 35454993,
                },
                ProtectionRule {
                    projectile: 1046,
                    protection: "Protect from Magic".into(),
                    component: 35454994,
                },
            ],
        }
    }
}

pub struct ProtectTask {
    config: ProtectConfig,
    /// Rule demanded by the latest launch, not yet toggled
    demanded: Option<usize>,
    /// Rule whose protection is currently up
    active: Option<usize>,
}

impl ProtectTask {
    pub fn new(config: ProtectConfig) -> Self {
        Self {
            config,
            demanded: None,
            active: None,
        }
    }

    /// Protection currently considered active, if any
    pub fn active_protection(&self) -> Option<&str> {
        self.active
            .map(|index| self.config.rules[index].protection.as_str())
    }
}

impl Task for ProtectTask {
    fn name(&self) -> &str {
        "protect"
    }

    fn on_event(&mut self, _ctx: &mut TaskContext, event: &WorldEvent) {
        let WorldEvent::ProjectileLaunched(id) = event else {
            return;
        };
        let Some(index) = self.config.rules.iter().position(|r| r.projectile == *id) else {
            return;
        };
        if self.active == Some(index) {
            // Already up; no flicker on a repeat launch.
            return;
        }
        tracing::info!(
            protection = %self.config.rules[index].protection,
            "Incoming projectile, switching protection"
        );
        self.demanded = Some(index);
    }

    fn on_tick(&mut self, _ctx: &mut TaskContext, _world: &dyn Perception) -> Transition {
        let Some(index) = self.demanded.take() else {
            return Transition::idle();
        };
        self.active = Some(index);
        let rule = &self.config.rules[index];
        let action = Action::new(
            "Activate",
            rule.protection.clone(),
            2,
            ActionKind::ComponentOp,
            -1,
            rule.component,
        );
        Transition::act(action, 0)
    }

    fn on_stop(&mut self, _ctx: &mut TaskContext) {
        self.demanded = None;
        self.active = None;
    }
}

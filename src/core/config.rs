//! Pacing configuration with documented constants
//!
//! All timer lengths are collected here with explanations of their purpose.
//! Values are in ticks and are read once at task start; the host owns the
//! real-time length of a tick.

use serde::{Deserialize, Serialize};

use crate::core::error::{BotError, Result};

/// Tick budgets shared by the automation tasks
///
/// These values reproduce the pacing of the behaviors they were tuned
/// against. Raising them slows every cycle; lowering them below the host's
/// action latency makes tasks re-issue actions that are still in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay before re-polling after a failed lookup (target or object
    /// not found). Fixed, no backoff growth.
    pub retry_delay: u32,

    /// Allowance for the player to walk to an interacted object before the
    /// follow-up step (e.g. reaching a boat before its confirmation prompt).
    pub travel_delay: u32,

    /// How long a confirmation prompt is expected to take to appear after
    /// the action that opens it. On expiry the initiating state is retried.
    pub confirm_delay: u32,

    /// Pause after issuing an attack, letting combat state settle before
    /// the next decision.
    pub engage_delay: u32,

    /// Grace window after a target's death for loot spawn notifications to
    /// arrive before concluding "no loot". Closes the race between the
    /// notification channel and the decision loop.
    pub loot_wait: u32,

    /// Pause between consecutive pickup actions.
    pub loot_pace: u32,

    /// Pause after issuing the return/teleport action.
    pub return_delay: u32,

    /// Delay before discarding tracked loot after the agent dies. Long
    /// enough for stray despawn notifications to drain first.
    pub death_loot_clear_delay: u32,

    /// Pause after a recovery action (sip/withdraw/retreat).
    pub recovery_delay: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            retry_delay: 5,
            travel_delay: 9,
            confirm_delay: 5,
            engage_delay: 2,
            loot_wait: 4,
            loot_pace: 1,
            return_delay: 2,
            death_loot_clear_delay: 10,
            recovery_delay: 10,
        }
    }
}

impl PacingConfig {
    /// Parse from a TOML string and validate
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PacingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject budgets that would stall or thrash the loop
    pub fn validate(&self) -> Result<()> {
        if self.loot_wait == 0 {
            return Err(BotError::InvalidConfig(
                "loot_wait must be at least 1 tick".into(),
            ));
        }
        if self.confirm_delay == 0 {
            return Err(BotError::InvalidConfig(
                "confirm_delay must be at least 1 tick".into(),
            ));
        }
        Ok(())
    }
}

/// Clamp an operator-supplied percentage cutoff into a usable fraction
///
/// Anything outside 1..=100 is pulled back into range rather than rejected.
pub fn percent_to_fraction(percent: u32) -> f64 {
    percent.clamp(1, 100) as f64 / 100.0
}

//! Per-task countdown timers and retry pacing
//!
//! The scheduler turns the host's high-frequency simulation tick into the
//! low-frequency decision cadence an in-flight action needs. While a task's
//! counter is positive its decision step is suppressed; the counter is
//! decremented at most once per tick.

use ahash::AHashMap;

use crate::core::types::TaskId;

/// Countdown timers keyed by task
///
/// Decrement-then-gate: a `tick` that finds a positive counter decrements it
/// and reports not-ready; a `tick` that finds the counter already at zero
/// reports ready. Arming with N therefore suppresses exactly N ticks and the
/// first decision lands on tick N+1. Unarmed tasks are always ready.
#[derive(Debug, Default)]
pub struct CooldownScheduler {
    timers: AHashMap<TaskId, u32>,
}

impl CooldownScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or overwrite — no stacking) the countdown for `task`
    pub fn arm(&mut self, task: TaskId, ticks: u32) {
        self.timers.insert(task, ticks);
    }

    /// Advance the timer one tick; returns whether `task` may decide now
    pub fn tick(&mut self, task: TaskId) -> bool {
        match self.timers.get_mut(&task) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                false
            }
            _ => true,
        }
    }

    /// Ticks left before `task` becomes eligible again
    pub fn remaining(&self, task: TaskId) -> u32 {
        self.timers.get(&task).copied().unwrap_or(0)
    }

    /// Drop the countdown entirely (external stop)
    pub fn reset(&mut self, task: TaskId) {
        self.timers.remove(&task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASK: TaskId = TaskId(1);

    #[test]
    fn test_unarmed_task_is_always_ready() {
        let mut scheduler = CooldownScheduler::new();
        assert!(scheduler.tick(TASK));
        assert!(scheduler.tick(TASK));
    }

    #[test]
    fn test_arm_n_suppresses_exactly_n_ticks() {
        let mut scheduler = CooldownScheduler::new();
        scheduler.arm(TASK, 3);
        assert!(!scheduler.tick(TASK));
        assert!(!scheduler.tick(TASK));
        assert!(!scheduler.tick(TASK));
        // Tick N+1 allows the decision, and every tick after until re-armed
        assert!(scheduler.tick(TASK));
        assert!(scheduler.tick(TASK));
    }

    #[test]
    fn test_rearm_overwrites_without_stacking() {
        let mut scheduler = CooldownScheduler::new();
        scheduler.arm(TASK, 10);
        assert!(!scheduler.tick(TASK));
        scheduler.arm(TASK, 1);
        assert!(!scheduler.tick(TASK));
        assert!(scheduler.tick(TASK));
    }

    #[test]
    fn test_tasks_are_independent() {
        let mut scheduler = CooldownScheduler::new();
        scheduler.arm(TaskId(1), 2);
        assert!(scheduler.tick(TaskId(2)));
        assert!(!scheduler.tick(TaskId(1)));
    }

    #[test]
    fn test_reset_clears_countdown() {
        let mut scheduler = CooldownScheduler::new();
        scheduler.arm(TASK, 5);
        scheduler.reset(TASK);
        assert!(scheduler.tick(TASK));
    }
}

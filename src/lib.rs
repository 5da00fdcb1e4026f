//! Tickbot - tick-synchronized reactive control core for game automation
//!
//! The host owns the simulation clock, perception snapshots and the
//! actuator; this crate owns the decision loop: at most one external action
//! per task per tick, with multi-step procedures tracked as explicit states
//! with timeouts and retries.

pub mod action;
pub mod core;
pub mod events;
pub mod loot;
pub mod scheduler;
pub mod task;
pub mod tasks;
pub mod world;

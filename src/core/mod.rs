pub mod config;
pub mod error;
pub mod types;

pub use config::PacingConfig;
pub use types::{EntityId, PromptId, TaskId, Tick, WorldPoint};

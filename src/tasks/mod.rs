//! Concrete automations built on the task core

pub mod boss;
pub mod gather;
pub mod protect;
pub mod recovery;
pub mod sentry;

pub use boss::{BossConfig, BossState, BossTask};
pub use gather::{GatherConfig, GatherState, GatherTask};
pub use protect::{ProtectConfig, ProtectTask, ProtectionRule};
pub use recovery::RecoveryConfig;
pub use sentry::{SentryConfig, SentryState, SentryTask};

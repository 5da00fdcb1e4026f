use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid config value: {0}")]
    InvalidConfig(String),

    #[error("Unknown task: {0:?}")]
    UnknownTask(crate::core::types::TaskId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;

use std::path::PathBuf;

use thiserror::Error;

/// Every failure the game core can surface.
///
/// None of these are recoverable at runtime: they are configuration or
/// programming mistakes and should abort scene setup (or the frame loop)
/// as soon as they are seen.
#[derive(Debug, Error)]
pub enum GameError {
    /// A required scene collaborator is missing or the machine was never
    /// given its states.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A transition named a state that was never registered.
    #[error("unknown state `{0}`")]
    UnknownState(String),

    #[error("health value {value} is outside 1..={max}")]
    InvalidHealthValue { value: i32, max: u32 },

    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file")]
    Config(#[from] toml::de::Error),

    #[error("invalid input script: {0}")]
    Script(String),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;

use crate::model::ModelError;

/// Errors from loading, saving or applying a system configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// The file parsed, but describes a system that can't exist.
    #[error("invalid system: {0}")]
    Model(#[from] ModelError),
}

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or building a tree document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tree document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("root tree `{0}` is not defined")]
    UnknownRoot(String),

    #[error("subtree refers to undefined tree `{0}`")]
    UnknownTree(String),

    #[error("subtree cycle: {}", .0.join(" -> "))]
    SubtreeCycle(Vec<String>),

    #[error("no condition registered for binding `{0}`")]
    UnknownCondition(String),

    #[error("no action registered for binding `{0}`")]
    UnknownAction(String),

    #[error("timer `{name}` has invalid duration {duration}")]
    InvalidDuration { name: String, duration: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

use spend_config::ConfigError;
use spend_core::CoreError;
use thiserror::Error;

/// Error type for opening and driving a tracking session.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TrackerError {
    /// True when the failure is a rejected form rather than an environment problem.
    pub fn is_validation(&self) -> bool {
        matches!(self, TrackerError::Core(CoreError::Validation { .. }))
    }
}

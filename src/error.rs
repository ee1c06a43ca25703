use std::time::Duration;

use thiserror::Error;

/// Errors raised while validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A phase was given a zero hold, which would spin the phase loop.
    #[error("phase {phase} must be held for a non-zero duration")]
    ZeroPhaseHold { phase: &'static str },
    /// The dispatcher cannot tick on a zero interval.
    #[error("dispatcher tick interval must be non-zero")]
    ZeroTickInterval,
    /// The crossing range is empty.
    #[error("crossing bounds are empty: min {min:?} must be below max {max:?}")]
    EmptyCrossingRange { min: Duration, max: Duration },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

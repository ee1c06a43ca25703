// src/shared_data.rs

use crate::control_system::phase_clock::Phase;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Running totals of vehicles that went through the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingCounts {
    /// Taken off the queue and sent into the intersection.
    pub released: u64,
    pub completed: u64,
    /// Cancelled mid-transit by shutdown.
    pub abandoned: u64,
}

impl CrossingCounts {
    /// Crossings started but not yet finished either way.
    pub fn in_flight(&self) -> u64 {
        self.released
            .saturating_sub(self.completed)
            .saturating_sub(self.abandoned)
    }
}

/// Point-in-time view of the intersection, for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub queue_size: usize,
    pub crossings: CrossingCounts,
    pub timestamp: u64,
}

/// Seconds since the unix epoch; 0 if the system clock is before it.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

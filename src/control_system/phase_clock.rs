use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;

/// The state of the intersection's traffic light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Phase {
    Red = 0,
    Green = 1,
    Yellow = 2,
}

impl Phase {
    /// Phases in the order the light cycles through them, starting from red.
    pub const CYCLE: [Phase; 3] = [Phase::Red, Phase::Green, Phase::Yellow];

    pub fn next(self) -> Phase {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Yellow,
            Phase::Yellow => Phase::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Red => "RED",
            Phase::Green => "GREEN",
            Phase::Yellow => "YELLOW",
        }
    }

    fn from_raw(raw: u8) -> Phase {
        match raw {
            1 => Phase::Green,
            2 => Phase::Yellow,
            _ => Phase::Red,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only handle onto the light. Cloning is cheap and reads never block.
#[derive(Debug, Clone)]
pub struct PhaseReader {
    state: Arc<AtomicU8>,
}

impl PhaseReader {
    pub fn current_phase(&self) -> Phase {
        Phase::from_raw(self.state.load(Ordering::Acquire))
    }

    /// A reader pinned to `phase`, with no clock behind it.
    #[cfg(test)]
    pub(crate) fn fixed(phase: Phase) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(phase as u8)),
        }
    }

    #[cfg(test)]
    pub(crate) fn force(&self, phase: Phase) {
        self.state.store(phase as u8, Ordering::Release);
    }
}

/// Owns the light's phase and advances it on the configured holds.
///
/// Only the clock writes the phase; everything else observes it through a
/// [`PhaseReader`].
#[derive(Debug)]
pub struct PhaseClock {
    state: Arc<AtomicU8>,
    config: EngineConfig,
}

impl PhaseClock {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(Phase::Red as u8)),
            config,
        }
    }

    pub fn reader(&self) -> PhaseReader {
        PhaseReader {
            state: Arc::clone(&self.state),
        }
    }

    pub fn current_phase(&self) -> Phase {
        Phase::from_raw(self.state.load(Ordering::Acquire))
    }

    fn change_phase(&self, phase: Phase) {
        self.state.store(phase as u8, Ordering::Release);
        log::info!("Traffic light changed to {}", phase);
    }

    /// Cycles RED -> GREEN -> YELLOW -> RED until `shutdown` is cancelled.
    ///
    /// Deadlines are measured from `started`, not from the first poll, so the
    /// holds neither drift nor stretch when the task starts late.
    /// Cancellation ends the loop quietly; the last phase stays visible.
    pub async fn run_cycle_loop(self, started: Instant, shutdown: CancellationToken) {
        let mut phase = Phase::Red;
        let mut deadline = started;
        loop {
            self.change_phase(phase);
            deadline += self.config.hold_for(phase);
            tokio::select! {
                _ = shutdown.cancelled() => {
                    log::info!("Traffic light cycle cancelled during {} phase", phase);
                    break;
                }
                _ = sleep_until(deadline) => {}
            }
            phase = phase.next();
        }
    }
}

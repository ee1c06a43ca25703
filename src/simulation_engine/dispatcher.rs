use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::EngineConfig;
use crate::control_system::phase_clock::{Phase, PhaseReader};
use crate::shared_data::CrossingCounts;
use crate::simulation_engine::vehicle_queue::VehicleQueue;
use crate::simulation_engine::vehicles::Vehicle;

/// Counters updated by the dispatcher and its crossing workers.
#[derive(Debug, Default)]
pub struct CrossingStats {
    released: AtomicU64,
    completed: AtomicU64,
    abandoned: AtomicU64,
}

impl CrossingStats {
    pub fn counts(&self) -> CrossingCounts {
        CrossingCounts {
            released: self.released.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
        }
    }
}

/// What a single dispatcher tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The light was not green; the queue was left alone.
    NotGreen(Phase),
    /// Green, but nobody was waiting.
    Empty,
    /// This vehicle was sent into the intersection.
    Released(String),
}

/// Releases at most one queued vehicle per tick while the light is green.
///
/// Each released vehicle crosses in its own task on `crossings`, so a tick
/// never waits for a crossing to finish.
#[derive(Debug)]
pub struct CrossingDispatcher {
    phase: PhaseReader,
    queue: Arc<VehicleQueue>,
    stats: Arc<CrossingStats>,
    crossings: TaskTracker,
    shutdown: CancellationToken,
    tick_interval: Duration,
    crossing_min: Duration,
    crossing_max: Duration,
}

impl CrossingDispatcher {
    pub fn new(
        phase: PhaseReader,
        queue: Arc<VehicleQueue>,
        stats: Arc<CrossingStats>,
        config: &EngineConfig,
        crossings: TaskTracker,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            phase,
            queue,
            stats,
            crossings,
            shutdown,
            tick_interval: config.tick_interval,
            crossing_min: config.crossing_min,
            crossing_max: config.crossing_max,
        }
    }

    /// Runs one dispatch step. Must be called from within a Tokio runtime,
    /// since a release spawns the vehicle's crossing.
    pub fn tick(&self) -> TickOutcome {
        let phase = self.phase.current_phase();
        if phase != Phase::Green {
            return TickOutcome::NotGreen(phase);
        }
        let Some(vehicle) = self.queue.try_dequeue() else {
            return TickOutcome::Empty;
        };

        let transit = rand::rng().random_range(self.crossing_min..self.crossing_max);
        let id = vehicle.id.clone();
        self.stats.released.fetch_add(1, Ordering::Relaxed);
        self.crossings.spawn(cross_intersection(
            vehicle,
            transit,
            self.shutdown.clone(),
            Arc::clone(&self.stats),
        ));
        TickOutcome::Released(id)
    }

    /// Ticks every `tick_interval` until shutdown, on a grid offset by half
    /// an interval from `started`.
    ///
    /// With the default timings every phase edge lands on a whole second from
    /// `started`, so no tick coincides with a transition. Missed ticks are
    /// skipped to stay on the grid.
    pub async fn run_tick_loop(self, started: Instant) {
        let mut ticker = interval_at(started + self.tick_interval / 2, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    log::info!("Crossing dispatcher cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if let TickOutcome::Released(id) = self.tick() {
                        log::debug!(
                            "Released vehicle {}; {} still waiting",
                            id,
                            self.queue.size()
                        );
                    }
                }
            }
        }
    }
}

// A cancelled crossing is abandoned; the vehicle is dropped either way.
async fn cross_intersection(
    vehicle: Vehicle,
    transit: Duration,
    shutdown: CancellationToken,
    stats: Arc<CrossingStats>,
) {
    log::info!(
        "Vehicle {} is crossing the intersection ({:?}).",
        vehicle.id,
        transit
    );
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => {
            stats.abandoned.fetch_add(1, Ordering::Relaxed);
            log::info!("Vehicle {} crossing abandoned on shutdown.", vehicle.id);
        }
        _ = sleep(transit) => {
            stats.completed.fetch_add(1, Ordering::Relaxed);
            log::info!("Vehicle {} has crossed the intersection.", vehicle.id);
        }
    }
}

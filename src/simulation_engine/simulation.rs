// simulation.rs
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::EngineConfig;
use crate::control_system::phase_clock::{Phase, PhaseClock, PhaseReader};
use crate::error::ConfigResult;
use crate::shared_data::{current_timestamp, CrossingCounts, EngineSnapshot};
use crate::simulation_engine::dispatcher::{CrossingDispatcher, CrossingStats};
use crate::simulation_engine::vehicle_queue::VehicleQueue;
use crate::simulation_engine::vehicles::Vehicle;

/// The running intersection: a phase clock, a vehicle queue and a crossing
/// dispatcher, all driven by background tasks on the current Tokio runtime.
///
/// Callers only push vehicles and read snapshots; nothing here waits on the
/// background tasks except [`shutdown`](Self::shutdown).
#[derive(Debug)]
pub struct SimulationEngine {
    phase: PhaseReader,
    queue: Arc<VehicleQueue>,
    stats: Arc<CrossingStats>,
    cancel: CancellationToken,
    tasks: TaskTracker,
}

impl SimulationEngine {
    /// Validates `config` and starts the phase loop and dispatcher tick.
    ///
    /// Must be called from within a Tokio runtime. An invalid config spawns
    /// nothing.
    pub fn start(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::launch(config))
    }

    /// Starts with the fixed default timings.
    pub fn start_default() -> Self {
        Self::launch(EngineConfig::default())
    }

    fn launch(config: EngineConfig) -> Self {
        log::info!("Initializing traffic simulation engine: {:?}", config);
        let clock = PhaseClock::new(config);
        let phase = clock.reader();
        let queue = Arc::new(VehicleQueue::new());
        let stats = Arc::new(CrossingStats::default());
        let cancel = CancellationToken::new();
        let tasks = TaskTracker::new();

        let dispatcher = CrossingDispatcher::new(
            phase.clone(),
            Arc::clone(&queue),
            Arc::clone(&stats),
            &config,
            tasks.clone(),
            cancel.clone(),
        );
        let started = Instant::now();
        tasks.spawn(clock.run_cycle_loop(started, cancel.clone()));
        tasks.spawn(dispatcher.run_tick_loop(started));

        Self {
            phase,
            queue,
            stats,
            cancel,
            tasks,
        }
    }

    /// Queues a vehicle and returns the arrival acknowledgement.
    pub fn add_vehicle(&self, id: impl Into<String>) -> String {
        let vehicle = Vehicle::new(id);
        let ack = format!("Vehicle {} added to the queue.", vehicle.id);
        let id = vehicle.id.clone();
        let size = self.queue.enqueue(vehicle);
        log::info!("Vehicle {} added to queue. Queue size: {}", id, size);
        ack
    }

    pub fn current_phase(&self) -> Phase {
        self.phase.current_phase()
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    pub fn crossings(&self) -> CrossingCounts {
        self.stats.counts()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.current_phase(),
            queue_size: self.queue_size(),
            crossings: self.crossings(),
            timestamp: current_timestamp(),
        }
    }

    /// False once shutdown has been requested.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Cancels the phase loop, the dispatcher and every in-flight crossing,
    /// then waits for them to exit. Safe to call any number of times.
    pub async fn shutdown(&self) {
        if self.is_running() {
            log::info!("Shutting down traffic simulation engine...");
        }
        self.cancel.cancel();
        self.tasks.close();
        self.tasks.wait().await;
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

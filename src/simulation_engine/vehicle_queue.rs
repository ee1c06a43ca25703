use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::simulation_engine::vehicles::Vehicle;

/// Unbounded FIFO of vehicles waiting for a green light.
///
/// Every operation holds the lock for a single `VecDeque` call, so a
/// poisoned lock still guards a consistent queue and is recovered.
#[derive(Debug, Default)]
pub struct VehicleQueue {
    inner: Mutex<VecDeque<Vehicle>>,
}

impl VehicleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Vehicle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends to the tail and returns the queue length right after the push.
    pub fn enqueue(&self, vehicle: Vehicle) -> usize {
        let mut queue = self.lock();
        queue.push_back(vehicle);
        queue.len()
    }

    /// Removes the head, or returns `None` when nothing is waiting. Never waits.
    pub fn try_dequeue(&self) -> Option<Vehicle> {
        self.lock().pop_front()
    }

    /// Advisory length; may be stale as soon as it is returned.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

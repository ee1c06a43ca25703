// simulation_engine/mod.rs
pub mod dispatcher;
pub mod simulation;
pub mod vehicle_queue;
pub mod vehicles;

pub use dispatcher::{CrossingDispatcher, CrossingStats, TickOutcome};
pub use simulation::SimulationEngine;
pub use vehicle_queue::VehicleQueue;
pub use vehicles::Vehicle;

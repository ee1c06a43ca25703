//! A single traffic-light intersection: a light cycling RED -> GREEN -> YELLOW
//! and a queue of vehicles released one per tick while the light is green.

pub mod config;
pub mod control_system;
pub mod error;
pub mod global_variables;
pub mod shared_data;
pub mod simulation_engine;

pub use config::EngineConfig;
pub use control_system::Phase;
pub use error::ConfigError;
pub use shared_data::{CrossingCounts, EngineSnapshot};
pub use simulation_engine::SimulationEngine;

// control_system/mod.rs
pub mod phase_clock;

pub use phase_clock::{Phase, PhaseClock, PhaseReader};

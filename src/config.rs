use std::time::Duration;

use crate::control_system::phase_clock::Phase;
use crate::error::{ConfigError, ConfigResult};
use crate::global_variables::{
    CROSSING_MAX_MS, CROSSING_MIN_MS, DISPATCH_TICK_MS, GREEN_HOLD_MS, RED_HOLD_MS,
    YELLOW_HOLD_MS,
};

/// Timing injected into a [`SimulationEngine`](crate::simulation_engine::simulation::SimulationEngine).
///
/// `Default` gives the fixed intersection timings: 5s red, 5s green, 2s yellow,
/// a 1s dispatcher tick and crossings between 2s and 4s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub red_hold: Duration,
    pub green_hold: Duration,
    pub yellow_hold: Duration,
    pub tick_interval: Duration,
    pub crossing_min: Duration,
    /// Exclusive upper bound.
    pub crossing_max: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            red_hold: Duration::from_millis(RED_HOLD_MS),
            green_hold: Duration::from_millis(GREEN_HOLD_MS),
            yellow_hold: Duration::from_millis(YELLOW_HOLD_MS),
            tick_interval: Duration::from_millis(DISPATCH_TICK_MS),
            crossing_min: Duration::from_millis(CROSSING_MIN_MS),
            crossing_max: Duration::from_millis(CROSSING_MAX_MS),
        }
    }
}

impl EngineConfig {
    /// How long the light stays on the given phase.
    pub fn hold_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Red => self.red_hold,
            Phase::Green => self.green_hold,
            Phase::Yellow => self.yellow_hold,
        }
    }

    /// Full length of one RED -> GREEN -> YELLOW cycle.
    pub fn cycle_length(&self) -> Duration {
        self.red_hold + self.green_hold + self.yellow_hold
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for phase in Phase::CYCLE {
            if self.hold_for(phase).is_zero() {
                return Err(ConfigError::ZeroPhaseHold {
                    phase: phase.as_str(),
                });
            }
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.crossing_min >= self.crossing_max {
            return Err(ConfigError::EmptyCrossingRange {
                min: self.crossing_min,
                max: self.crossing_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_fixed_timings() {
        let config = EngineConfig::default();
        assert_eq!(config.hold_for(Phase::Red), Duration::from_secs(5));
        assert_eq!(config.hold_for(Phase::Green), Duration::from_secs(5));
        assert_eq!(config.hold_for(Phase::Yellow), Duration::from_secs(2));
        assert_eq!(config.cycle_length(), Duration::from_secs(12));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_hold_is_rejected() {
        let config = EngineConfig {
            yellow_hold: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroPhaseHold { phase: "YELLOW" })
        );
    }

    #[test]
    fn zero_tick_is_rejected() {
        let config = EngineConfig {
            tick_interval: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn empty_crossing_range_is_rejected() {
        let config = EngineConfig {
            crossing_min: Duration::from_secs(3),
            crossing_max: Duration::from_secs(3),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyCrossingRange { .. })
        ));
    }
}

use crate::error::ConfigurationError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration shared by every scenario controller
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The fixed time step advanced by every tick, in simulated seconds
    pub time_step: f64,

    /// Width of the canvas the scenarios lay themselves out on, in pixels
    pub canvas_width: f64,

    /// Height of the canvas the scenarios lay themselves out on, in pixels
    pub canvas_height: f64,

    /// Capacity of the controller's sample history (energy, power, rotation)
    pub history_capacity: usize,

    /// Capacity of the controller's trail buffer
    pub trail_capacity: usize,

    /// Seed for cosmetic randomness (spawned body velocities and masses)
    pub seed: u64,
}

impl SimulationConfig {
    /// Checks the configuration for values no scenario can run with
    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigurationError::InvalidConfig(format!(
                "time step must be positive, got {}",
                self.time_step
            ))
            .into());
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigurationError::InvalidConfig(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas_width, self.canvas_height
            ))
            .into());
        }
        if self.history_capacity == 0 || self.trail_capacity == 0 {
            return Err(ConfigurationError::InvalidCapacity.into());
        }
        Ok(())
    }

    /// Returns a copy with both buffer capacities replaced
    pub fn with_capacities(mut self, history: usize, trail: usize) -> Self {
        self.history_capacity = history;
        self.trail_capacity = trail;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            canvas_width: 1000.0,
            canvas_height: 600.0,
            history_capacity: 300,
            trail_capacity: 150,
            seed: 0x5eed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_time_step_is_rejected() {
        let config = SimulationConfig { time_step: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = SimulationConfig::default().with_capacities(0, 10);
        assert!(config.validate().is_err());
    }
}

use tracing::info;

use crate::core::input::{Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::SimulationState;
use crate::math::safe_div;
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("voltage", 0.0, 24.0, ResetPolicy::Live),
    ParamSpec::positive("resistance1", 1000.0, ResetPolicy::Live),
    ParamSpec::positive("resistance2", 1000.0, ResetPolicy::Live),
];

const ELECTRONS: usize = 20;

/// Loop progress per tick for one ampere
const DRIFT_PER_AMPERE: f64 = 0.02;

/// How the two resistors are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CircuitTopology {
    #[default]
    Series,
    Parallel,
}

/// Battery and two resistors, with electrons drifting around the loop at a
/// speed proportional to the current
#[derive(Debug, Clone)]
pub struct CircuitScenario {
    voltage: f64,
    resistance1: f64,
    resistance2: f64,
    topology: CircuitTopology,

    /// Position of each electron along the loop, in `[0, 1)`
    electrons: Vec<f64>,
}

impl CircuitScenario {
    pub fn new() -> Self {
        Self {
            voltage: 9.0,
            resistance1: 100.0,
            resistance2: 200.0,
            topology: CircuitTopology::Series,
            electrons: Self::spread_electrons(),
        }
    }

    fn spread_electrons() -> Vec<f64> {
        (0..ELECTRONS).map(|i| i as f64 / ELECTRONS as f64).collect()
    }

    pub fn topology(&self) -> CircuitTopology {
        self.topology
    }

    pub fn equivalent_resistance(&self) -> f64 {
        let (r1, r2) = (self.resistance1, self.resistance2);
        match self.topology {
            CircuitTopology::Series => r1 + r2,
            CircuitTopology::Parallel => safe_div(r1 * r2, r1 + r2),
        }
    }

    /// Total current drawn from the battery, `I = V / R_eq`
    pub fn current(&self) -> f64 {
        safe_div(self.voltage, self.equivalent_resistance())
    }

    pub fn electrons(&self) -> &[f64] {
        &self.electrons
    }
}

impl Default for CircuitScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for CircuitScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::ElectricCircuits
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "voltage" => Some(self.voltage),
            "resistance1" => Some(self.resistance1),
            "resistance2" => Some(self.resistance2),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "voltage" => self.voltage = value,
            "resistance1" => self.resistance1 = value,
            "resistance2" => self.resistance2 = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, _ctx: &mut StepContext<'_>) {
        let drift = self.current() * DRIFT_PER_AMPERE;
        for electron in &mut self.electrons {
            *electron = (*electron + drift).rem_euclid(1.0);
        }
    }

    fn reset(&mut self) {
        self.electrons = Self::spread_electrons();
    }

    fn state(&self) -> SimulationState {
        let current = self.current();
        let (r1, r2) = (self.resistance1, self.resistance2);
        let (i1, i2, v1, v2) = match self.topology {
            CircuitTopology::Series => (current, current, current * r1, current * r2),
            CircuitTopology::Parallel => {
                (safe_div(self.voltage, r1), safe_div(self.voltage, r2), self.voltage, self.voltage)
            }
        };
        SimulationState::new()
            .with("current", current)
            .with("equivalent_resistance", self.equivalent_resistance())
            .with("power", self.voltage * current)
            .with("current1", i1)
            .with("current2", i2)
            .with("voltage1", v1)
            .with("voltage2", v2)
            .with("parallel", if self.topology == CircuitTopology::Parallel { 1.0 } else { 0.0 })
            .with_particles(self.electrons.clone())
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('s') {
            self.topology = match self.topology {
                CircuitTopology::Series => CircuitTopology::Parallel,
                CircuitTopology::Parallel => CircuitTopology::Series,
            };
            self.electrons = Self::spread_electrons();
            info!(topology = ?self.topology, "circuit rewired");
            KeyOutcome::Handled
        } else {
            KeyOutcome::Unhandled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;
    use approx::assert_relative_eq;

    #[test]
    fn series_and_parallel_currents() {
        let mut circuit = CircuitScenario::new();
        assert_relative_eq!(circuit.current(), 0.03);
        circuit.handle_key(Key::Char('s'));
        assert_eq!(circuit.topology(), CircuitTopology::Parallel);
        assert_relative_eq!(circuit.current(), 9.0 / (20000.0 / 300.0), epsilon = 1e-12);
    }

    #[test]
    fn electrons_wrap_around_the_loop() {
        let mut circuit = CircuitScenario::new();
        let mut events = EventQueue::new();
        for _ in 0..5000 {
            let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
            circuit.integrate(&mut ctx);
        }
        assert!(circuit.electrons().iter().all(|&p| (0.0..1.0).contains(&p)));
    }

    #[test]
    fn tiny_resistance_wraps_in_one_step() {
        let mut circuit = CircuitScenario::new();
        circuit.apply_parameter("resistance1", 1e-10).unwrap();
        circuit.apply_parameter("resistance2", 1e-10).unwrap();
        assert!(circuit.current() > 1e8);

        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        circuit.integrate(&mut ctx);
        assert!(circuit.electrons().iter().all(|&p| p.is_finite() && (0.0..1.0).contains(&p)));
    }
}

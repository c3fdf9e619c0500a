use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{HistorySample, SimulationState, TrailPoint};
use crate::forces::Pendulum;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step};
use crate::math::{clamp, Vector2};
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("length", 4.0, ResetPolicy::Reset),
    ParamSpec::positive("mass", 10.0, ResetPolicy::Reset),
    ParamSpec::new("damping", 0.0, 2.0, ResetPolicy::Live),
];

const GRAVITY: f64 = 9.8;
const PIXELS_PER_METER: f64 = 100.0;
const PIVOT: Vector2 = Vector2::new(500.0, 150.0);
const INITIAL_ANGLE: f64 = FRAC_PI_4;

/// Pendulum with linear damping, logging its energy split every step
#[derive(Debug, Clone)]
pub struct EnergyConservationScenario {
    length: f64,
    mass: f64,
    damping: f64,
    phase: PhaseState,
}

impl EnergyConservationScenario {
    pub fn new() -> Self {
        Self { length: 2.0, mass: 1.0, damping: 0.0, phase: PhaseState::at_rest(INITIAL_ANGLE) }
    }

    fn law(&self) -> Pendulum {
        Pendulum::new(GRAVITY, self.length).with_linear_damping(self.damping)
    }

    /// Potential and kinetic energy in joules
    pub fn energy(&self) -> (f64, f64) {
        self.law().energy(self.mass, self.phase.position, self.phase.velocity)
    }

    fn bob_position(&self) -> Vector2 {
        let arm = self.length * PIXELS_PER_METER;
        PIVOT + Vector2::new(self.phase.position.sin(), self.phase.position.cos()) * arm
    }
}

impl Default for EnergyConservationScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for EnergyConservationScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::EnergyConservation
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "length" => Some(self.length),
            "mass" => Some(self.mass),
            "damping" => Some(self.damping),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "length" => self.length = value,
            "mass" => self.mass = value,
            "damping" => self.damping = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let law = self.law();
        SemiImplicitEuler.integrate(&mut self.phase, &law, &Step::new(ctx.dt));
    }

    fn sample(&self, time: f64) -> Option<HistorySample> {
        let (pe, ke) = self.energy();
        Some(HistorySample::Energy { t: time, pe, ke, total: pe + ke })
    }

    fn trail_point(&self) -> Option<TrailPoint> {
        let bob = self.bob_position();
        Some(TrailPoint::new(bob.x, bob.y))
    }

    fn reset(&mut self) {
        self.phase = PhaseState::at_rest(INITIAL_ANGLE);
    }

    fn state(&self) -> SimulationState {
        let (pe, ke) = self.energy();
        let bob = self.bob_position();
        SimulationState::new()
            .with("angle", self.phase.position)
            .with("angular_velocity", self.phase.velocity)
            .with("bob_x", bob.x)
            .with("bob_y", bob.y)
            .with("potential_energy", pe)
            .with("kinetic_energy", ke)
            .with("total_energy", pe + ke)
    }

    /// Clicking in the swing area releases the bob from the pointer angle,
    /// limited to horizontal
    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        if x > 200.0 && x < 800.0 && y > 100.0 && y < 500.0 {
            let angle = (x - PIVOT.x).atan2(y - PIVOT.y);
            self.phase = PhaseState::at_rest(clamp(angle, -FRAC_PI_2, FRAC_PI_2));
            InputOutcome::ClearHistory { reset_time: false }
        } else {
            InputOutcome::Ignored
        }
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('e') {
            KeyOutcome::Ignored
        } else {
            KeyOutcome::Unhandled
        }
    }
}

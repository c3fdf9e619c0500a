use std::f64::consts::FRAC_PI_4;

use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{SimulationState, TrailPoint};
use crate::forces::Pendulum;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step, VelocityFilter};
use crate::math::Vector2;
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("length", 10.0, ResetPolicy::Reset),
    ParamSpec::positive("gravity", 50.0, ResetPolicy::Reset),
    ParamSpec::new("damping", 0.0, 1.0, ResetPolicy::Reset),
];

/// Pixels per meter on the canvas
const SCALE: f64 = 80.0;
const PIVOT: Vector2 = Vector2::new(500.0, 100.0);
const INITIAL_ANGLE: f64 = FRAC_PI_4;

/// Simple pendulum released from 45 degrees
#[derive(Debug, Clone)]
pub struct PendulumScenario {
    length: f64,
    gravity: f64,

    /// Fraction of angular velocity kept per step
    damping: f64,

    /// Angle from the vertical and angular velocity
    phase: PhaseState,
    angular_acceleration: f64,
}

impl PendulumScenario {
    pub fn new() -> Self {
        Self {
            length: 2.0,
            gravity: 9.8,
            damping: 0.999,
            phase: PhaseState::at_rest(INITIAL_ANGLE),
            angular_acceleration: 0.0,
        }
    }

    fn law(&self) -> Pendulum {
        Pendulum::new(self.gravity, self.length)
    }

    /// Bob centre in canvas pixels
    pub fn bob_position(&self) -> Vector2 {
        let arm = self.length * SCALE;
        Vector2::new(
            PIVOT.x + arm * self.phase.position.sin(),
            PIVOT.y + arm * self.phase.position.cos(),
        )
    }

    /// Small-angle period `2π·sqrt(L/g)`
    pub fn period(&self) -> f64 {
        2.0 * std::f64::consts::PI * (self.length / self.gravity).sqrt()
    }
}

impl Default for PendulumScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for PendulumScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Pendulum
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "length" => Some(self.length),
            "gravity" => Some(self.gravity),
            "damping" => Some(self.damping),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "length" => self.length = value,
            "gravity" => self.gravity = value,
            "damping" => self.damping = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let step = Step::new(ctx.dt).filtered(VelocityFilter::Scale(self.damping));
        let law = self.law();
        self.angular_acceleration = SemiImplicitEuler.integrate(&mut self.phase, &law, &step);
    }

    fn trail_point(&self) -> Option<TrailPoint> {
        let bob = self.bob_position();
        Some(TrailPoint::new(bob.x, bob.y))
    }

    fn reset(&mut self) {
        self.phase = PhaseState::at_rest(INITIAL_ANGLE);
        self.angular_acceleration = 0.0;
    }

    fn state(&self) -> SimulationState {
        let (pe, ke) = self.law().energy(1.0, self.phase.position, self.phase.velocity);
        let bob = self.bob_position();
        SimulationState::new()
            .with("angle", self.phase.position)
            .with("angular_velocity", self.phase.velocity)
            .with("angular_acceleration", self.angular_acceleration)
            .with("bob_x", bob.x)
            .with("bob_y", bob.y)
            .with("potential_energy", pe)
            .with("kinetic_energy", ke)
            .with("period", self.period())
    }

    /// Clicking around the arc sets a new release angle
    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        let offset = Vector2::new(x, y) - PIVOT;
        let distance = offset.length();
        if distance > 50.0 && distance < self.length * SCALE + 50.0 {
            self.phase = PhaseState::at_rest(offset.x.atan2(offset.y));
            self.angular_acceleration = 0.0;
            InputOutcome::ClearHistory { reset_time: true }
        } else {
            InputOutcome::Ignored
        }
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('v') || key.is_letter('e') {
            KeyOutcome::Ignored
        } else {
            KeyOutcome::Unhandled
        }
    }
}

use crate::core::input::{Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{SimulationState, TrailPoint};
use crate::forces::Uniform;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step};
use crate::math::Vector2;
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("radius", 2.5, ResetPolicy::Reset),
    ParamSpec::new("angular_velocity", -10.0, 10.0, ResetPolicy::Reset),
    ParamSpec::positive("mass", 10.0, ResetPolicy::Reset),
];

const PIXELS_PER_METER: f64 = 100.0;
const CENTER: Vector2 = Vector2::new(500.0, 300.0);

/// Mass on a circle at constant angular velocity
#[derive(Debug, Clone)]
pub struct CircularMotionScenario {
    radius: f64,
    angular_velocity: f64,
    mass: f64,
    angle: f64,
}

impl CircularMotionScenario {
    pub fn new() -> Self {
        Self { radius: 1.5, angular_velocity: 2.0, mass: 2.0, angle: 0.0 }
    }

    pub fn position(&self) -> Vector2 {
        CENTER + Vector2::new(self.angle.cos(), self.angle.sin()) * (self.radius * PIXELS_PER_METER)
    }

    /// Tangential speed `v = ω·r`
    pub fn speed(&self) -> f64 {
        self.angular_velocity.abs() * self.radius
    }

    /// Centripetal acceleration `ω²·r`
    pub fn centripetal_acceleration(&self) -> f64 {
        self.angular_velocity * self.angular_velocity * self.radius
    }
}

impl Default for CircularMotionScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for CircularMotionScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::CircularMotion
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "radius" => Some(self.radius),
            "angular_velocity" => Some(self.angular_velocity),
            "mass" => Some(self.mass),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "radius" => self.radius = value,
            "angular_velocity" => self.angular_velocity = value,
            "mass" => self.mass = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let mut phase = PhaseState::new(self.angle, self.angular_velocity);
        SemiImplicitEuler.integrate(&mut phase, &Uniform, &Step::new(ctx.dt));
        self.angle = phase.position;
    }

    fn trail_point(&self) -> Option<TrailPoint> {
        let p = self.position();
        Some(TrailPoint::new(p.x, p.y))
    }

    fn reset(&mut self) {
        self.angle = 0.0;
    }

    fn state(&self) -> SimulationState {
        let p = self.position();
        let omega = self.angular_velocity;
        let mut state = SimulationState::new()
            .with("angle", self.angle)
            .with("x", p.x)
            .with("y", p.y)
            .with("speed", self.speed())
            .with("centripetal_acceleration", self.centripetal_acceleration())
            .with("centripetal_force", self.mass * self.centripetal_acceleration());

        // a stationary mass has no period
        if omega != 0.0 {
            state.set("period", std::f64::consts::TAU / omega.abs());
        }
        state
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('v') {
            KeyOutcome::Ignored
        } else {
            KeyOutcome::Unhandled
        }
    }
}

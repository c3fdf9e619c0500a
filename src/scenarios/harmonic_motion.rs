use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{SimulationState, TrailPoint};
use crate::forces::SpringMass;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step};
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("spring_constant", 100.0, ResetPolicy::Reset),
    ParamSpec::positive("mass", 20.0, ResetPolicy::Reset),
    ParamSpec::new("damping", 0.0, 5.0, ResetPolicy::Reset),
];

const PIXELS_PER_METER: f64 = 2.0;
const MASS_X: f64 = 500.0;
const EQUILIBRIUM_Y: f64 = 300.0;
const INITIAL_DISPLACEMENT: f64 = 100.0;

/// Pointer grab radius around the mass
const GRAB_RADIUS: f64 = 60.0;

/// Vertical spring-mass oscillator; displacement is kept in pixels below the
/// equilibrium line
#[derive(Debug, Clone)]
pub struct HarmonicMotionScenario {
    spring_constant: f64,
    mass: f64,
    damping: f64,
    phase: PhaseState,
    acceleration: f64,
}

impl HarmonicMotionScenario {
    pub fn new() -> Self {
        Self {
            spring_constant: 20.0,
            mass: 2.0,
            damping: 0.02,
            phase: PhaseState::at_rest(INITIAL_DISPLACEMENT),
            acceleration: 0.0,
        }
    }

    fn law(&self) -> SpringMass {
        SpringMass::new(self.spring_constant, self.damping, self.mass, PIXELS_PER_METER)
    }

    fn mass_y(&self) -> f64 {
        EQUILIBRIUM_Y + self.phase.position
    }
}

impl Default for HarmonicMotionScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for HarmonicMotionScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::HarmonicMotion
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "spring_constant" => Some(self.spring_constant),
            "mass" => Some(self.mass),
            "damping" => Some(self.damping),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "spring_constant" => self.spring_constant = value,
            "mass" => self.mass = value,
            "damping" => self.damping = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let law = self.law();
        self.acceleration = SemiImplicitEuler.integrate(&mut self.phase, &law, &Step::new(ctx.dt));
    }

    fn trail_point(&self) -> Option<TrailPoint> {
        Some(TrailPoint::new(MASS_X, self.mass_y()))
    }

    fn reset(&mut self) {
        self.phase = PhaseState::at_rest(INITIAL_DISPLACEMENT);
        self.acceleration = 0.0;
    }

    fn state(&self) -> SimulationState {
        let law = self.law();
        let speed = self.phase.velocity / PIXELS_PER_METER;
        let omega = law.angular_frequency();
        SimulationState::new()
            .with("position", self.phase.position)
            .with("velocity", self.phase.velocity)
            .with("acceleration", self.acceleration)
            .with("mass_y", self.mass_y())
            .with("spring_force", law.force(self.phase.position, self.phase.velocity))
            .with("potential_energy", law.potential_energy(self.phase.position))
            .with("kinetic_energy", 0.5 * self.mass * speed * speed)
            .with("angular_frequency", omega)
            .with("period", 2.0 * std::f64::consts::PI / omega)
    }

    /// Grabbing the mass moves it to the pointer height and holds it still
    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        let dx = x - MASS_X;
        let dy = y - self.mass_y();
        if dx * dx + dy * dy < GRAB_RADIUS * GRAB_RADIUS {
            self.phase = PhaseState::at_rest(y - EQUILIBRIUM_Y);
            self.acceleration = 0.0;
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

use crate::collision::{bounce_axis, Bounds};
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::SimulationState;
use crate::forces::ConstantForce;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("force", -50.0, 50.0, ResetPolicy::Live),
    ParamSpec::positive("mass", 20.0, ResetPolicy::Live),
];

const PIXELS_PER_METER: f64 = 50.0;
const TRACK: Bounds = Bounds::new(100.0, 900.0);
const WALL_RESTITUTION: f64 = 0.8;

/// Box pushed along a track by a constant force, bouncing off both ends
#[derive(Debug, Clone)]
pub struct NewtonsSecondLawScenario {
    force: f64,
    mass: f64,

    /// Position and velocity in pixels
    phase: PhaseState,
    acceleration: f64,
}

impl NewtonsSecondLawScenario {
    pub fn new() -> Self {
        Self {
            force: 20.0,
            mass: 5.0,
            phase: PhaseState::at_rest(TRACK.min),
            acceleration: 0.0,
        }
    }
}

impl Default for NewtonsSecondLawScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for NewtonsSecondLawScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::NewtonsSecondLaw
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "force" => Some(self.force),
            "mass" => Some(self.mass),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "force" => self.force = value,
            "mass" => self.mass = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let law = ConstantForce::new(self.force, self.mass).with_scale(PIXELS_PER_METER);
        let applied = SemiImplicitEuler.integrate(&mut self.phase, &law, &Step::new(ctx.dt));
        self.acceleration = applied / PIXELS_PER_METER;
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        let PhaseState { position, velocity } = &mut self.phase;
        if bounce_axis(position, velocity, TRACK, WALL_RESTITUTION) {
            ctx.events.push(SimulationEvent::new(SimulationEventType::Bounce, ctx.time));
        }
        Resolution::Continue
    }

    fn reset(&mut self) {
        self.phase = PhaseState::at_rest(TRACK.min);
        self.acceleration = 0.0;
    }

    fn state(&self) -> SimulationState {
        SimulationState::new()
            .with("position", self.phase.position)
            .with("velocity", self.phase.velocity)
            .with("acceleration", self.acceleration)
            .with("momentum", self.mass * self.phase.velocity / PIXELS_PER_METER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;
    use approx::assert_relative_eq;

    #[test]
    fn acceleration_is_force_over_mass() {
        let mut scenario = NewtonsSecondLawScenario::new();
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        scenario.integrate(&mut ctx);
        assert_relative_eq!(scenario.acceleration, 4.0);
        assert_relative_eq!(scenario.phase.velocity, 4.0 * 50.0 / 60.0);
    }

    #[test]
    fn right_wall_bounces_with_loss() {
        let mut scenario = NewtonsSecondLawScenario::new();
        scenario.phase = PhaseState::new(905.0, 300.0);
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        scenario.resolve(&mut ctx);
        assert_eq!(scenario.phase.position, 900.0);
        assert_relative_eq!(scenario.phase.velocity, -240.0);
        assert_eq!(events.len(), 1);
    }
}

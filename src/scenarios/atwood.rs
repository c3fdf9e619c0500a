use crate::collision::{stop_at_bounds, Bounds};
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::input::{Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::SimulationState;
use crate::forces::{Atwood, ForceLaw};
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step, VelocityFilter};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("mass1", 20.0, ResetPolicy::Reset),
    ParamSpec::positive("mass2", 20.0, ResetPolicy::Reset),
    ParamSpec::positive("gravity", 20.0, ResetPolicy::Reset),
];

/// Pixels moved per m/s per second
const PIXELS_PER_METER: f64 = 60.0;
const DAMPING: f64 = 0.999;
const ROPE: Bounds = Bounds::new(110.0, 550.0);
const START_1: f64 = 200.0;
const START_2: f64 = 350.0;

/// Two masses over a pulley; the heavier side descends
#[derive(Debug, Clone)]
pub struct AtwoodScenario {
    mass1: f64,
    mass2: f64,
    gravity: f64,

    /// Canvas heights of both masses, growing downward
    y1: f64,
    y2: f64,

    /// Speed at which the second mass descends, in m/s
    velocity: f64,
}

impl AtwoodScenario {
    pub fn new() -> Self {
        Self {
            mass1: 5.0,
            mass2: 3.0,
            gravity: 9.8,
            y1: START_1,
            y2: START_2,
            velocity: 0.0,
        }
    }

    fn law(&self) -> Atwood {
        Atwood { mass1: self.mass1, mass2: self.mass2, gravity: self.gravity }
    }
}

impl Default for AtwoodScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for AtwoodScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::AtwoodMachine
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "mass1" => Some(self.mass1),
            "mass2" => Some(self.mass2),
            "gravity" => Some(self.gravity),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "mass1" => self.mass1 = value,
            "mass2" => self.mass2 = value,
            "gravity" => self.gravity = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let step = Step::new(ctx.dt)
            .scaled(PIXELS_PER_METER)
            .filtered(VelocityFilter::Scale(DAMPING));
        let mut rope = PhaseState::new(0.0, self.velocity);
        SemiImplicitEuler.integrate(&mut rope, &self.law(), &step);

        self.velocity = rope.velocity;

        // positive rope travel lowers mass 2; canvas y grows downward, so the
        // heavier mass is the one whose y increases
        self.y1 -= rope.position;
        self.y2 += rope.position;
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        let moving = self.velocity != 0.0;
        if stop_at_bounds(&mut [&mut self.y1, &mut self.y2], &mut self.velocity, ROPE) && moving {
            ctx.events.push(SimulationEvent::new(SimulationEventType::CameToRest, ctx.time));
        }
        Resolution::Continue
    }

    fn reset(&mut self) {
        self.y1 = START_1;
        self.y2 = START_2;
        self.velocity = 0.0;
    }

    fn state(&self) -> SimulationState {
        let law = self.law();
        SimulationState::new()
            .with("y1", self.y1)
            .with("y2", self.y2)
            .with("velocity", self.velocity)
            .with("acceleration", law.acceleration(0.0, 0.0))
            .with("tension", law.tension())
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('v') {
            KeyOutcome::Ignored
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

    fn tick(scenario: &mut AtwoodScenario) {
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        scenario.integrate(&mut ctx);
        scenario.resolve(&mut ctx);
    }

    #[test]
    fn heavier_mass_descends() {
        let mut machine = AtwoodScenario::new();
        for _ in 0..30 {
            tick(&mut machine);
        }
        assert!(machine.y1 > START_1);
        assert!(machine.y2 < START_2);
        assert_relative_eq!(machine.y1 - START_1, START_2 - machine.y2, epsilon = 1e-9);
    }

    #[test]
    fn heavier_second_mass_descends() {
        let mut machine = AtwoodScenario::new();
        machine.mass1 = 3.0;
        machine.mass2 = 5.0;
        for _ in 0..30 {
            tick(&mut machine);
        }
        assert!(machine.velocity > 0.0);
        assert!(machine.y2 > START_2);
        assert!(machine.y1 < START_1);
    }

    #[test]
    fn masses_stop_at_the_rope_limits() {
        let mut machine = AtwoodScenario::new();
        for _ in 0..600 {
            tick(&mut machine);
        }
        assert_eq!(machine.velocity, 0.0);
        assert_eq!(machine.y2, ROPE.min);
        assert!(machine.y1 <= ROPE.max);
    }
}

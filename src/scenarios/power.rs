use tracing::debug;

use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{HistorySample, SimulationState};
use crate::forces::ConstantForce;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step, VelocityFilter};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("force", 0.0, 100.0, ResetPolicy::Live),
    ParamSpec::positive("mass", 20.0, ResetPolicy::Reset),
    ParamSpec::positive("resistance", 50.0, ResetPolicy::Live),
];

const PIXELS_PER_METER: f64 = 20.0;
const START: f64 = 100.0;

/// Past this point the cart starts over from `START`
const FINISH: f64 = 900.0;

/// Cart driven against a constant resistance, tracking delivered power
#[derive(Debug, Clone)]
pub struct PowerScenario {
    force: f64,
    mass: f64,
    resistance: f64,
    phase: PhaseState,
    acceleration: f64,

    /// Work done by the applied force since the last start, in joules
    work: f64,
}

impl PowerScenario {
    pub fn new() -> Self {
        Self {
            force: 30.0,
            mass: 5.0,
            resistance: 10.0,
            phase: PhaseState::at_rest(START),
            acceleration: 0.0,
            work: 0.0,
        }
    }

    /// Instantaneous power of the applied force, `P = F·v`
    pub fn power(&self) -> f64 {
        self.force * self.phase.velocity
    }

    pub fn work(&self) -> f64 {
        self.work
    }
}

impl Default for PowerScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for PowerScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Power
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "force" => Some(self.force),
            "mass" => Some(self.mass),
            "resistance" => Some(self.resistance),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "force" => self.force = value,
            "mass" => self.mass = value,
            "resistance" => self.resistance = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let law = ConstantForce::new(self.force - self.resistance, self.mass);
        let step = Step::new(ctx.dt)
            .scaled(PIXELS_PER_METER)
            .filtered(VelocityFilter::ClampNonNegative);
        self.acceleration = SemiImplicitEuler.integrate(&mut self.phase, &law, &step);
        self.work += self.power() * ctx.dt;
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        if self.phase.position <= FINISH {
            return Resolution::Continue;
        }
        debug!(work = self.work, "cart reached the end of the track");
        self.phase = PhaseState::at_rest(START);
        self.work = 0.0;
        ctx.events.push(SimulationEvent::new(SimulationEventType::Restarted, ctx.time));
        Resolution::Restart
    }

    fn sample(&self, time: f64) -> Option<HistorySample> {
        Some(HistorySample::Power { t: time, power: self.power(), velocity: self.phase.velocity })
    }

    fn reset(&mut self) {
        self.phase = PhaseState::at_rest(START);
        self.acceleration = 0.0;
        self.work = 0.0;
    }

    fn state(&self) -> SimulationState {
        let v = self.phase.velocity;
        SimulationState::new()
            .with("position", self.phase.position)
            .with("velocity", v)
            .with("acceleration", self.acceleration)
            .with("power", self.power())
            .with("work", self.work)
            .with("kinetic_energy", 0.5 * self.mass * v * v)
    }
}

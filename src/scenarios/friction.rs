use crate::collision::{bounce_axis, Bounds, FrictionModel, FrictionPhase};
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{ScenarioFlags, SimulationState};
use crate::forces::KineticFriction;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step, VelocityFilter};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("applied_force", 0.0, 50.0, ResetPolicy::Live),
    ParamSpec::new("friction_coefficient", 0.0, 1.0, ResetPolicy::Reset),
    ParamSpec::positive("mass", 20.0, ResetPolicy::Reset),
];

const GRAVITY: f64 = 9.8;
const PIXELS_PER_METER: f64 = 50.0;
const START: f64 = 200.0;
const TRACK: Bounds = Bounds::new(100.0, 900.0);
const WALL_RESTITUTION: f64 = 0.5;

/// Fraction of velocity kept per step to air resistance
const AIR_DRAG: f64 = 0.99;

/// Block on a rough floor that stays put until the push beats static friction
#[derive(Debug, Clone)]
pub struct FrictionScenario {
    applied_force: f64,
    friction_coefficient: f64,
    mass: f64,
    phase: PhaseState,
    friction: FrictionPhase,
}

impl FrictionScenario {
    pub fn new() -> Self {
        Self {
            applied_force: 10.0,
            friction_coefficient: 0.3,
            mass: 5.0,
            phase: PhaseState::at_rest(START),
            friction: FrictionPhase::Static,
        }
    }

    fn normal_force(&self) -> f64 {
        self.mass * GRAVITY
    }

    fn model(&self) -> FrictionModel {
        FrictionModel::new(self.friction_coefficient)
    }

    pub fn friction_phase(&self) -> FrictionPhase {
        self.friction
    }

    /// Friction force currently acting, signed against the motion
    fn friction_force(&self) -> f64 {
        let normal = self.normal_force();
        match self.friction {
            FrictionPhase::Static => -self.applied_force.min(self.model().max_static(normal)),
            FrictionPhase::Moving => {
                let direction = if self.phase.velocity != 0.0 { self.phase.velocity.signum() } else { 1.0 };
                -self.model().kinetic(normal) * direction
            }
        }
    }
}

impl Default for FrictionScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for FrictionScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Friction
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "applied_force" => Some(self.applied_force),
            "friction_coefficient" => Some(self.friction_coefficient),
            "mass" => Some(self.mass),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "applied_force" => self.applied_force = value,
            "friction_coefficient" => self.friction_coefficient = value,
            "mass" => self.mass = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    /// A static block only checks for breakaway; it starts sliding next step.
    /// A sliding block settles once friction has slowed it below the rest speed.
    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let normal = self.normal_force();
        match self.friction {
            FrictionPhase::Static => {
                if self.model().break_away(&mut self.friction, self.applied_force, normal) {
                    ctx.events.push(SimulationEvent::new(SimulationEventType::StartedMoving, ctx.time));
                }
            }
            FrictionPhase::Moving => {
                let law = KineticFriction {
                    applied_force: self.applied_force,
                    friction_force: self.model().kinetic(normal),
                    mass: self.mass,
                    scale: PIXELS_PER_METER,
                };
                let step = Step::new(ctx.dt).filtered(VelocityFilter::Scale(AIR_DRAG));
                let before = self.phase.velocity;
                SemiImplicitEuler.integrate(&mut self.phase, &law, &step);

                // friction stops the block, it cannot push it back
                if before != 0.0 && before.signum() != self.phase.velocity.signum() {
                    self.phase.velocity = 0.0;
                }

                // only a block that slid this step can settle
                if self.model().settle(&mut self.friction, &mut self.phase.velocity) {
                    ctx.events.push(SimulationEvent::new(SimulationEventType::CameToRest, ctx.time));
                }
            }
        }
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        if self.friction != FrictionPhase::Moving {
            return Resolution::Continue;
        }

        let PhaseState { position, velocity } = &mut self.phase;
        if bounce_axis(position, velocity, TRACK, WALL_RESTITUTION) {
            ctx.events.push(SimulationEvent::new(SimulationEventType::Bounce, ctx.time));
        }
        Resolution::Continue
    }

    fn reset(&mut self) {
        self.phase = PhaseState::at_rest(START);
        self.friction = FrictionPhase::Static;
    }

    fn state(&self) -> SimulationState {
        let normal = self.normal_force();
        let flags = match self.friction {
            FrictionPhase::Moving => ScenarioFlags::MOVING,
            FrictionPhase::Static => ScenarioFlags::empty(),
        };
        SimulationState::new()
            .with("position", self.phase.position)
            .with("velocity", self.phase.velocity)
            .with("normal_force", normal)
            .with("static_friction", self.model().max_static(normal))
            .with("kinetic_friction", self.model().kinetic(normal))
            .with("friction_force", self.friction_force())
            .with_flags(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;

    fn run(scenario: &mut FrictionScenario, ticks: usize) {
        let mut events = EventQueue::new();
        for _ in 0..ticks {
            let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
            scenario.integrate(&mut ctx);
            scenario.resolve(&mut ctx);
        }
    }

    #[test]
    fn weak_push_never_moves_the_block() {
        let mut block = FrictionScenario::new();
        run(&mut block, 600);
        assert_eq!(block.friction_phase(), FrictionPhase::Static);
        assert_eq!(block.phase, PhaseState::at_rest(START));
    }

    #[test]
    fn strong_push_slides_the_block() {
        let mut block = FrictionScenario::new();
        block.applied_force = 30.0;
        run(&mut block, 1);
        assert_eq!(block.friction_phase(), FrictionPhase::Moving);
        assert_eq!(block.phase.position, START);
        run(&mut block, 60);
        assert!(block.phase.position > START);
        assert_eq!(block.friction_phase(), FrictionPhase::Moving);
    }

    #[test]
    fn breakaway_tick_does_not_settle_immediately() {
        let mut block = FrictionScenario::new();
        block.applied_force = 30.0;
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        block.integrate(&mut ctx);
        block.resolve(&mut ctx);
        assert_eq!(block.friction_phase(), FrictionPhase::Moving);
        assert!(events.events_of_type(SimulationEventType::CameToRest).is_empty());
        assert_eq!(events.events_of_type(SimulationEventType::StartedMoving).len(), 1);
    }

    #[test]
    fn dropping_the_force_brings_block_to_rest() {
        let mut block = FrictionScenario::new();
        block.applied_force = 30.0;
        run(&mut block, 30);
        block.applied_force = 0.0;
        run(&mut block, 600);
        assert_eq!(block.friction_phase(), FrictionPhase::Static);
        assert_eq!(block.phase.velocity, 0.0);
    }
}

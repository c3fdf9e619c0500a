use tracing::debug;

use crate::bodies::{Body, BodyColor};
use crate::collision::{resolve_head_on, CollisionModel};
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::input::{Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{ScenarioFlags, SimulationState};
use crate::forces::Uniform;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step};
use crate::math::Vector2;
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("mass1", 10.0, ResetPolicy::Reset),
    ParamSpec::positive("mass2", 10.0, ResetPolicy::Reset),
    ParamSpec::positive("velocity1", 20.0, ResetPolicy::Reset),
];

const PIXELS_PER_METER: f64 = 50.0;
const TRACK_Y: f64 = 300.0;
const START_1: f64 = 200.0;
const START_2: f64 = 600.0;

/// Half of the drawn cart width `sqrt(m)·15 + 20`
const RADIUS_SCALE: f64 = 7.5;
const RADIUS_OFFSET: f64 = 10.0;

/// A moving cart hitting a resting one, exactly once
#[derive(Debug, Clone)]
pub struct MomentumScenario {
    mass1: f64,
    mass2: f64,

    /// Launch speed of the first cart in m/s
    velocity1: f64,

    model: CollisionModel,

    /// Carts in m/s along x, positions in pixels
    carts: [Body; 2],
    flags: ScenarioFlags,
}

impl MomentumScenario {
    pub fn new() -> Self {
        let mut scenario = Self {
            mass1: 2.0,
            mass2: 3.0,
            velocity1: 5.0,
            model: CollisionModel::Elastic,
            carts: [Self::cart(START_1, 0.0, 1.0, BodyColor::Sky), Self::cart(START_2, 0.0, 1.0, BodyColor::Coral)],
            flags: ScenarioFlags::empty(),
        };
        scenario.reset();
        scenario
    }

    fn cart(x: f64, velocity: f64, mass: f64, color: BodyColor) -> Body {
        Body::new(
            Vector2::new(x, TRACK_Y),
            Vector2::new(velocity, 0.0),
            mass,
            RADIUS_SCALE,
            RADIUS_OFFSET,
            color,
        )
    }

    fn advance(cart: &mut Body, dt: f64) {
        let mut phase = PhaseState::new(cart.position.x, cart.velocity.x);
        SemiImplicitEuler.integrate(&mut phase, &Uniform, &Step::new(dt).scaled(PIXELS_PER_METER));
        cart.position.x = phase.position;
    }

    pub fn model(&self) -> CollisionModel {
        self.model
    }

    pub fn total_momentum(&self) -> f64 {
        self.carts.iter().map(|cart| cart.momentum().x).sum()
    }

    pub fn carts(&self) -> &[Body; 2] {
        &self.carts
    }
}

impl Default for MomentumScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for MomentumScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Momentum
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "mass1" => Some(self.mass1),
            "mass2" => Some(self.mass2),
            "velocity1" => Some(self.velocity1),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "mass1" => self.mass1 = value,
            "mass2" => self.mass2 = value,
            "velocity1" => self.velocity1 = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    /// Nothing moves once the collision has been resolved
    fn is_running(&self) -> bool {
        !self.flags.contains(ScenarioFlags::COLLIDED)
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        for cart in &mut self.carts {
            Self::advance(cart, ctx.dt);
        }
    }

    /// On contact the carts also move on with their new velocities in the
    /// same step
    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        let [a, b] = &mut self.carts;
        if resolve_head_on(a, b, self.model, &mut self.flags) {
            Self::advance(a, ctx.dt);
            Self::advance(b, ctx.dt);
            debug!(model = ?self.model, v1 = a.velocity.x, v2 = b.velocity.x, "carts collided");
            ctx.events.push(SimulationEvent::for_pair(SimulationEventType::Collision, ctx.time, 0, 1));
        }
        Resolution::Continue
    }

    fn reset(&mut self) {
        self.carts = [
            Self::cart(START_1, self.velocity1, self.mass1, BodyColor::Sky),
            Self::cart(START_2, 0.0, self.mass2, BodyColor::Coral),
        ];
        self.flags = ScenarioFlags::empty();
    }

    fn state(&self) -> SimulationState {
        let [a, b] = &self.carts;
        let kinetic = a.kinetic_energy() + b.kinetic_energy();
        SimulationState::new()
            .with("x1", a.position.x)
            .with("x2", b.position.x)
            .with("v1", a.velocity.x)
            .with("v2", b.velocity.x)
            .with("initial_momentum", self.mass1 * self.velocity1)
            .with("momentum", self.total_momentum())
            .with("kinetic_energy", kinetic)
            .with("elastic", if self.model == CollisionModel::Elastic { 1.0 } else { 0.0 })
            .with_bodies(&self.carts)
            .with_flags(self.flags)
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Space if self.flags.contains(ScenarioFlags::COLLIDED) => KeyOutcome::Reset,
            k if k.is_letter('e') => {
                self.model = match self.model {
                    CollisionModel::Elastic => CollisionModel::Inelastic,
                    CollisionModel::Inelastic => CollisionModel::Elastic,
                };
                KeyOutcome::Reset
            }
            _ => KeyOutcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;
    use approx::assert_relative_eq;

    fn run_until_collision(scenario: &mut MomentumScenario) -> usize {
        let mut events = EventQueue::new();
        let mut ticks = 0;
        while scenario.is_running() && ticks < 10_000 {
            let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
            scenario.integrate(&mut ctx);
            scenario.resolve(&mut ctx);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn elastic_collision_conserves_momentum() {
        let mut scenario = MomentumScenario::new();
        run_until_collision(&mut scenario);
        assert!(scenario.state().flags.contains(ScenarioFlags::COLLIDED));
        assert_relative_eq!(scenario.total_momentum(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(scenario.carts()[0].velocity.x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(scenario.carts()[1].velocity.x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn inelastic_carts_move_together() {
        let mut scenario = MomentumScenario::new();
        assert_eq!(scenario.handle_key(Key::Char('e')), KeyOutcome::Reset);
        assert_eq!(scenario.model(), CollisionModel::Inelastic);
        run_until_collision(&mut scenario);
        let [a, b] = scenario.carts();
        assert_eq!(a.velocity.x, b.velocity.x);
    }

    #[test]
    fn reset_restores_launch_velocity() {
        let mut scenario = MomentumScenario::new();
        run_until_collision(&mut scenario);
        scenario.reset();
        assert_eq!(scenario.carts()[0].velocity.x, 5.0);
        assert_eq!(scenario.carts()[0].position.x, START_1);
        assert!(scenario.is_running());
    }

    #[test]
    fn space_resets_only_after_collision() {
        let mut scenario = MomentumScenario::new();
        assert_eq!(scenario.handle_key(Key::Space), KeyOutcome::Unhandled);
        run_until_collision(&mut scenario);
        assert_eq!(scenario.handle_key(Key::Space), KeyOutcome::Reset);
    }
}

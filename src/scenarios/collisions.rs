use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::bodies::{Body, BodyColor};
use crate::collision::{resolve_pairs, Bounds, Walls};
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::history::HistoryBuffer;
use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{SimulationConfig, SimulationState, TrailPoint};
use crate::integration::SemiImplicitEuler;
use crate::math::Vector2;
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("gravity", 0.0, 1.0, ResetPolicy::Live),
    ParamSpec::new("damping", 0.0, 1.0, ResetPolicy::Live),
];

/// Balls move in pixels per frame: one step is one frame
const FRAME: f64 = 1.0;
const RADIUS_SCALE: f64 = 15.0;
const RADIUS_OFFSET: f64 = 10.0;
const BALL_TRAIL_CAPACITY: usize = 30;

/// (x, y, vx, vy, mass) of the balls present after a reset
const INITIAL_BALLS: [(f64, f64, f64, f64, f64); 3] = [
    (200.0, 150.0, 2.0, 3.0, 1.0),
    (400.0, 200.0, -1.5, 2.0, 1.5),
    (600.0, 180.0, 0.0, -2.0, 0.8),
];

/// Balls under gravity in a walled box, colliding pairwise
#[derive(Debug, Clone)]
pub struct CollisionsScenario {
    gravity: f64,

    /// Restitution of walls and ball pairs alike
    damping: f64,

    walls: Walls,
    balls: Vec<Body>,
    trails: Vec<HistoryBuffer<TrailPoint>>,
    empty_trail: HistoryBuffer<TrailPoint>,
    seed: u64,
    rng: StdRng,
}

impl CollisionsScenario {
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let walls = Walls::new(
            Bounds::new(50.0, config.canvas_width - 50.0),
            Bounds::new(50.0, config.canvas_height - 50.0),
        );
        let mut scenario = Self {
            gravity: 0.2,
            damping: 0.98,
            walls,
            balls: Vec::new(),
            trails: Vec::new(),
            empty_trail: HistoryBuffer::new(BALL_TRAIL_CAPACITY)?,
            seed: config.seed,
            rng: StdRng::seed_from_u64(config.seed),
        };
        scenario.reset();
        Ok(scenario)
    }

    /// Adds a ball at the end of the draw order, colored by its index
    pub fn add_ball(&mut self, position: Vector2, velocity: Vector2, mass: f64) -> usize {
        let color = BodyColor::from_index(self.balls.len());
        self.balls.push(Body::new(position, velocity, mass, RADIUS_SCALE, RADIUS_OFFSET, color));
        self.trails.push(self.empty_trail.clone());
        self.balls.len() - 1
    }

    pub fn clear(&mut self) {
        self.balls.clear();
        self.trails.clear();
    }

    pub fn balls(&self) -> &[Body] {
        &self.balls
    }

    pub fn total_momentum(&self) -> Vector2 {
        self.balls.iter().fold(Vector2::zero(), |sum, ball| sum + ball.momentum())
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.balls.iter().map(Body::kinetic_energy).sum()
    }
}

impl Scenario for CollisionsScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Collisions
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "gravity" => Some(self.gravity),
            "damping" => Some(self.damping),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "gravity" => self.gravity = value,
            "damping" => self.damping = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, _ctx: &mut StepContext<'_>) {
        let gravity = Vector2::new(0.0, self.gravity);
        for ball in &mut self.balls {
            SemiImplicitEuler.integrate_vector(&mut ball.position, &mut ball.velocity, gravity, FRAME);
        }
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        for (index, (ball, trail)) in self.balls.iter_mut().zip(&mut self.trails).enumerate() {
            if self.walls.bounce(ball, self.damping) {
                ctx.events.push(SimulationEvent::for_body(SimulationEventType::Bounce, ctx.time, index));
            }
            trail.push(TrailPoint::new(ball.position.x, ball.position.y));
        }

        for (a, b) in resolve_pairs(&mut self.balls, self.damping) {
            debug!(a, b, "balls collided");
            ctx.events.push(SimulationEvent::for_pair(SimulationEventType::Collision, ctx.time, a, b));
        }

        // separation can push a ball through a wall
        for ball in &mut self.balls {
            self.walls.confine(ball);
        }
        Resolution::Continue
    }

    fn trails(&self) -> Vec<Vec<TrailPoint>> {
        self.trails.iter().map(|trail| trail.iter().copied().collect()).collect()
    }

    fn reset(&mut self) {
        self.clear();
        self.rng = StdRng::seed_from_u64(self.seed);
        for (x, y, vx, vy, mass) in INITIAL_BALLS {
            self.add_ball(Vector2::new(x, y), Vector2::new(vx, vy), mass);
        }
    }

    fn state(&self) -> SimulationState {
        let momentum = self.total_momentum();
        SimulationState::new()
            .with("ball_count", self.balls.len() as f64)
            .with("momentum_x", momentum.x)
            .with("momentum_y", momentum.y)
            .with("kinetic_energy", self.total_kinetic_energy())
            .with_bodies(&self.balls)
    }

    /// Spawns a ball with a random mass and velocity at the pointer
    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        if !(self.walls.x.contains(x) && self.walls.y.contains(y)) {
            return InputOutcome::Ignored;
        }
        let mass = self.rng.gen_range(0.5..2.0);
        let vx = self.rng.gen_range(-3.0..3.0);
        let vy = self.rng.gen_range(-3.0..3.0);
        let index = self.add_ball(Vector2::new(x, y), Vector2::new(vx, vy), mass);
        debug!(index, mass, "ball spawned");
        InputOutcome::Handled
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('c') {
            self.clear();
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

    fn scenario() -> CollisionsScenario {
        CollisionsScenario::new(&SimulationConfig::default()).unwrap()
    }

    fn tick(scenario: &mut CollisionsScenario) {
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        scenario.integrate(&mut ctx);
        scenario.resolve(&mut ctx);
    }

    #[test]
    fn starts_with_three_balls() {
        let balls = scenario();
        assert_eq!(balls.balls().len(), 3);
        assert_eq!(balls.balls()[1].color, BodyColor::Coral);
    }

    #[test]
    fn balls_stay_inside_walls() {
        let mut balls = scenario();
        for _ in 0..2000 {
            tick(&mut balls);
        }
        for ball in balls.balls() {
            assert!(ball.position.x - ball.radius >= 50.0 - 1e-9);
            assert!(ball.position.x + ball.radius <= 950.0 + 1e-9);
            assert!(ball.position.y - ball.radius >= 50.0 - 1e-9);
            assert!(ball.position.y + ball.radius <= 550.0 + 1e-9);
        }
    }

    #[test]
    fn trails_are_capped_per_ball() {
        let mut balls = scenario();
        for _ in 0..100 {
            tick(&mut balls);
        }
        assert!(balls.trails().iter().all(|trail| trail.len() == BALL_TRAIL_CAPACITY));
    }

    #[test]
    fn spawns_are_reproducible_from_the_seed() {
        let mut a = scenario();
        let mut b = scenario();
        a.pointer_down(500.0, 300.0);
        b.pointer_down(500.0, 300.0);
        assert_eq!(a.balls(), b.balls());
        assert_eq!(a.balls()[3].color, BodyColor::Amber);
    }

    #[test]
    fn clicks_outside_the_box_are_ignored() {
        let mut balls = scenario();
        assert_eq!(balls.pointer_down(20.0, 300.0), InputOutcome::Ignored);
        assert_eq!(balls.handle_key(Key::Char('c')), KeyOutcome::Handled);
        assert!(balls.balls().is_empty());
    }
}

use tracing::debug;

use crate::bodies::{Body, BodyColor};
use crate::collision::{ContactOutcome, GroundContact};
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::SimulationState;
use crate::forces::QuadraticDrag;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step};
use crate::math::Vector2;
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("drop_height", 20.0, ResetPolicy::Live),
    ParamSpec::positive("mass", 10.0, ResetPolicy::Live),
    ParamSpec::new("drag", 0.0, 2.0, ResetPolicy::Live),
];

const GRAVITY: f64 = 9.8;
const PIXELS_PER_METER: f64 = 25.0;
const GROUND_Y: f64 = 550.0;

/// Objects are dropped after this many simulated seconds
const LIFETIME: f64 = 15.0;

/// Drawn diameter is `sqrt(m)·15 + 10`
const RADIUS_SCALE: f64 = 7.5;
const RADIUS_OFFSET: f64 = 5.0;

/// Objects dropped from a set height, optionally against air drag
#[derive(Debug, Clone)]
pub struct FreeFallScenario {
    drop_height: f64,

    /// Mass given to the next dropped object
    mass: f64,
    drag: f64,

    /// Falling objects; `velocity.y` is in m/s, positive downward
    objects: Vec<Body>,
}

impl FreeFallScenario {
    pub fn new() -> Self {
        Self { drop_height: 10.0, mass: 1.0, drag: 0.0, objects: Vec::new() }
    }

    /// Drops a new object at `x` from the configured height
    pub fn drop_object(&mut self, x: f64) -> usize {
        let y = GROUND_Y - self.drop_height * PIXELS_PER_METER;
        let color = BodyColor::from_index(self.objects.len());
        self.objects.push(Body::new(
            Vector2::new(x, y),
            Vector2::zero(),
            self.mass,
            RADIUS_SCALE,
            RADIUS_OFFSET,
            color,
        ));
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[Body] {
        &self.objects
    }

    /// Impact speed without drag, `sqrt(2·g·h)`
    pub fn theoretical_impact_speed(&self) -> f64 {
        (2.0 * GRAVITY * self.drop_height).sqrt()
    }
}

impl Default for FreeFallScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for FreeFallScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::FreeFall
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "drop_height" => Some(self.drop_height),
            "mass" => Some(self.mass),
            "drag" => Some(self.drag),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "drop_height" => self.drop_height = value,
            "mass" => self.mass = value,
            "drag" => self.drag = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let step = Step::new(ctx.dt).scaled(PIXELS_PER_METER);
        for object in &mut self.objects {
            object.age += ctx.dt;
            if object.resting {
                continue;
            }
            let law = QuadraticDrag { gravity: GRAVITY, drag: self.drag, mass: object.mass };
            let mut fall = PhaseState::new(object.position.y, object.velocity.y);
            SemiImplicitEuler.integrate(&mut fall, &law, &step);
            object.position.y = fall.position;
            object.velocity.y = fall.velocity;
        }
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        let ground = GroundContact::new(GROUND_Y);
        for (index, object) in self.objects.iter_mut().enumerate() {
            if object.resting {
                continue;
            }
            match ground.resolve(&mut object.position.y, &mut object.velocity.y) {
                ContactOutcome::Airborne => {}
                ContactOutcome::Bounced => {
                    ctx.events.push(SimulationEvent::for_body(SimulationEventType::Bounce, ctx.time, index));
                }
                ContactOutcome::Settled => {
                    object.resting = true;
                    ctx.events.push(SimulationEvent::for_body(SimulationEventType::CameToRest, ctx.time, index));
                }
            }
        }

        for index in (0..self.objects.len()).rev() {
            if self.objects[index].age > LIFETIME {
                self.objects.remove(index);
                debug!(index, "object expired");
                ctx.events.push(SimulationEvent::for_body(SimulationEventType::BodyExpired, ctx.time, index));
            }
        }
        Resolution::Continue
    }

    fn reset(&mut self) {
        self.objects.clear();
    }

    fn state(&self) -> SimulationState {
        let law = QuadraticDrag { gravity: GRAVITY, drag: self.drag, mass: self.mass };
        let mut state = SimulationState::new()
            .with("object_count", self.objects.len() as f64)
            .with("impact_speed", self.theoretical_impact_speed())
            .with("fall_time", (2.0 * self.drop_height / GRAVITY).sqrt())
            .with_bodies(&self.objects);

        // no terminal velocity without drag
        if self.drag > 0.0 {
            state.set("terminal_velocity", law.terminal_velocity());
        }
        state
    }

    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        if x > 100.0 && x < 900.0 && y > 50.0 && y < GROUND_Y {
            let index = self.drop_object(x);
            debug!(index, height = self.drop_height, "object dropped");
            InputOutcome::Handled
        } else {
            InputOutcome::Ignored
        }
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if key.is_letter('c') {
            self.objects.clear();
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
    use approx::assert_relative_eq;

    fn run(scenario: &mut FreeFallScenario, ticks: usize) -> usize {
        let mut events = EventQueue::new();
        let mut landed = 0;
        for _ in 0..ticks {
            events.clear();
            let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
            scenario.integrate(&mut ctx);
            scenario.resolve(&mut ctx);
            landed += events.events_of_type(SimulationEventType::Bounce).len();
        }
        landed
    }

    #[test]
    fn object_hits_ground_near_the_free_fall_time() {
        let mut scenario = FreeFallScenario::new();
        scenario.drop_object(500.0);
        // sqrt(2 * 10 / 9.8) is about 1.43 s
        run(&mut scenario, 85);
        assert!(scenario.objects()[0].position.y < GROUND_Y);
        let bounces = run(&mut scenario, 1);
        assert_eq!(bounces, 1);
        assert_eq!(scenario.objects()[0].position.y, GROUND_Y);
    }

    #[test]
    fn objects_settle_then_expire() {
        let mut scenario = FreeFallScenario::new();
        scenario.drop_object(500.0);
        run(&mut scenario, 60 * 10);
        assert!(scenario.objects()[0].resting);
        assert_eq!(scenario.objects()[0].velocity.y, 0.0);
        run(&mut scenario, 60 * 6);
        assert!(scenario.objects().is_empty());
    }

    #[test]
    fn drag_limits_fall_speed() {
        let mut scenario = FreeFallScenario::new();
        scenario.drag = 0.5;
        scenario.drop_height = 20.0;
        scenario.drop_object(500.0);
        run(&mut scenario, 60);
        let terminal = QuadraticDrag { gravity: GRAVITY, drag: 0.5, mass: 1.0 }.terminal_velocity();
        assert!(scenario.objects()[0].velocity.y < terminal);
        assert_relative_eq!(terminal, (9.8f64 / 0.5).sqrt());
    }

    #[test]
    fn terminal_velocity_only_reported_with_drag() {
        let mut scenario = FreeFallScenario::new();
        scenario.drop_object(500.0);
        run(&mut scenario, 30);
        let state = scenario.state();
        assert!(state.is_finite());
        assert_eq!(state.get("terminal_velocity"), None);

        scenario.drag = 0.5;
        assert_relative_eq!(scenario.state().get("terminal_velocity").unwrap(), (9.8f64 / 0.5).sqrt());
    }
}

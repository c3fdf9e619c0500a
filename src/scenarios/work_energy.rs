use tracing::debug;

use crate::collision::RampEnd;
use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{ScenarioFlags, SimulationState};
use crate::forces::{ForceLaw, Incline};
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step, VelocityFilter};
use crate::math::{safe_div, to_radians, Vector2};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::positive("height", 10.0, ResetPolicy::Reset),
    ParamSpec::positive("mass", 10.0, ResetPolicy::Reset),
    ParamSpec::new("friction", 0.0, 1.0, ResetPolicy::Reset),
    ParamSpec::new("angle", 5.0, 60.0, ResetPolicy::Reset),
];

const GRAVITY: f64 = 9.8;
const PIXELS_PER_METER: f64 = 50.0;

/// Top of the ramp, where the box starts
const RAMP_TOP: Vector2 = Vector2::new(100.0, 200.0);

/// Region around the box that starts the slide when clicked
const START_REGION: (f64, f64, f64, f64) = (50.0, 150.0, 200.0, 300.0);

/// Box sliding down a rough ramp.
///
/// Waits at the top until started. The slide ends at the bottom of the ramp,
/// where the box stops and keeps 80% of its speed for the readout.
#[derive(Debug, Clone)]
pub struct WorkEnergyScenario {
    height: f64,
    mass: f64,
    friction: f64,

    /// Ramp angle in degrees
    angle: f64,

    /// Distance travelled along the ramp in pixels, speed in m/s
    phase: PhaseState,
    flags: ScenarioFlags,
}

impl WorkEnergyScenario {
    pub fn new() -> Self {
        Self {
            height: 5.0,
            mass: 2.0,
            friction: 0.1,
            angle: 30.0,
            phase: PhaseState::default(),
            flags: ScenarioFlags::empty(),
        }
    }

    fn radians(&self) -> f64 {
        to_radians(self.angle)
    }

    fn law(&self) -> Incline {
        Incline { gravity: GRAVITY, angle: self.radians(), friction: self.friction }
    }

    /// Ramp length along the slope, in pixels
    fn ramp_length(&self) -> f64 {
        safe_div(self.height, self.radians().sin()) * PIXELS_PER_METER
    }

    pub fn box_position(&self) -> Vector2 {
        let theta = self.radians();
        RAMP_TOP + Vector2::new(theta.cos(), theta.sin()) * self.phase.position
    }

    fn start(&mut self) -> bool {
        if self.flags.intersects(ScenarioFlags::MOVING | ScenarioFlags::STOPPED) {
            return false;
        }
        self.flags.insert(ScenarioFlags::MOVING);
        debug!(angle = self.angle, "slide started");
        true
    }
}

impl Default for WorkEnergyScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for WorkEnergyScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::WorkEnergy
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "height" => Some(self.height),
            "mass" => Some(self.mass),
            "friction" => Some(self.friction),
            "angle" => Some(self.angle),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "height" => self.height = value,
            "mass" => self.mass = value,
            "friction" => self.friction = value,
            "angle" => self.angle = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.flags.contains(ScenarioFlags::MOVING)
    }

    /// Friction steeper than the slope holds the box instead of pulling it uphill
    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let step = Step::new(ctx.dt)
            .scaled(PIXELS_PER_METER)
            .filtered(VelocityFilter::ClampNonNegative);
        let law = self.law();
        SemiImplicitEuler.integrate(&mut self.phase, &law, &step);
    }

    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        let ramp = RampEnd::new(self.ramp_length());
        let PhaseState { position, velocity } = &mut self.phase;
        if ramp.resolve(position, velocity, &mut self.flags) {
            debug!(velocity = *velocity, "box reached the end of the ramp");
            ctx.events.push(SimulationEvent::new(SimulationEventType::ReachedEnd, ctx.time));
        }
        Resolution::Continue
    }

    fn reset(&mut self) {
        self.phase = PhaseState::default();
        self.flags = ScenarioFlags::empty();
    }

    fn state(&self) -> SimulationState {
        let theta = self.radians();
        let travelled = self.phase.position / PIXELS_PER_METER;
        let drop = travelled * theta.sin();
        let speed = self.phase.velocity;
        let position = self.box_position();
        SimulationState::new()
            .with("distance", self.phase.position)
            .with("velocity", speed)
            .with("box_x", position.x)
            .with("box_y", position.y)
            .with("acceleration", self.law().acceleration(0.0, 0.0))
            .with("potential_energy", self.mass * GRAVITY * (self.height - drop))
            .with("kinetic_energy", 0.5 * self.mass * speed * speed)
            .with("friction_work", self.friction * self.mass * GRAVITY * theta.cos() * travelled)
            .with_flags(self.flags)
    }

    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        let (left, top, right, bottom) = START_REGION;
        if x > left && x < right && y > top && y < bottom && self.start() {
            InputOutcome::Handled
        } else {
            InputOutcome::Ignored
        }
    }

    /// Space starts the slide, pauses a running one and restarts a finished one
    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Space if self.flags.contains(ScenarioFlags::STOPPED) => KeyOutcome::Reset,
            Key::Space if self.start() => KeyOutcome::Handled,
            k if k.is_letter('v') || k.is_letter('e') => KeyOutcome::Ignored,
            _ => KeyOutcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventQueue;
    use approx::assert_relative_eq;

    fn run(scenario: &mut WorkEnergyScenario) -> usize {
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
    fn waits_at_the_top_until_started() {
        let mut scenario = WorkEnergyScenario::new();
        assert!(!scenario.is_running());
        assert_eq!(scenario.pointer_down(120.0, 220.0), InputOutcome::Handled);
        assert!(scenario.is_running());
    }

    #[test]
    fn slide_stops_at_the_ramp_end() {
        let mut scenario = WorkEnergyScenario::new();
        scenario.handle_key(Key::Space);
        run(&mut scenario);
        let state = scenario.state();
        assert_eq!(state.flags, ScenarioFlags::STOPPED);
        assert_relative_eq!(scenario.phase.position, 500.0, epsilon = 1e-9);
        assert!(scenario.phase.velocity > 0.0);
    }

    #[test]
    fn friction_steeper_than_slope_holds_box() {
        let mut scenario = WorkEnergyScenario::new();
        scenario.friction = 1.0;
        scenario.angle = 10.0;
        scenario.handle_key(Key::Space);
        let mut events = EventQueue::new();
        let mut ctx = StepContext { time: 0.0, dt: 1.0 / 60.0, events: &mut events };
        scenario.integrate(&mut ctx);
        assert_eq!(scenario.phase, PhaseState::default());
    }

    #[test]
    fn space_after_the_end_resets() {
        let mut scenario = WorkEnergyScenario::new();
        scenario.handle_key(Key::Space);
        run(&mut scenario);
        assert_eq!(scenario.handle_key(Key::Space), KeyOutcome::Reset);
    }
}

use tracing::debug;

use crate::core::events::{SimulationEvent, SimulationEventType};
use crate::core::history::HistoryBuffer;
use crate::core::input::{Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{ScenarioFlags, SimulationConfig, SimulationState, TrailPoint};
use crate::math::{safe_div, to_radians, Vector2};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("angle", 0.0, 90.0, ResetPolicy::Reset),
    ParamSpec::positive("speed", 50.0, ResetPolicy::Reset),
    ParamSpec::positive("gravity", 30.0, ResetPolicy::Reset),
];

const PIXELS_PER_METER: f64 = 20.0;

/// Launch point in meters from the bottom-left corner
const LAUNCH: Vector2 = Vector2::new(2.0, 2.0);

const COMPLETED_TRAILS: usize = 5;

/// Flights shorter than this many points are not kept
const MIN_TRAIL_POINTS: usize = 5;

const PREDICTION_STEP: f64 = 0.05;
const PREDICTION_POINTS: usize = 300;

/// Ballistic flight evaluated in closed form at the flight time
#[derive(Debug, Clone)]
pub struct ProjectileScenario {
    /// Launch angle in degrees
    angle: f64,
    speed: f64,
    gravity: f64,

    canvas_width: f64,
    canvas_height: f64,

    /// Seconds since launch
    flight_time: f64,

    /// Position in meters at `flight_time`
    position: Vector2,

    /// Current flight, bounded like every other trail
    path: HistoryBuffer<TrailPoint>,
    completed: HistoryBuffer<Vec<TrailPoint>>,
    flags: ScenarioFlags,
}

impl ProjectileScenario {
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        Ok(Self {
            angle: 45.0,
            speed: 20.0,
            gravity: 9.8,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            flight_time: 0.0,
            position: LAUNCH,
            path: HistoryBuffer::new(config.trail_capacity)?,
            completed: HistoryBuffer::new(COMPLETED_TRAILS)?,
            flags: ScenarioFlags::empty(),
        })
    }

    fn launch_velocity(&self) -> Vector2 {
        let theta = to_radians(self.angle);
        Vector2::new(self.speed * theta.cos(), self.speed * theta.sin())
    }

    /// Position in meters `t` seconds after launch
    pub fn position_at(&self, t: f64) -> Vector2 {
        let v = self.launch_velocity();
        Vector2::new(
            LAUNCH.x + v.x * t,
            LAUNCH.y + v.y * t - 0.5 * self.gravity * t * t,
        )
    }

    fn to_canvas(&self, meters: Vector2) -> TrailPoint {
        TrailPoint::new(meters.x * PIXELS_PER_METER, self.canvas_height - meters.y * PIXELS_PER_METER)
    }

    fn out_of_flight(&self, meters: Vector2) -> bool {
        meters.y <= 0.0 || meters.x * PIXELS_PER_METER > self.canvas_width
    }

    /// Sampled trajectory for the current parameters, in canvas pixels
    pub fn predicted_path(&self) -> Vec<TrailPoint> {
        (0..PREDICTION_POINTS)
            .map(|i| self.position_at(i as f64 * PREDICTION_STEP))
            .take_while(|p| !self.out_of_flight(*p))
            .map(|p| self.to_canvas(p))
            .collect()
    }

    /// Seconds until the projectile returns to the ground, `y = 0`
    pub fn time_of_flight(&self) -> f64 {
        let vy = self.launch_velocity().y;
        safe_div(vy + (vy * vy + 2.0 * self.gravity * LAUNCH.y).sqrt(), self.gravity)
    }

    /// Highest point above the ground in meters
    pub fn max_height(&self) -> f64 {
        let vy = self.launch_velocity().y;
        LAUNCH.y + safe_div(vy * vy, 2.0 * self.gravity)
    }

    pub fn launch(&mut self) -> bool {
        if self.flags.contains(ScenarioFlags::LAUNCHED) {
            return false;
        }
        self.flags.insert(ScenarioFlags::LAUNCHED);
        self.flight_time = 0.0;
        self.position = LAUNCH;
        self.path.clear();
        debug!(angle = self.angle, speed = self.speed, "projectile launched");
        true
    }

    pub fn completed_trails(&self) -> &HistoryBuffer<Vec<TrailPoint>> {
        &self.completed
    }
}

impl Scenario for ProjectileScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::ProjectileMotion
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "angle" => Some(self.angle),
            "speed" => Some(self.speed),
            "gravity" => Some(self.gravity),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "angle" => self.angle = value,
            "speed" => self.speed = value,
            "gravity" => self.gravity = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.flags.contains(ScenarioFlags::LAUNCHED)
    }

    fn integrate(&mut self, _ctx: &mut StepContext<'_>) {
        self.position = self.position_at(self.flight_time);
    }

    /// Lands once the ball touches the ground or leaves the canvas; the flight
    /// is archived when it left a usable trail
    fn resolve(&mut self, ctx: &mut StepContext<'_>) -> Resolution {
        if self.out_of_flight(self.position) {
            if self.path.len() > MIN_TRAIL_POINTS {
                self.completed.push(self.path.iter().copied().collect());
            }
            self.path.clear();
            self.flags.remove(ScenarioFlags::LAUNCHED);
            debug!(range = self.position.x - LAUNCH.x, time = self.flight_time, "projectile landed");
            ctx.events.push(SimulationEvent::new(SimulationEventType::Landed, ctx.time));
        } else {
            self.path.push(self.to_canvas(self.position));
            self.flight_time += ctx.dt;
        }
        Resolution::Continue
    }

    fn trails(&self) -> Vec<Vec<TrailPoint>> {
        let mut trails: Vec<Vec<TrailPoint>> = self.completed.iter().cloned().collect();
        if !self.path.is_empty() {
            trails.push(self.path.iter().copied().collect());
        }
        trails
    }

    fn reset(&mut self) {
        self.flags.remove(ScenarioFlags::LAUNCHED);
        self.flight_time = 0.0;
        self.position = LAUNCH;
        self.path.clear();
    }

    fn state(&self) -> SimulationState {
        let v = self.launch_velocity();
        let canvas = self.to_canvas(self.position);
        SimulationState::new()
            .with("x", self.position.x)
            .with("y", self.position.y)
            .with("canvas_x", canvas.x)
            .with("canvas_y", canvas.y)
            .with("vx", v.x)
            .with("vy", v.y - self.gravity * self.flight_time)
            .with("flight_time", self.flight_time)
            .with("time_of_flight", self.time_of_flight())
            .with("max_height", self.max_height())
            .with_flags(self.flags)
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Space if self.is_running() => KeyOutcome::Reset,
            Key::Space => {
                self.launch();
                KeyOutcome::Handled
            }
            k if k.is_letter('c') => {
                self.completed.clear();
                KeyOutcome::Handled
            }
            k if k.is_letter('p') || k.is_letter('v') => KeyOutcome::Ignored,
            _ => KeyOutcome::Unhandled,
        }
    }
}

use tracing::debug;

use crate::bodies::{Body, BodyColor};
use crate::collision::Bounds;
use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{SimulationConfig, SimulationState};
use crate::math::{safe_div, Vector2};
use crate::scenarios::{unknown_parameter, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[ParamSpec::positive("new_mass", 20.0, ResetPolicy::Live)];

/// Drawn size is `sqrt(m)·8 + 20`, so the radius is half of that
const RADIUS_SCALE: f64 = 4.0;
const RADIUS_OFFSET: f64 = 10.0;

/// Spawning keeps this far from the canvas edges
const SPAWN_MARGIN: f64 = 50.0;

const INITIAL_OBJECTS: [(f64, f64, f64); 3] = [(300.0, 200.0, 3.0), (500.0, 300.0, 7.0), (700.0, 250.0, 2.0)];

/// Static point masses the user places and drags around their weighted centroid
#[derive(Debug, Clone)]
pub struct CenterOfMassScenario {
    new_mass: f64,
    width: f64,
    height: f64,
    objects: Vec<Body>,

    /// Index of the object under the pointer, if one is being dragged
    dragging: Option<usize>,
}

impl CenterOfMassScenario {
    pub fn new(config: &SimulationConfig) -> Self {
        let mut scenario = Self {
            new_mass: 5.0,
            width: config.canvas_width,
            height: config.canvas_height,
            objects: Vec::new(),
            dragging: None,
        };
        scenario.reset();
        scenario
    }

    pub fn add_object(&mut self, position: Vector2, mass: f64) -> usize {
        let color = BodyColor::from_index(self.objects.len());
        self.objects.push(Body::new(position, Vector2::zero(), mass, RADIUS_SCALE, RADIUS_OFFSET, color));
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[Body] {
        &self.objects
    }

    pub fn total_mass(&self) -> f64 {
        self.objects.iter().map(|o| o.mass).sum()
    }

    /// Mass-weighted mean position, or the canvas centre when there are no objects
    pub fn center_of_mass(&self) -> Vector2 {
        if self.objects.is_empty() {
            return Vector2::new(self.width / 2.0, self.height / 2.0);
        }
        let total = self.total_mass();
        let weighted = self.objects.iter().fold(Vector2::zero(), |sum, o| sum + o.position * o.mass);
        Vector2::new(safe_div(weighted.x, total), safe_div(weighted.y, total))
    }
}

impl Scenario for CenterOfMassScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::CenterOfMass
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "new_mass" => Some(self.new_mass),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "new_mass" => self.new_mass = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    /// Nothing moves on its own
    fn integrate(&mut self, _ctx: &mut StepContext<'_>) {}

    fn reset(&mut self) {
        self.objects.clear();
        self.dragging = None;
        for (x, y, mass) in INITIAL_OBJECTS {
            self.add_object(Vector2::new(x, y), mass);
        }
    }

    fn state(&self) -> SimulationState {
        let center = self.center_of_mass();
        SimulationState::new()
            .with("center_x", center.x)
            .with("center_y", center.y)
            .with("total_mass", self.total_mass())
            .with("count", self.objects.len() as f64)
            .with_bodies(&self.objects)
    }

    fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        let pointer = Vector2::new(x, y);
        if let Some(index) = self.objects.iter().position(|o| o.contains(pointer)) {
            self.dragging = Some(index);
            return InputOutcome::Handled;
        }

        let xs = Bounds::new(SPAWN_MARGIN, self.width - SPAWN_MARGIN);
        let ys = Bounds::new(SPAWN_MARGIN, self.height - SPAWN_MARGIN);
        if xs.contains(x) && ys.contains(y) {
            let index = self.add_object(pointer, self.new_mass);
            debug!(index, mass = self.new_mass, "object placed");
            InputOutcome::Handled
        } else {
            InputOutcome::Ignored
        }
    }

    fn pointer_drag(&mut self, x: f64, y: f64) -> InputOutcome {
        let Some(object) = self.dragging.and_then(|i| self.objects.get_mut(i)) else {
            return InputOutcome::Ignored;
        };
        let r = object.radius;
        object.position.x = Bounds::new(r, self.width - r).clamp(x);
        object.position.y = Bounds::new(r, self.height - r).clamp(y);
        InputOutcome::Handled
    }

    fn pointer_up(&mut self) -> InputOutcome {
        match self.dragging.take() {
            Some(_) => InputOutcome::Handled,
            None => InputOutcome::Ignored,
        }
    }

    fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Delete | Key::Backspace => {
                self.objects.pop();
                self.dragging = None;
                KeyOutcome::Handled
            }
            k if k.is_letter('c') => {
                self.objects.clear();
                self.dragging = None;
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario() -> CenterOfMassScenario {
        CenterOfMassScenario::new(&SimulationConfig::default())
    }

    #[test]
    fn centroid_of_initial_objects() {
        let com = scenario().center_of_mass();
        assert_relative_eq!(com.x, (900.0 + 3500.0 + 1400.0) / 12.0, epsilon = 1e-9);
        assert_relative_eq!(com.y, (600.0 + 2100.0 + 500.0) / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_scene_centres_on_canvas() {
        let mut s = scenario();
        s.handle_key(Key::Char('C'));
        assert_eq!(s.center_of_mass(), Vector2::new(500.0, 300.0));
    }

    #[test]
    fn click_picks_or_spawns() {
        let mut s = scenario();
        assert_eq!(s.pointer_down(305.0, 200.0), InputOutcome::Handled);
        assert_eq!(s.objects().len(), 3);

        s.pointer_drag(-100.0, 2000.0);
        let r = s.objects()[0].radius;
        assert_eq!(s.objects()[0].position, Vector2::new(r, 600.0 - r));
        s.pointer_up();

        assert_eq!(s.pointer_down(800.0, 450.0), InputOutcome::Handled);
        assert_eq!(s.objects().len(), 4);
        assert_eq!(s.objects()[3].mass, 5.0);
        assert_eq!(s.pointer_down(20.0, 20.0), InputOutcome::Ignored);
    }

    #[test]
    fn delete_pops_newest() {
        let mut s = scenario();
        s.handle_key(Key::Backspace);
        assert_eq!(s.objects().len(), 2);
        assert_eq!(s.objects()[1].mass, 7.0);
    }
}

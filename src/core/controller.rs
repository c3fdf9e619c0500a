use tracing::{debug, error, info, warn};

use crate::core::events::EventQueue;
use crate::core::history::{HistoryBuffer, HistorySample, TrailPoint};
use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::{self, ResetPolicy};
use crate::core::{SimulationConfig, SimulationState};
use crate::error::SimulationError;
use crate::scenarios::{Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

/// Drives one scenario at a fixed time step and keeps its history
#[derive(Debug)]
pub struct ScenarioController {
    /// The demo being simulated
    scenario: Box<dyn Scenario>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Derived quantities, one sample per tick
    history: HistoryBuffer<HistorySample>,

    /// Positions of the tracked object, one point per tick
    trail: HistoryBuffer<TrailPoint>,

    /// Events produced by the last tick
    events: EventQueue,

    /// Simulated seconds since the last reset
    time: f64,

    /// Ticks actually stepped since construction
    tick_count: u64,

    paused: bool,
}

impl ScenarioController {
    /// Creates a controller for `kind` with that demo's default configuration
    pub fn new(kind: ScenarioKind) -> Result<Self> {
        Self::with_config(kind, kind.default_config())
    }

    /// Creates a controller with the given configuration
    pub fn with_config(kind: ScenarioKind, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let scenario = kind.create(&config)?;

        Ok(Self {
            scenario,
            history: HistoryBuffer::new(config.history_capacity)?,
            trail: HistoryBuffer::new(config.trail_capacity)?,
            config,
            events: EventQueue::new(),
            time: 0.0,
            tick_count: 0,
            paused: false,
        })
    }

    /// Advances the scenario by one fixed step.
    ///
    /// Does nothing while paused or while the scenario waits for input. A
    /// state that turns non-finite pauses the controller and is reported as
    /// [`SimulationError::NumericDegeneracy`].
    pub fn tick(&mut self) -> Result<()> {
        if self.paused || !self.scenario.is_running() {
            return Ok(());
        }

        self.events.clear();
        let dt = self.config.time_step;
        let mut ctx = StepContext { time: self.time, dt, events: &mut self.events };

        self.scenario.integrate(&mut ctx);
        let resolution = self.scenario.resolve(&mut ctx);

        match resolution {
            Resolution::Continue => {
                if let Some(sample) = self.scenario.sample(self.time) {
                    self.history.push(sample);
                }
                if let Some(point) = self.scenario.trail_point() {
                    self.trail.push(point);
                }
                self.time += dt;
            }
            Resolution::Restart => {
                debug!(scenario = %self.scenario.kind(), "scenario wrapped around");
                self.history.clear();
                self.trail.clear();
                self.time = 0.0;
            }
        }
        self.tick_count += 1;

        let state = self.scenario.state();
        let bad = state.non_finite_fields();
        if !bad.is_empty() {
            self.paused = true;
            error!(scenario = %self.scenario.kind(), fields = ?bad, "non-finite state, pausing");
            return Err(SimulationError::NumericDegeneracy(format!(
                "{} produced non-finite values in {}",
                self.scenario.kind(),
                bad.join(", ")
            )));
        }

        Ok(())
    }

    /// Runs `count` ticks, stopping at the first error
    pub fn run(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.tick()?;
        }
        Ok(())
    }

    /// Restores the initial state and clears history, trail, flags and time
    pub fn reset(&mut self) {
        self.scenario.reset();
        self.history.clear();
        self.trail.clear();
        self.events.clear();
        self.time = 0.0;
        self.paused = false;
        info!(scenario = %self.scenario.kind(), "scenario reset");
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Validates and applies a parameter change.
    ///
    /// Structural parameters restart the scenario; live ones take effect on
    /// the next tick. A rejected value leaves everything untouched.
    pub fn set_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        let kind = self.scenario.kind();
        let spec = params::lookup(self.scenario.parameter_specs(), kind.name(), key)
            .and_then(|spec| spec.validate(value).map(|_| spec))
            .map_err(|err| {
                warn!(scenario = %kind, key, value, %err, "parameter rejected");
                SimulationError::from(err)
            })?;

        self.scenario.apply_parameter(spec.key, value)?;
        info!(scenario = %kind, key, value, policy = ?spec.policy, "parameter changed");

        if spec.policy == ResetPolicy::Reset {
            self.reset();
        }
        Ok(())
    }

    /// Current value of a parameter
    pub fn get_parameter(&self, key: &str) -> Result<f64> {
        let kind = self.scenario.kind();
        params::lookup(self.scenario.parameter_specs(), kind.name(), key)?;
        self.scenario
            .parameter(key)
            .ok_or_else(|| crate::scenarios::unknown_parameter(kind, key))
    }

    /// Every parameter key with its current value, in table order
    pub fn parameters(&self) -> Vec<(&'static str, f64)> {
        self.scenario
            .parameter_specs()
            .iter()
            .filter_map(|spec| self.scenario.parameter(spec.key).map(|value| (spec.key, value)))
            .collect()
    }

    /// Read-only snapshot of the current state
    pub fn get_state(&self) -> SimulationState {
        let mut state = self.scenario.state();
        state.time = self.time;
        state
    }

    pub fn get_history(&self) -> &HistoryBuffer<HistorySample> {
        &self.history
    }

    pub fn get_trail(&self) -> &HistoryBuffer<TrailPoint> {
        &self.trail
    }

    /// Per-body paths kept by the scenario itself
    pub fn get_trails(&self) -> Vec<Vec<TrailPoint>> {
        self.scenario.trails()
    }

    /// Events produced by the most recent tick
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    pub fn get_time(&self) -> f64 {
        self.time
    }

    pub fn get_tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn kind(&self) -> ScenarioKind {
        self.scenario.kind()
    }

    pub fn scenario(&self) -> &dyn Scenario {
        self.scenario.as_ref()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> InputOutcome {
        let outcome = self.scenario.pointer_down(x, y);
        self.apply_input(outcome)
    }

    pub fn pointer_drag(&mut self, x: f64, y: f64) -> InputOutcome {
        let outcome = self.scenario.pointer_drag(x, y);
        self.apply_input(outcome)
    }

    pub fn pointer_up(&mut self) -> InputOutcome {
        let outcome = self.scenario.pointer_up();
        self.apply_input(outcome)
    }

    /// Forwards a key to the scenario, then applies the shared bindings:
    /// space toggles pause and `r` resets
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        let outcome = match self.scenario.handle_key(key) {
            KeyOutcome::Unhandled => match key {
                Key::Space => KeyOutcome::TogglePause,
                k if k.is_letter('r') => KeyOutcome::Reset,
                _ => KeyOutcome::Unhandled,
            },
            other => other,
        };

        match outcome {
            KeyOutcome::Reset => self.reset(),
            KeyOutcome::TogglePause => self.toggle_pause(),
            _ => {}
        }
        debug!(scenario = %self.scenario.kind(), ?key, ?outcome, "key handled");
        outcome
    }

    fn apply_input(&mut self, outcome: InputOutcome) -> InputOutcome {
        if let InputOutcome::ClearHistory { reset_time } = outcome {
            self.history.clear();
            self.trail.clear();
            if reset_time {
                self.time = 0.0;
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn paused_controller_does_not_advance() {
        let mut controller = ScenarioController::new(ScenarioKind::Pendulum).unwrap();
        controller.pause();
        controller.run(10).unwrap();
        assert_eq!(controller.get_time(), 0.0);
        assert_eq!(controller.get_tick_count(), 0);
    }

    #[test]
    fn tick_advances_time_by_fixed_step() {
        let mut controller = ScenarioController::new(ScenarioKind::Pendulum).unwrap();
        controller.run(60).unwrap();
        assert!((controller.get_time() - 1.0).abs() < 1e-9);
        assert_eq!(controller.get_trail().len(), 60);
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let mut controller = ScenarioController::new(ScenarioKind::Pendulum).unwrap();
        let err = controller.set_parameter("spin", 1.0).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Configuration(ConfigurationError::UnknownParameter {
                scenario: "pendulum",
                key: "spin".into(),
            })
        );
    }

    #[test]
    fn reset_parameter_restarts_and_live_parameter_does_not() {
        let mut controller = ScenarioController::new(ScenarioKind::Power).unwrap();
        controller.run(30).unwrap();

        controller.set_parameter("force", 40.0).unwrap();
        assert!(controller.get_time() > 0.0);
        assert_eq!(controller.get_parameter("force").unwrap(), 40.0);

        controller.set_parameter("mass", 8.0).unwrap();
        assert_eq!(controller.get_time(), 0.0);
        assert!(controller.get_history().is_empty());
    }

    #[test]
    fn space_and_r_use_shared_bindings() {
        let mut controller = ScenarioController::new(ScenarioKind::ElectricCircuits).unwrap();
        assert_eq!(controller.handle_key(Key::Space), KeyOutcome::TogglePause);
        assert!(controller.is_paused());
        assert_eq!(controller.handle_key(Key::Char('R')), KeyOutcome::Reset);
        assert!(!controller.is_paused());
    }
}

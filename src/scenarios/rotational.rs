use std::f64::consts::TAU;

use crate::core::params::{ParamSpec, ResetPolicy};
use crate::core::{HistorySample, SimulationState};
use crate::forces::RotationalDrive;
use crate::integration::{Integrator, PhaseState, SemiImplicitEuler, Step, VelocityFilter};
use crate::scenarios::{unknown_parameter, Resolution, Scenario, ScenarioKind, StepContext};
use crate::Result;

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("torque", 0.0, 50.0, ResetPolicy::Live),
    ParamSpec::positive("moment_of_inertia", 20.0, ResetPolicy::Reset),
    ParamSpec::new("friction", 0.0, 10.0, ResetPolicy::Live),
];

/// Disk spun up by a torque against viscous friction.
///
/// Friction can slow the disk down but never spin it backwards.
#[derive(Debug, Clone)]
pub struct RotationalScenario {
    torque: f64,
    moment_of_inertia: f64,
    friction: f64,
    phase: PhaseState,
    angular_acceleration: f64,
}

impl RotationalScenario {
    pub fn new() -> Self {
        Self {
            torque: 10.0,
            moment_of_inertia: 5.0,
            friction: 1.0,
            phase: PhaseState::default(),
            angular_acceleration: 0.0,
        }
    }

    fn law(&self) -> RotationalDrive {
        RotationalDrive {
            torque: self.torque,
            friction: self.friction,
            inertia: self.moment_of_inertia,
        }
    }
}

impl Default for RotationalScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for RotationalScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::RotationalKinematics
    }

    fn parameter_specs(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn parameter(&self, key: &str) -> Option<f64> {
        match key {
            "torque" => Some(self.torque),
            "moment_of_inertia" => Some(self.moment_of_inertia),
            "friction" => Some(self.friction),
            _ => None,
        }
    }

    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        match key {
            "torque" => self.torque = value,
            "moment_of_inertia" => self.moment_of_inertia = value,
            "friction" => self.friction = value,
            _ => return Err(unknown_parameter(self.kind(), key)),
        }
        Ok(())
    }

    fn integrate(&mut self, ctx: &mut StepContext<'_>) {
        let step = Step::new(ctx.dt).filtered(VelocityFilter::ClampNonNegative);
        let law = self.law();
        self.angular_acceleration = SemiImplicitEuler.integrate(&mut self.phase, &law, &step);
    }

    fn resolve(&mut self, _ctx: &mut StepContext<'_>) -> Resolution {
        if self.phase.position > TAU {
            self.phase.position -= TAU;
        }
        Resolution::Continue
    }

    fn sample(&self, time: f64) -> Option<HistorySample> {
        Some(HistorySample::Rotation {
            t: time,
            angle: self.phase.position,
            angular_velocity: self.phase.velocity,
            angular_acceleration: self.angular_acceleration,
        })
    }

    fn reset(&mut self) {
        self.phase = PhaseState::default();
        self.angular_acceleration = 0.0;
    }

    fn state(&self) -> SimulationState {
        let omega = self.phase.velocity;
        SimulationState::new()
            .with("angle", self.phase.position)
            .with("angular_velocity", omega)
            .with("angular_acceleration", self.angular_acceleration)
            .with("net_torque", self.law().net_torque(omega))
            .with("rotational_energy", 0.5 * self.moment_of_inertia * omega * omega)
            .with("angular_momentum", self.moment_of_inertia * omega)
    }
}

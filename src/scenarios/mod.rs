//! One simulation per demo, all driven by the same [`ScenarioController`].
//!
//! A scenario owns its typed parameters and state. The controller calls
//! [`Scenario::integrate`], then [`Scenario::resolve`], then collects the
//! optional history sample and trail point, once per fixed step.
//!
//! [`ScenarioController`]: crate::core::ScenarioController

mod pendulum;
mod harmonic_motion;
mod newtons_second_law;
mod rotational;
mod friction;
mod collisions;
mod momentum;
mod work_energy;
mod atwood;
mod free_fall;
mod projectile;
mod energy_conservation;
mod power;
mod circular;
mod circuits;
mod waves;
mod center_of_mass;

pub use self::pendulum::PendulumScenario;
pub use self::harmonic_motion::HarmonicMotionScenario;
pub use self::newtons_second_law::NewtonsSecondLawScenario;
pub use self::rotational::RotationalScenario;
pub use self::friction::FrictionScenario;
pub use self::collisions::CollisionsScenario;
pub use self::momentum::MomentumScenario;
pub use self::work_energy::WorkEnergyScenario;
pub use self::atwood::AtwoodScenario;
pub use self::free_fall::FreeFallScenario;
pub use self::projectile::ProjectileScenario;
pub use self::energy_conservation::EnergyConservationScenario;
pub use self::power::PowerScenario;
pub use self::circular::CircularMotionScenario;
pub use self::circuits::{CircuitScenario, CircuitTopology};
pub use self::waves::{WaveMotionScenario, SoundWavesScenario, musical_note};
pub use self::center_of_mass::CenterOfMassScenario;

use crate::core::events::EventQueue;
use crate::core::input::{InputOutcome, Key, KeyOutcome};
use crate::core::params::ParamSpec;
use crate::core::{HistorySample, SimulationConfig, SimulationState, TrailPoint};
use crate::error::ConfigurationError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Per-tick context handed to a scenario
#[derive(Debug)]
pub struct StepContext<'a> {
    /// Simulated time at the start of the step
    pub time: f64,

    /// Fixed step size
    pub dt: f64,

    /// Sink for the discrete events of this step
    pub events: &'a mut EventQueue,
}

/// What the controller should do after boundary resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Continue,

    /// The scenario wrapped around: drop history and trail, restart the clock
    /// and skip sampling for this step
    Restart,
}

/// A single physics demonstration
pub trait Scenario: Send + std::fmt::Debug {
    /// Which demo this is
    fn kind(&self) -> ScenarioKind;

    /// Parameter table: accepted keys, ranges and reset policies
    fn parameter_specs(&self) -> &'static [ParamSpec];

    /// Current value of a parameter, `None` for unknown keys
    fn parameter(&self, key: &str) -> Option<f64>;

    /// Stores an already validated parameter value
    fn apply_parameter(&mut self, key: &str, value: f64) -> Result<()>;

    /// False while the scenario is waiting for input (not launched, already
    /// collided, not sliding); the controller then skips the tick
    fn is_running(&self) -> bool {
        true
    }

    /// Advances the state by one step under the governing law
    fn integrate(&mut self, ctx: &mut StepContext<'_>);

    /// Applies walls, collisions and phase transitions after integration
    fn resolve(&mut self, _ctx: &mut StepContext<'_>) -> Resolution {
        Resolution::Continue
    }

    /// Derived quantities to append to the history, taken at `time`
    fn sample(&self, _time: f64) -> Option<HistorySample> {
        None
    }

    /// Position to append to the trail
    fn trail_point(&self) -> Option<TrailPoint> {
        None
    }

    /// Paths the scenario keeps itself, one per body or flight
    fn trails(&self) -> Vec<Vec<TrailPoint>> {
        Vec::new()
    }

    /// Restores the initial state for the current parameters
    fn reset(&mut self);

    /// Snapshot of the state; the controller fills in the time
    fn state(&self) -> SimulationState;

    fn pointer_down(&mut self, _x: f64, _y: f64) -> InputOutcome {
        InputOutcome::Ignored
    }

    fn pointer_drag(&mut self, _x: f64, _y: f64) -> InputOutcome {
        InputOutcome::Ignored
    }

    fn pointer_up(&mut self) -> InputOutcome {
        InputOutcome::Ignored
    }

    /// Scenario-specific keys; the controller applies the shared defaults to
    /// anything returned as [`KeyOutcome::Unhandled`]
    fn handle_key(&mut self, _key: Key) -> KeyOutcome {
        KeyOutcome::Unhandled
    }
}

/// Error for a key missing from a scenario's parameter table
pub(crate) fn unknown_parameter(kind: ScenarioKind, key: &str) -> crate::error::SimulationError {
    ConfigurationError::UnknownParameter { scenario: kind.name(), key: key.to_string() }.into()
}

/// Every demo in the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ScenarioKind {
    Pendulum,
    HarmonicMotion,
    NewtonsSecondLaw,
    RotationalKinematics,
    Friction,
    Collisions,
    Momentum,
    WorkEnergy,
    AtwoodMachine,
    FreeFall,
    ProjectileMotion,
    EnergyConservation,
    Power,
    CircularMotion,
    ElectricCircuits,
    WaveMotion,
    SoundWaves,
    CenterOfMass,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 18] = [
        ScenarioKind::Pendulum,
        ScenarioKind::HarmonicMotion,
        ScenarioKind::NewtonsSecondLaw,
        ScenarioKind::RotationalKinematics,
        ScenarioKind::Friction,
        ScenarioKind::Collisions,
        ScenarioKind::Momentum,
        ScenarioKind::WorkEnergy,
        ScenarioKind::AtwoodMachine,
        ScenarioKind::FreeFall,
        ScenarioKind::ProjectileMotion,
        ScenarioKind::EnergyConservation,
        ScenarioKind::Power,
        ScenarioKind::CircularMotion,
        ScenarioKind::ElectricCircuits,
        ScenarioKind::WaveMotion,
        ScenarioKind::SoundWaves,
        ScenarioKind::CenterOfMass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Pendulum => "pendulum",
            ScenarioKind::HarmonicMotion => "harmonic_motion",
            ScenarioKind::NewtonsSecondLaw => "newtons_second_law",
            ScenarioKind::RotationalKinematics => "rotational_kinematics",
            ScenarioKind::Friction => "friction",
            ScenarioKind::Collisions => "collisions",
            ScenarioKind::Momentum => "momentum",
            ScenarioKind::WorkEnergy => "work_energy",
            ScenarioKind::AtwoodMachine => "atwood_machine",
            ScenarioKind::FreeFall => "free_fall",
            ScenarioKind::ProjectileMotion => "projectile_motion",
            ScenarioKind::EnergyConservation => "energy_conservation",
            ScenarioKind::Power => "power",
            ScenarioKind::CircularMotion => "circular_motion",
            ScenarioKind::ElectricCircuits => "electric_circuits",
            ScenarioKind::WaveMotion => "wave_motion",
            ScenarioKind::SoundWaves => "sound_waves",
            ScenarioKind::CenterOfMass => "center_of_mass",
        }
    }

    /// Configuration with the buffer capacities this demo uses
    pub fn default_config(&self) -> SimulationConfig {
        let config = SimulationConfig::default();
        match self {
            ScenarioKind::Pendulum => config.with_capacities(300, 150),
            ScenarioKind::HarmonicMotion => config.with_capacities(300, 200),
            ScenarioKind::RotationalKinematics | ScenarioKind::Power => config.with_capacities(200, 150),
            ScenarioKind::EnergyConservation => config.with_capacities(300, 150),
            ScenarioKind::CircularMotion => config.with_capacities(300, 300),
            _ => config,
        }
    }

    /// Builds the scenario in its initial state
    pub fn create(&self, config: &SimulationConfig) -> Result<Box<dyn Scenario>> {
        Ok(match self {
            ScenarioKind::Pendulum => Box::new(PendulumScenario::new()),
            ScenarioKind::HarmonicMotion => Box::new(HarmonicMotionScenario::new()),
            ScenarioKind::NewtonsSecondLaw => Box::new(NewtonsSecondLawScenario::new()),
            ScenarioKind::RotationalKinematics => Box::new(RotationalScenario::new()),
            ScenarioKind::Friction => Box::new(FrictionScenario::new()),
            ScenarioKind::Collisions => Box::new(CollisionsScenario::new(config)?),
            ScenarioKind::Momentum => Box::new(MomentumScenario::new()),
            ScenarioKind::WorkEnergy => Box::new(WorkEnergyScenario::new()),
            ScenarioKind::AtwoodMachine => Box::new(AtwoodScenario::new()),
            ScenarioKind::FreeFall => Box::new(FreeFallScenario::new()),
            ScenarioKind::ProjectileMotion => Box::new(ProjectileScenario::new(config)?),
            ScenarioKind::EnergyConservation => Box::new(EnergyConservationScenario::new()),
            ScenarioKind::Power => Box::new(PowerScenario::new()),
            ScenarioKind::CircularMotion => Box::new(CircularMotionScenario::new()),
            ScenarioKind::ElectricCircuits => Box::new(CircuitScenario::new()),
            ScenarioKind::WaveMotion => Box::new(WaveMotionScenario::new()),
            ScenarioKind::SoundWaves => Box::new(SoundWavesScenario::new()),
            ScenarioKind::CenterOfMass => Box::new(CenterOfMassScenario::new(config)),
        })
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_builds_with_its_own_name() {
        for kind in ScenarioKind::ALL {
            let config = kind.default_config();
            let scenario = kind.create(&config).unwrap();
            assert_eq!(scenario.kind(), kind);
            assert!(scenario.state().is_finite(), "{kind} starts non-finite");
        }
    }

    #[test]
    fn every_parameter_reads_back_within_range() {
        for kind in ScenarioKind::ALL {
            let scenario = kind.create(&kind.default_config()).unwrap();
            for spec in scenario.parameter_specs() {
                let value = scenario.parameter(spec.key).unwrap();
                assert!(spec.validate(value).is_ok(), "{kind}.{} = {value}", spec.key);
            }
        }
    }
}

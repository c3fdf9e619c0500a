pub mod config;
pub mod controller;
pub mod events;
pub mod history;
pub mod input;
pub mod params;
pub mod state;

pub use self::config::SimulationConfig;
pub use self::controller::ScenarioController;
pub use self::events::{EventQueue, SimulationEvent, SimulationEventType};
pub use self::history::{HistoryBuffer, HistorySample, TrailPoint};
pub use self::params::{ParamSpec, ResetPolicy};
pub use self::state::{ScenarioFlags, SimulationState};

pub mod math;
pub mod core;
pub mod bodies;
pub mod collision;
pub mod forces;
pub mod integration;
pub mod scenarios;

/// Re-export common types for easier usage
pub use crate::core::{ScenarioController, SimulationConfig, SimulationState, HistorySample, TrailPoint};
pub use crate::core::input::{Key, KeyOutcome, InputOutcome};
pub use crate::bodies::{Body, BodyColor};
pub use crate::scenarios::{Scenario, ScenarioKind};
pub use crate::math::Vector2;

/// Error types for the simulation core
pub mod error {
    use thiserror::Error;

    /// A rejected configuration or parameter change. The simulation keeps its prior state.
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum ConfigurationError {
        #[error("Unknown parameter '{key}' for scenario {scenario}")]
        UnknownParameter { scenario: &'static str, key: String },

        #[error("Parameter '{key}' = {value} is outside [{min}, {max}]")]
        OutOfRange { key: &'static str, value: f64, min: f64, max: f64 },

        #[error("History capacity must be at least 1")]
        InvalidCapacity,

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),
    }

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum SimulationError {
        #[error("Configuration error: {0}")]
        Configuration(#[from] ConfigurationError),

        #[error("Numeric degeneracy: {0}")]
        NumericDegeneracy(String),
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, error::SimulationError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

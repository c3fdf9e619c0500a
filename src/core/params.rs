use crate::error::ConfigurationError;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// What a parameter change does to the running simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ResetPolicy {
    /// Structural parameter: the scenario restarts from its initial state
    Reset,

    /// Applied on the next tick without touching the current state
    Live,
}

/// One row of a scenario's parameter table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Key accepted by `set_parameter`
    pub key: &'static str,

    /// Smallest accepted value (inclusive unless `min_exclusive`)
    pub min: f64,

    /// Largest accepted value (inclusive)
    pub max: f64,

    /// Whether `min` itself is rejected, for quantities that must stay positive
    pub min_exclusive: bool,

    /// What happens to the simulation when this parameter changes
    pub policy: ResetPolicy,
}

impl ParamSpec {
    /// A parameter accepting `[min, max]`
    pub const fn new(key: &'static str, min: f64, max: f64, policy: ResetPolicy) -> Self {
        Self { key, min, max, min_exclusive: false, policy }
    }

    /// A parameter accepting `(0, max]`
    pub const fn positive(key: &'static str, max: f64, policy: ResetPolicy) -> Self {
        Self { key, min: 0.0, max, min_exclusive: true, policy }
    }

    /// Checks a candidate value against this row
    pub fn validate(&self, value: f64) -> Result<(), ConfigurationError> {
        let below = if self.min_exclusive { value <= self.min } else { value < self.min };
        if !value.is_finite() || below || value > self.max {
            return Err(ConfigurationError::OutOfRange {
                key: self.key,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Finds the row for `key`, reporting unknown keys against `scenario`
pub fn lookup(
    specs: &'static [ParamSpec],
    scenario: &'static str,
    key: &str,
) -> Result<&'static ParamSpec, ConfigurationError> {
    specs
        .iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| ConfigurationError::UnknownParameter {
            scenario,
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::positive("mass", 10.0, ResetPolicy::Reset),
        ParamSpec::new("force", -50.0, 50.0, ResetPolicy::Live),
    ];

    #[test]
    fn positive_rejects_zero_and_negative() {
        let mass = lookup(SPECS, "test", "mass").unwrap();
        assert!(mass.validate(0.0).is_err());
        assert!(mass.validate(-1.0).is_err());
        assert!(mass.validate(0.5).is_ok());
        assert!(mass.validate(10.0).is_ok());
        assert!(mass.validate(10.5).is_err());
    }

    #[test]
    fn non_finite_is_rejected() {
        let force = lookup(SPECS, "test", "force").unwrap();
        assert!(force.validate(f64::NAN).is_err());
        assert!(force.validate(f64::INFINITY).is_err());
        assert!(force.validate(-50.0).is_ok());
    }

    #[test]
    fn unknown_key_is_reported() {
        let err = lookup(SPECS, "test", "spin").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownParameter { scenario: "test", key: "spin".into() }
        );
    }
}

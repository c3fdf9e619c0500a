use std::collections::BTreeMap;
use bitflags::bitflags;
use crate::bodies::Body;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

bitflags! {
    /// One-shot flags cleared by a scenario reset
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
    pub struct ScenarioFlags: u32 {
        /// The one-time collision of the momentum demo has happened
        const COLLIDED = 0x01;

        /// A projectile is in flight
        const LAUNCHED = 0x02;

        /// The sliding box reached the end of the ramp
        const STOPPED  = 0x04;

        /// The object is sliding (friction and ramp demos)
        const MOVING   = 0x08;
    }
}

/// Read-only snapshot of a scenario handed to the rendering collaborator
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationState {
    /// Simulated seconds since the last reset
    pub time: f64,

    /// Named scalar fields (position, velocity, angle, ...)
    pub fields: BTreeMap<String, f64>,

    /// Bodies in draw order, for multi-object scenarios
    pub bodies: Vec<Body>,

    /// Scalar per-particle values (loop progress of circuit electrons)
    pub particles: Vec<f64>,

    /// One-shot flags currently raised
    pub flags: ScenarioFlags,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_bodies(mut self, bodies: &[Body]) -> Self {
        self.bodies = bodies.to_vec();
        self
    }

    pub fn with_particles(mut self, particles: Vec<f64>) -> Self {
        self.particles = particles;
        self
    }

    pub fn with_flags(mut self, flags: ScenarioFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn set(&mut self, key: &str, value: f64) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.fields.get(key).copied()
    }

    /// Names of every field or body component that is NaN or infinite
    pub fn non_finite_fields(&self) -> Vec<String> {
        let mut bad: Vec<String> = self
            .fields
            .iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(key, _)| key.clone())
            .collect();
        for (index, body) in self.bodies.iter().enumerate() {
            if !body.is_finite() {
                bad.push(format!("bodies[{index}]"));
            }
        }
        if self.particles.iter().any(|p| !p.is_finite()) {
            bad.push("particles".to_string());
        }
        bad
    }

    /// True when every field and body component is finite
    pub fn is_finite(&self) -> bool {
        self.non_finite_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_non_finite_fields() {
        let state = SimulationState::new()
            .with("angle", 0.5)
            .with("velocity", f64::NAN);
        assert!(!state.is_finite());
        assert_eq!(state.non_finite_fields(), vec!["velocity".to_string()]);
    }

    #[test]
    fn flags_default_to_empty() {
        assert!(SimulationState::new().flags.is_empty());
    }
}

use crate::math::safe_div;

/// A closed-form acceleration law evaluated from the current state.
///
/// `position` and `velocity` are in whatever units the owning scenario keeps
/// its state in; the law returns the acceleration in matching units.
pub trait ForceLaw: std::fmt::Debug {
    fn acceleration(&self, position: f64, velocity: f64) -> f64;
}

/// Constant net force on a mass, `a = F / m`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantForce {
    pub force: f64,
    pub mass: f64,

    /// Converts the result from m/s^2 into the scenario's velocity units
    pub scale: f64,
}

impl ConstantForce {
    pub fn new(force: f64, mass: f64) -> Self {
        Self { force, mass, scale: 1.0 }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl ForceLaw for ConstantForce {
    fn acceleration(&self, _position: f64, _velocity: f64) -> f64 {
        safe_div(self.force, self.mass) * self.scale
    }
}

/// No acceleration: the velocity is held constant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uniform;

impl ForceLaw for Uniform {
    fn acceleration(&self, _position: f64, _velocity: f64) -> f64 {
        0.0
    }
}

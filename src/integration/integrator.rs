use crate::forces::ForceLaw;

/// One degree of freedom: a position (or angle) and its rate of change
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseState {
    pub position: f64,
    pub velocity: f64,
}

impl PhaseState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    pub fn at_rest(position: f64) -> Self {
        Self { position, velocity: 0.0 }
    }
}

/// Post-processing applied to the freshly integrated velocity, before the
/// position update reads it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VelocityFilter {
    #[default]
    None,

    /// Multiplicative damping, `v *= factor`
    Scale(f64),

    /// `v = max(v, 0)`: resistance may slow the motion but never reverse it
    ClampNonNegative,
}

impl VelocityFilter {
    #[inline]
    pub fn apply(&self, velocity: f64) -> f64 {
        match *self {
            VelocityFilter::None => velocity,
            VelocityFilter::Scale(factor) => velocity * factor,
            VelocityFilter::ClampNonNegative => velocity.max(0.0),
        }
    }
}

/// Step size and unit handling for one integration call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Time step
    pub dt: f64,

    /// Factor from velocity units to position units (pixels per meter for
    /// scenarios that keep velocity in m/s but position on the canvas)
    pub position_scale: f64,

    pub filter: VelocityFilter,
}

impl Step {
    pub fn new(dt: f64) -> Self {
        Self { dt, position_scale: 1.0, filter: VelocityFilter::None }
    }

    pub fn scaled(mut self, position_scale: f64) -> Self {
        self.position_scale = position_scale;
        self
    }

    pub fn filtered(mut self, filter: VelocityFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Trait for numerical integration schemes
pub trait Integrator: Send + Sync {
    /// Advances `state` by one step under `law`, returning the acceleration
    /// that was applied
    fn integrate(&self, state: &mut PhaseState, law: &dyn ForceLaw, step: &Step) -> f64;

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}

use crate::forces::ForceLaw;
use crate::integration::{Integrator, PhaseState, Step};

/// Simple forward Euler integrator.
///
/// Position advances with the velocity from the *start* of the step. None of
/// the scenarios use it; it exists to compare drift against
/// [`SemiImplicitEuler`](crate::integration::SemiImplicitEuler).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl ExplicitEuler {
    /// Creates a new explicit Euler integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for ExplicitEuler {
    fn integrate(&self, state: &mut PhaseState, law: &dyn ForceLaw, step: &Step) -> f64 {
        let acceleration = law.acceleration(state.position, state.velocity);
        let velocity = state.velocity;

        state.position += velocity * step.dt * step.position_scale;
        state.velocity = step.filter.apply(velocity + acceleration * step.dt);

        acceleration
    }

    fn name(&self) -> &str {
        "Euler"
    }
}

use crate::forces::ForceLaw;
use crate::integration::{Integrator, PhaseState, Step};
use crate::math::Vector2;

/// Semi-implicit (symplectic) Euler integrator.
///
/// The velocity is updated from the acceleration first and the position then
/// advances with the *new* velocity. Every scenario steps with this scheme at
/// a fixed 1/60 s; the ordering determines the numerical energy drift of the
/// oscillators, so trajectories depend on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Creates a new semi-implicit Euler integrator
    pub fn new() -> Self {
        Self
    }

    /// Advances a 2-D point under a constant acceleration
    pub fn integrate_vector(
        &self,
        position: &mut Vector2,
        velocity: &mut Vector2,
        acceleration: Vector2,
        dt: f64,
    ) {
        *velocity += acceleration * dt;
        *position += *velocity * dt;
    }
}

impl Integrator for SemiImplicitEuler {
    fn integrate(&self, state: &mut PhaseState, law: &dyn ForceLaw, step: &Step) -> f64 {
        let acceleration = law.acceleration(state.position, state.velocity);

        state.velocity = step.filter.apply(state.velocity + acceleration * step.dt);
        state.position += state.velocity * step.dt * step.position_scale;

        acceleration
    }

    fn name(&self) -> &str {
        "SemiImplicitEuler"
    }
}

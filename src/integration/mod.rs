mod integrator;
mod euler;
mod symplectic_euler;

pub use self::integrator::{Integrator, PhaseState, Step, VelocityFilter};
pub use self::euler::ExplicitEuler;
pub use self::symplectic_euler::SemiImplicitEuler;

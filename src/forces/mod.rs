mod force_law;
mod gravity;
mod spring;
mod drag;

pub use self::force_law::{ForceLaw, ConstantForce, Uniform};
pub use self::gravity::{Pendulum, Incline, Atwood};
pub use self::spring::SpringMass;
pub use self::drag::{QuadraticDrag, RotationalDrive, KineticFriction};

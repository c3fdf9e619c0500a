use crate::forces::ForceLaw;
use crate::math::safe_div;

/// Simple pendulum, `α = -(g/L)·sin θ - c·ω`.
///
/// The linear term `c` is only used by the energy-conservation demo; the plain
/// pendulum damps multiplicatively through a velocity filter instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pendulum {
    pub gravity: f64,
    pub length: f64,
    pub linear_damping: f64,
}

impl Pendulum {
    pub fn new(gravity: f64, length: f64) -> Self {
        Self { gravity, length, linear_damping: 0.0 }
    }

    pub fn with_linear_damping(mut self, damping: f64) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Potential plus kinetic energy of a bob of `mass` at (`angle`, `angular_velocity`)
    pub fn energy(&self, mass: f64, angle: f64, angular_velocity: f64) -> (f64, f64) {
        let height = self.length * (1.0 - angle.cos());
        let potential = mass * self.gravity * height;
        let kinetic = 0.5 * mass * self.length * self.length * angular_velocity * angular_velocity;
        (potential, kinetic)
    }
}

impl ForceLaw for Pendulum {
    fn acceleration(&self, angle: f64, angular_velocity: f64) -> f64 {
        -safe_div(self.gravity, self.length) * angle.sin() - self.linear_damping * angular_velocity
    }
}

/// Block on an incline, `a = g·sin θ - μ·g·cos θ`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incline {
    pub gravity: f64,

    /// Ramp angle in radians
    pub angle: f64,

    pub friction: f64,
}

impl ForceLaw for Incline {
    fn acceleration(&self, _position: f64, _velocity: f64) -> f64 {
        self.gravity * self.angle.sin() - self.friction * self.gravity * self.angle.cos()
    }
}

/// Two masses over an ideal pulley, `a = (m2 - m1)·g / (m1 + m2)`.
///
/// Positive acceleration lowers the second mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atwood {
    pub mass1: f64,
    pub mass2: f64,
    pub gravity: f64,
}

impl Atwood {
    /// Rope tension `2·m1·m2·g / (m1 + m2)`
    pub fn tension(&self) -> f64 {
        safe_div(2.0 * self.mass1 * self.mass2 * self.gravity, self.mass1 + self.mass2)
    }
}

impl ForceLaw for Atwood {
    fn acceleration(&self, _position: f64, _velocity: f64) -> f64 {
        safe_div((self.mass2 - self.mass1) * self.gravity, self.mass1 + self.mass2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pendulum_restores_toward_vertical() {
        let law = Pendulum::new(9.8, 2.0);
        assert!(law.acceleration(0.3, 0.0) < 0.0);
        assert!(law.acceleration(-0.3, 0.0) > 0.0);
        assert_eq!(law.acceleration(0.0, 0.0), 0.0);
    }

    #[test]
    fn incline_friction_reduces_acceleration() {
        let angle = 30f64.to_radians();
        let smooth = Incline { gravity: 9.8, angle, friction: 0.0 };
        let rough = Incline { gravity: 9.8, angle, friction: 0.1 };
        assert_relative_eq!(smooth.acceleration(0.0, 0.0), 4.9, epsilon = 1e-12);
        assert!(rough.acceleration(0.0, 0.0) < smooth.acceleration(0.0, 0.0));
    }

    #[test]
    fn atwood_heavier_first_mass_gives_negative_acceleration() {
        let law = Atwood { mass1: 5.0, mass2: 3.0, gravity: 9.8 };
        assert_relative_eq!(law.acceleration(0.0, 0.0), -2.45, epsilon = 1e-12);
        assert_relative_eq!(law.tension(), 36.75, epsilon = 1e-12);
    }
}

use crate::forces::ForceLaw;
use crate::math::safe_div;

/// Damped spring-mass oscillator, `a = (-k·x - b·v) / m`.
///
/// Position and velocity are in canvas pixels; `pixels_per_meter` converts them
/// to meters for the force and the resulting acceleration back to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringMass {
    pub spring_constant: f64,
    pub damping: f64,
    pub mass: f64,
    pub pixels_per_meter: f64,
}

impl SpringMass {
    pub fn new(spring_constant: f64, damping: f64, mass: f64, pixels_per_meter: f64) -> Self {
        Self { spring_constant, damping, mass, pixels_per_meter }
    }

    /// Spring force in newtons at a displacement given in pixels
    pub fn force(&self, position: f64, velocity: f64) -> f64 {
        let displacement = safe_div(position, self.pixels_per_meter);
        -self.spring_constant * displacement - self.damping * safe_div(velocity, self.pixels_per_meter)
    }

    /// Elastic potential energy `0.5·k·x²` at a displacement given in pixels
    pub fn potential_energy(&self, position: f64) -> f64 {
        let displacement = safe_div(position, self.pixels_per_meter);
        0.5 * self.spring_constant * displacement * displacement
    }

    /// Undamped angular frequency `sqrt(k / m)`
    pub fn angular_frequency(&self) -> f64 {
        safe_div(self.spring_constant, self.mass).sqrt()
    }
}

impl ForceLaw for SpringMass {
    fn acceleration(&self, position: f64, velocity: f64) -> f64 {
        safe_div(self.force(position, velocity), self.mass) * self.pixels_per_meter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn force_opposes_displacement() {
        let spring = SpringMass::new(20.0, 0.0, 2.0, 2.0);
        assert_relative_eq!(spring.force(100.0, 0.0), -1000.0);
        assert_relative_eq!(spring.acceleration(100.0, 0.0), -1000.0);
    }

    #[test]
    fn damping_opposes_velocity() {
        let spring = SpringMass::new(20.0, 0.5, 2.0, 2.0);
        assert!(spring.force(0.0, 10.0) < 0.0);
        assert!(spring.force(0.0, -10.0) > 0.0);
    }
}

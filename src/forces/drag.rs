use crate::forces::ForceLaw;
use crate::math::safe_div;

/// Falling object with quadratic air drag, `a = (m·g - c·v·|v|) / m`.
///
/// Velocity is positive downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticDrag {
    pub gravity: f64,
    pub drag: f64,
    pub mass: f64,
}

impl QuadraticDrag {
    /// Speed at which drag balances weight, infinite without drag
    pub fn terminal_velocity(&self) -> f64 {
        if self.drag <= 0.0 {
            f64::INFINITY
        } else {
            (self.mass * self.gravity / self.drag).sqrt()
        }
    }
}

impl ForceLaw for QuadraticDrag {
    fn acceleration(&self, _position: f64, velocity: f64) -> f64 {
        let weight = self.mass * self.gravity;
        let drag = self.drag * velocity * velocity.abs();
        safe_div(weight - drag, self.mass)
    }
}

/// Disk driven by a torque against viscous friction, `α = (τ - c·ω) / I`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationalDrive {
    pub torque: f64,
    pub friction: f64,
    pub inertia: f64,
}

impl RotationalDrive {
    /// Net torque at the given angular velocity
    pub fn net_torque(&self, angular_velocity: f64) -> f64 {
        self.torque - self.friction * angular_velocity
    }
}

impl ForceLaw for RotationalDrive {
    fn acceleration(&self, _angle: f64, angular_velocity: f64) -> f64 {
        safe_div(self.net_torque(angular_velocity), self.inertia)
    }
}

/// Applied force against kinetic friction that always opposes the motion.
///
/// At zero velocity friction opposes the applied force instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticFriction {
    pub applied_force: f64,
    pub friction_force: f64,
    pub mass: f64,

    /// Converts the result from m/s^2 into the scenario's velocity units
    pub scale: f64,
}

impl ForceLaw for KineticFriction {
    fn acceleration(&self, _position: f64, velocity: f64) -> f64 {
        let direction = if velocity != 0.0 {
            velocity.signum()
        } else {
            self.applied_force.signum()
        };
        let net = self.applied_force - self.friction_force * direction;
        safe_div(net, self.mass) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn drag_balances_weight_at_terminal_velocity() {
        let law = QuadraticDrag { gravity: 9.8, drag: 0.5, mass: 2.0 };
        let terminal = law.terminal_velocity();
        assert_relative_eq!(law.acceleration(0.0, terminal), 0.0, epsilon = 1e-9);
        assert_relative_eq!(law.acceleration(0.0, 0.0), 9.8);
    }

    #[test]
    fn rotational_friction_scales_with_speed() {
        let law = RotationalDrive { torque: 10.0, friction: 1.0, inertia: 5.0 };
        assert_relative_eq!(law.acceleration(0.0, 0.0), 2.0);
        assert_relative_eq!(law.acceleration(0.0, 10.0), 0.0);
    }

    #[test]
    fn kinetic_friction_opposes_motion_direction() {
        let law = KineticFriction { applied_force: 20.0, friction_force: 5.0, mass: 5.0, scale: 1.0 };
        assert_relative_eq!(law.acceleration(0.0, 1.0), 3.0);
        assert_relative_eq!(law.acceleration(0.0, -1.0), 5.0);
    }
}

use crate::bodies::BodyColor;
use crate::math::{self, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A point mass drawn as a disc, used by the multi-object scenarios
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Body {
    /// Centre position in canvas pixels
    pub position: Vector2,

    /// Velocity, in the owning scenario's units
    pub velocity: Vector2,

    /// Mass in kilograms
    pub mass: f64,

    /// Drawn radius, derived from the mass
    pub radius: f64,

    /// Cosmetic color tag
    pub color: BodyColor,

    /// Simulated seconds since the body was spawned
    pub age: f64,

    /// The body has settled and its velocity was snapped to zero
    pub resting: bool,
}

impl Body {
    /// Creates a body whose radius is `sqrt(mass) * radius_scale + radius_offset`
    pub fn new(
        position: Vector2,
        velocity: Vector2,
        mass: f64,
        radius_scale: f64,
        radius_offset: f64,
        color: BodyColor,
    ) -> Self {
        Self {
            position,
            velocity,
            mass,
            radius: math::radius_from_mass(mass, radius_scale, radius_offset),
            color,
            age: 0.0,
            resting: false,
        }
    }

    /// Linear momentum `m * v`
    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }

    /// Kinetic energy `0.5 * m * |v|^2`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// True when the point `p` lies strictly inside the drawn disc
    pub fn contains(&self, p: Vector2) -> bool {
        self.position.distance(&p) < self.radius
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.mass.is_finite()
            && self.radius.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_grows_with_square_root_of_mass() {
        let body = Body::new(Vector2::zero(), Vector2::zero(), 4.0, 15.0, 10.0, BodyColor::Sky);
        assert_eq!(body.radius, 40.0);
    }

    #[test]
    fn momentum_and_energy() {
        let body = Body::new(Vector2::zero(), Vector2::new(3.0, 4.0), 2.0, 15.0, 10.0, BodyColor::Mint);
        assert_eq!(body.momentum(), Vector2::new(6.0, 8.0));
        assert_eq!(body.kinetic_energy(), 25.0);
    }
}

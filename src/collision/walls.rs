use crate::bodies::Body;
use crate::math;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A closed interval `[min, max]` along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies strictly between the bounds
    pub fn contains(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        math::clamp(value, self.min, self.max)
    }

    /// Bounds pulled in by `margin` on both sides, for discs of that radius
    pub fn shrink(&self, margin: f64) -> Self {
        Self::new(self.min + margin, self.max - margin)
    }
}

/// Bounces a coordinate off the bounds.
///
/// Touching or passing either bound clamps the position onto it and sets
/// `v = -restitution * v`. Returns whether a bounce happened.
pub fn bounce_axis(position: &mut f64, velocity: &mut f64, bounds: Bounds, restitution: f64) -> bool {
    if *position <= bounds.min || *position >= bounds.max {
        *velocity *= -restitution;
        *position = bounds.clamp(*position);
        true
    } else {
        false
    }
}

/// Clamps every coordinate into the bounds and stops the shared velocity if
/// any of them was out. The velocity snaps to exactly zero.
pub fn stop_at_bounds(positions: &mut [&mut f64], velocity: &mut f64, bounds: Bounds) -> bool {
    let outside = positions.iter().any(|p| **p <= bounds.min || **p >= bounds.max);
    if outside {
        for p in positions.iter_mut() {
            **p = bounds.clamp(**p);
        }
        *velocity = 0.0;
    }
    outside
}

/// Rectangular container for discs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Walls {
    pub x: Bounds,
    pub y: Bounds,
}

impl Walls {
    pub fn new(x: Bounds, y: Bounds) -> Self {
        Self { x, y }
    }

    /// Bounces the body's rim off each axis independently
    pub fn bounce(&self, body: &mut Body, restitution: f64) -> bool {
        let x_bounds = self.x.shrink(body.radius);
        let y_bounds = self.y.shrink(body.radius);
        let hit_x = bounce_axis(&mut body.position.x, &mut body.velocity.x, x_bounds, restitution);
        let hit_y = bounce_axis(&mut body.position.y, &mut body.velocity.y, y_bounds, restitution);
        hit_x || hit_y
    }

    /// Moves the body back inside without touching its velocity
    pub fn confine(&self, body: &mut Body) {
        body.position.x = self.x.shrink(body.radius).clamp(body.position.x);
        body.position.y = self.y.shrink(body.radius).clamp(body.position.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyColor;
    use crate::math::Vector2;

    #[test]
    fn bounce_reverses_and_scales_velocity() {
        let bounds = Bounds::new(100.0, 900.0);
        let mut position = 903.5;
        let mut velocity = 120.0;
        assert!(bounce_axis(&mut position, &mut velocity, bounds, 0.8));
        assert_eq!(position, 900.0);
        assert_eq!(velocity, -96.0);
    }

    #[test]
    fn inside_bounds_nothing_changes() {
        let bounds = Bounds::new(100.0, 900.0);
        let mut position = 500.0;
        let mut velocity = 120.0;
        assert!(!bounce_axis(&mut position, &mut velocity, bounds, 0.8));
        assert_eq!((position, velocity), (500.0, 120.0));
    }

    #[test]
    fn walls_bounce_each_axis_independently() {
        let walls = Walls::new(Bounds::new(50.0, 950.0), Bounds::new(50.0, 550.0));
        let mut body = Body::new(
            Vector2::new(500.0, 545.0),
            Vector2::new(3.0, 4.0),
            1.0,
            15.0,
            10.0,
            BodyColor::Sky,
        );
        assert!(walls.bounce(&mut body, 0.5));
        assert_eq!(body.velocity, Vector2::new(3.0, -2.0));
        assert_eq!(body.position.y, 550.0 - body.radius);
    }

    #[test]
    fn stop_at_bounds_snaps_velocity_to_zero() {
        let bounds = Bounds::new(110.0, 550.0);
        let mut a = 560.0;
        let mut b = 200.0;
        let mut v = 3.2;
        assert!(stop_at_bounds(&mut [&mut a, &mut b], &mut v, bounds));
        assert_eq!((a, b, v), (550.0, 200.0, 0.0));
    }
}

use crate::bodies::Body;
use crate::core::ScenarioFlags;
use crate::math::safe_div;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Outcome model of the one-shot head-on collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CollisionModel {
    #[default]
    Elastic,

    /// Perfectly inelastic: the bodies stick and share one velocity
    Inelastic,
}

/// Final velocities of a 1-D elastic collision
pub fn elastic_1d(m1: f64, v1: f64, m2: f64, v2: f64) -> (f64, f64) {
    let total = m1 + m2;
    let u1 = safe_div((m1 - m2) * v1 + 2.0 * m2 * v2, total);
    let u2 = safe_div((m2 - m1) * v2 + 2.0 * m1 * v1, total);
    (u1, u2)
}

/// Common velocity after a perfectly inelastic collision
pub fn inelastic_1d(m1: f64, v1: f64, m2: f64, v2: f64) -> f64 {
    safe_div(m1 * v1 + m2 * v2, m1 + m2)
}

/// Resolves the first contact between `a` (left) and `b` (right) along x.
///
/// Fires at most once: `COLLIDED` is raised on contact and checked on entry.
pub fn resolve_head_on(a: &mut Body, b: &mut Body, model: CollisionModel, flags: &mut ScenarioFlags) -> bool {
    if flags.contains(ScenarioFlags::COLLIDED) {
        return false;
    }
    if a.position.x + a.radius < b.position.x - b.radius {
        return false;
    }

    let (v1, v2) = (a.velocity.x, b.velocity.x);
    match model {
        CollisionModel::Elastic => {
            let (u1, u2) = elastic_1d(a.mass, v1, b.mass, v2);
            a.velocity.x = u1;
            b.velocity.x = u2;
        }
        CollisionModel::Inelastic => {
            let shared = inelastic_1d(a.mass, v1, b.mass, v2);
            a.velocity.x = shared;
            b.velocity.x = shared;
        }
    }

    flags.insert(ScenarioFlags::COLLIDED);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyColor;
    use crate::math::Vector2;
    use approx::assert_relative_eq;

    fn cart(x: f64, v: f64, mass: f64) -> Body {
        Body::new(Vector2::new(x, 300.0), Vector2::new(v, 0.0), mass, 7.5, 10.0, BodyColor::Coral)
    }

    #[test]
    fn elastic_conserves_momentum_and_energy() {
        let (u1, u2) = elastic_1d(2.0, 5.0, 3.0, 0.0);
        assert_relative_eq!(u1, -1.0, epsilon = 1e-12);
        assert_relative_eq!(u2, 4.0, epsilon = 1e-12);
        assert_relative_eq!(2.0 * u1 + 3.0 * u2, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn inelastic_bodies_share_velocity() {
        let mut a = cart(100.0, 5.0, 2.0);
        let mut b = cart(110.0, 0.0, 3.0);
        let mut flags = ScenarioFlags::empty();
        assert!(resolve_head_on(&mut a, &mut b, CollisionModel::Inelastic, &mut flags));
        assert_eq!(a.velocity.x, b.velocity.x);
        assert_relative_eq!(a.velocity.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn collision_fires_only_once() {
        let mut a = cart(100.0, 5.0, 2.0);
        let mut b = cart(110.0, 0.0, 3.0);
        let mut flags = ScenarioFlags::empty();
        assert!(resolve_head_on(&mut a, &mut b, CollisionModel::Elastic, &mut flags));
        let after = (a.velocity, b.velocity);
        assert!(!resolve_head_on(&mut a, &mut b, CollisionModel::Elastic, &mut flags));
        assert_eq!((a.velocity, b.velocity), after);
    }

    #[test]
    fn apart_bodies_are_left_alone() {
        let mut a = cart(100.0, 5.0, 2.0);
        let mut b = cart(600.0, 0.0, 3.0);
        let mut flags = ScenarioFlags::empty();
        assert!(!resolve_head_on(&mut a, &mut b, CollisionModel::Elastic, &mut flags));
        assert!(flags.is_empty());
    }
}

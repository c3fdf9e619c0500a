use crate::bodies::Body;
use crate::collision::elastic_1d;
use crate::math::{Vector2, EPSILON};

/// Overlap between two discs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body towards the second
    pub normal: Vector2,

    /// Centre distance
    pub distance: f64,

    /// Penetration depth, `ra + rb - distance`
    pub overlap: f64,
}

/// Tests two discs for overlap.
///
/// Coincident centres get the fixed normal `(1, 0)` with the whole radius sum
/// as overlap, so the pair is still pushed apart.
pub fn detect_contact(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.position - a.position;
    let distance = delta.length();
    let radii = a.radius + b.radius;

    if distance >= radii {
        return None;
    }

    if distance < EPSILON {
        return Some(Contact { normal: Vector2::new(1.0, 0.0), distance: 0.0, overlap: radii });
    }

    Some(Contact { normal: delta / distance, distance, overlap: radii - distance })
}

/// Separates an overlapping pair and exchanges momentum along the contact normal.
///
/// Velocities are rotated into the normal/tangent basis, the normal components
/// go through the 1-D elastic formula and the tangential ones are kept. Both
/// results are then scaled by `damping`; with `damping = 1` momentum and
/// kinetic energy are conserved.
pub fn resolve_elastic_pair(a: &mut Body, b: &mut Body, contact: &Contact, damping: f64) {
    let push = contact.normal * (contact.overlap * 0.5);
    a.position -= push;
    b.position += push;

    let angle = contact.normal.angle();
    let va = a.velocity.to_basis(angle);
    let vb = b.velocity.to_basis(angle);

    let (na, nb) = elastic_1d(a.mass, va.x, b.mass, vb.x);

    a.velocity = Vector2::new(na, va.y).from_basis(angle) * damping;
    b.velocity = Vector2::new(nb, vb.y).from_basis(angle) * damping;
}

/// Resolves every overlapping unordered pair once, in index order.
///
/// Returns the index pairs that collided.
pub fn resolve_pairs(bodies: &mut [Body], damping: f64) -> Vec<(usize, usize)> {
    let mut collided = Vec::new();

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for (offset, b) in tail.iter_mut().enumerate() {
            if let Some(contact) = detect_contact(a, b) {
                resolve_elastic_pair(a, b, &contact, damping);
                collided.push((i, i + 1 + offset));
            }
        }
    }

    collided
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyColor;
    use approx::assert_relative_eq;

    fn ball(x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Body {
        Body::new(Vector2::new(x, y), Vector2::new(vx, vy), mass, 15.0, 10.0, BodyColor::Sky)
    }

    #[test]
    fn separated_discs_do_not_touch() {
        let a = ball(0.0, 0.0, 0.0, 0.0, 1.0);
        let b = ball(100.0, 0.0, 0.0, 0.0, 1.0);
        assert!(detect_contact(&a, &b).is_none());
    }

    #[test]
    fn equal_masses_swap_normal_velocity() {
        let mut a = ball(0.0, 0.0, 2.0, 1.0, 1.0);
        let mut b = ball(40.0, 0.0, -1.0, 0.0, 1.0);
        let contact = detect_contact(&a, &b).unwrap();
        resolve_elastic_pair(&mut a, &mut b, &contact, 1.0);

        assert_relative_eq!(a.velocity.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(a.velocity.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn overlap_is_split_evenly() {
        let mut a = ball(0.0, 0.0, 0.0, 0.0, 1.0);
        let mut b = ball(40.0, 0.0, 0.0, 0.0, 1.0);
        let contact = detect_contact(&a, &b).unwrap();
        resolve_elastic_pair(&mut a, &mut b, &contact, 1.0);
        assert_relative_eq!(a.position.distance(&b.position), a.radius + b.radius, epsilon = 1e-9);
        assert_relative_eq!(a.position.x, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn coincident_centres_use_fixed_normal() {
        let a = ball(300.0, 300.0, 0.0, 0.0, 1.0);
        let b = ball(300.0, 300.0, 0.0, 0.0, 1.0);
        let contact = detect_contact(&a, &b).unwrap();
        assert_eq!(contact.normal, Vector2::new(1.0, 0.0));
        assert_eq!(contact.overlap, a.radius + b.radius);
    }

    #[test]
    fn oblique_collision_conserves_momentum() {
        let mut bodies = vec![ball(100.0, 100.0, 3.0, 1.0, 1.5), ball(140.0, 120.0, -2.0, 0.5, 0.8)];
        let before = bodies[0].momentum() + bodies[1].momentum();
        let energy = bodies[0].kinetic_energy() + bodies[1].kinetic_energy();

        assert_eq!(resolve_pairs(&mut bodies, 1.0), vec![(0, 1)]);

        let after = bodies[0].momentum() + bodies[1].momentum();
        assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
        assert_relative_eq!(
            energy,
            bodies[0].kinetic_energy() + bodies[1].kinetic_energy(),
            epsilon = 1e-9
        );
    }
}

use phys_demos::math::{self, Vector2};
use phys_demos::forces::{ForceLaw, SpringMass};
use phys_demos::integration::{ExplicitEuler, Integrator, PhaseState, SemiImplicitEuler, Step};
use std::f64::consts::{FRAC_PI_2, PI};
use approx::assert_relative_eq;

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, 6.0);

    assert_eq!(v1 + v2, Vector2::new(5.0, 8.0));
    assert_eq!(v2 - v1, Vector2::new(3.0, 4.0));
    assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(v1.dot(&v2), 16.0);
    assert_eq!((v2 - v1).length(), 5.0);
    assert_eq!(v1.distance(&v2), 5.0);
}

#[test]
fn test_basis_rotation_round_trip() {
    let v = Vector2::new(3.0, -1.5);
    let angle = 0.7;
    assert_relative_eq!(v.to_basis(angle).from_basis(angle), v, epsilon = 1e-12);

    // rotating into the basis of a vertical normal puts its y part on x
    let rotated = Vector2::new(0.0, 2.0).to_basis(FRAC_PI_2);
    assert_relative_eq!(rotated.x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_math_helpers() {
    assert_eq!(math::clamp(12.0, 0.0, 10.0), 10.0);
    assert_relative_eq!(math::to_radians(180.0), PI);
    assert_relative_eq!(math::to_degrees(PI / 4.0), 45.0);
    assert_relative_eq!(math::radius_from_mass(4.0, 15.0, 10.0), 40.0);
    assert!(math::safe_div(1.0, 0.0).is_finite());
}

fn spring_energy(law: &SpringMass, state: &PhaseState) -> f64 {
    law.potential_energy(state.position) + 0.5 * law.mass * state.velocity * state.velocity
}

#[test]
fn test_semi_implicit_euler_keeps_spring_energy_bounded() {
    let law = SpringMass::new(20.0, 0.0, 2.0, 1.0);
    let step = Step::new(1.0 / 60.0);
    let mut state = PhaseState::at_rest(1.0);
    let initial = spring_energy(&law, &state);

    for _ in 0..600 {
        SemiImplicitEuler.integrate(&mut state, &law, &step);
        let drift = (spring_energy(&law, &state) - initial).abs() / initial;
        assert!(drift < 0.05, "energy drifted by {drift}");
    }
}

#[test]
fn test_explicit_euler_gains_spring_energy() {
    let law = SpringMass::new(20.0, 0.0, 2.0, 1.0);
    let step = Step::new(1.0 / 60.0);
    let mut state = PhaseState::at_rest(1.0);
    let initial = spring_energy(&law, &state);

    for _ in 0..600 {
        ExplicitEuler.integrate(&mut state, &law, &step);
    }
    assert!(spring_energy(&law, &state) > 4.0 * initial);
}

#[test]
fn test_integrator_returns_acceleration_used() {
    let law = SpringMass::new(20.0, 0.0, 2.0, 1.0);
    let mut state = PhaseState::at_rest(0.5);
    let a = SemiImplicitEuler.integrate(&mut state, &law, &Step::new(0.1));
    assert_relative_eq!(a, law.acceleration(0.5, 0.0));
    assert_relative_eq!(state.velocity, -0.5);
    assert_relative_eq!(state.position, 0.45);
}

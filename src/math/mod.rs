mod vector;

pub use vector::Vector2;

/// Constant for a very small number, used for comparisons and denominator floors
pub const EPSILON: f64 = 1.0e-9;

/// Clamps a value between a minimum and maximum value
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Divides `numerator` by `denominator`, flooring the denominator's magnitude
/// at [`EPSILON`] so the result is always finite for finite inputs.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < EPSILON {
        numerator / EPSILON.copysign(denominator)
    } else {
        numerator / denominator
    }
}

/// Converts degrees to radians
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts radians to degrees
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Radius of a drawn body whose area scales with its mass
#[inline]
pub fn radius_from_mass(mass: f64, scale: f64, offset: f64) -> f64 {
    mass.max(0.0).sqrt() * scale + offset
}

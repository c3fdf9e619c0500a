#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Whether the block is stuck or sliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum FrictionPhase {
    #[default]
    Static,
    Moving,
}

/// Coulomb friction with a static/kinetic transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionModel {
    /// Static coefficient μ
    pub static_coefficient: f64,

    /// Kinetic coefficient as a fraction of μ
    pub kinetic_ratio: f64,

    /// Speed below which a sliding block sticks again
    pub rest_threshold: f64,
}

impl FrictionModel {
    pub fn new(static_coefficient: f64) -> Self {
        Self { static_coefficient, kinetic_ratio: 0.8, rest_threshold: 0.5 }
    }

    /// Largest force static friction can hold, `μ·N`
    pub fn max_static(&self, normal_force: f64) -> f64 {
        self.static_coefficient * normal_force
    }

    /// Kinetic friction magnitude, `0.8·μ·N`
    pub fn kinetic(&self, normal_force: f64) -> f64 {
        self.kinetic_ratio * self.static_coefficient * normal_force
    }

    /// Static → Moving once the applied force exceeds `μ·N`.
    /// Returns true on the transition.
    pub fn break_away(&self, phase: &mut FrictionPhase, applied_force: f64, normal_force: f64) -> bool {
        if *phase == FrictionPhase::Static && applied_force.abs() > self.max_static(normal_force) {
            *phase = FrictionPhase::Moving;
            true
        } else {
            false
        }
    }

    /// Moving → Static below the rest threshold, snapping the velocity to 0.
    /// Returns true on the transition.
    pub fn settle(&self, phase: &mut FrictionPhase, velocity: &mut f64) -> bool {
        if *phase == FrictionPhase::Moving && velocity.abs() < self.rest_threshold {
            *velocity = 0.0;
            *phase = FrictionPhase::Static;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_force_stays_static() {
        let model = FrictionModel::new(0.3);
        let mut phase = FrictionPhase::Static;
        assert!(!model.break_away(&mut phase, 10.0, 5.0 * 9.8));
        assert_eq!(phase, FrictionPhase::Static);
    }

    #[test]
    fn strong_force_breaks_away() {
        let model = FrictionModel::new(0.3);
        let mut phase = FrictionPhase::Static;
        assert!(model.break_away(&mut phase, 20.0, 5.0 * 9.8));
        assert_eq!(phase, FrictionPhase::Moving);
    }

    #[test]
    fn slow_block_snaps_to_rest() {
        let model = FrictionModel::new(0.3);
        let mut phase = FrictionPhase::Moving;
        let mut velocity = -0.3;
        assert!(model.settle(&mut phase, &mut velocity));
        assert_eq!(velocity, 0.0);
        assert_eq!(phase, FrictionPhase::Static);
    }

    #[test]
    fn kinetic_is_weaker_than_static() {
        let model = FrictionModel::new(0.5);
        assert!(model.kinetic(10.0) < model.max_static(10.0));
        assert_eq!(model.kinetic(10.0), 4.0);
    }
}

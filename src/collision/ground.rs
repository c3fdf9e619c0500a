use crate::core::ScenarioFlags;

/// Result of a ground contact check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Airborne,
    Bounced,

    /// Came to rest on the ground; velocity is exactly zero
    Settled,
}

/// Horizontal floor that bounces falling objects with a loss.
///
/// Positions grow downward, so the object is on the ground once
/// `position >= ground`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub ground: f64,
    pub restitution: f64,
    pub rest_threshold: f64,
}

impl GroundContact {
    pub fn new(ground: f64) -> Self {
        Self { ground, restitution: 0.3, rest_threshold: 0.1 }
    }

    pub fn resolve(&self, position: &mut f64, velocity: &mut f64) -> ContactOutcome {
        if *position < self.ground {
            return ContactOutcome::Airborne;
        }

        *position = self.ground;
        *velocity *= -self.restitution;

        if velocity.abs() < self.rest_threshold {
            *velocity = 0.0;
            ContactOutcome::Settled
        } else {
            ContactOutcome::Bounced
        }
    }
}

/// Bottom of a ramp, measured along the slope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampEnd {
    pub end: f64,
    pub restitution: f64,
}

impl RampEnd {
    pub fn new(end: f64) -> Self {
        Self { end, restitution: 0.8 }
    }

    /// Stops the slide at the ramp end: clamps the distance, keeps 80% of the
    /// speed for display and swaps `MOVING` for `STOPPED`.
    pub fn resolve(&self, distance: &mut f64, velocity: &mut f64, flags: &mut ScenarioFlags) -> bool {
        if *distance < self.end {
            return false;
        }

        *distance = self.end;
        *velocity *= self.restitution;
        flags.remove(ScenarioFlags::MOVING);
        flags.insert(ScenarioFlags::STOPPED);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fast_impact_bounces_with_loss() {
        let ground = GroundContact::new(550.0);
        let mut y = 556.0;
        let mut v = 10.0;
        assert_eq!(ground.resolve(&mut y, &mut v), ContactOutcome::Bounced);
        assert_eq!(y, 550.0);
        assert_relative_eq!(v, -3.0);
    }

    #[test]
    fn slow_impact_settles() {
        let ground = GroundContact::new(550.0);
        let mut y = 550.2;
        let mut v = 0.2;
        assert_eq!(ground.resolve(&mut y, &mut v), ContactOutcome::Settled);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn ramp_end_stops_the_slide() {
        let ramp = RampEnd::new(433.0);
        let mut flags = ScenarioFlags::MOVING;
        let mut d = 440.0;
        let mut v = 5.0;
        assert!(ramp.resolve(&mut d, &mut v, &mut flags));
        assert_eq!(d, 433.0);
        assert_relative_eq!(v, 4.0);
        assert_eq!(flags, ScenarioFlags::STOPPED);
    }
}

mod walls;
mod pairwise;
mod head_on;
mod friction;
mod ground;

pub use self::walls::{Bounds, Walls, bounce_axis, stop_at_bounds};
pub use self::pairwise::{Contact, detect_contact, resolve_elastic_pair, resolve_pairs};
pub use self::head_on::{CollisionModel, elastic_1d, inelastic_1d, resolve_head_on};
pub use self::friction::{FrictionModel, FrictionPhase};
pub use self::ground::{GroundContact, ContactOutcome, RampEnd};

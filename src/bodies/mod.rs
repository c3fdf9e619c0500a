mod body;

pub use self::body::Body;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Cosmetic color tag of a body; never read by the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyColor {
    Sky,
    Coral,
    Mint,
    Amber,
    Violet,
    Pink,
}

impl BodyColor {
    /// The palette cycled through as bodies are spawned
    pub const PALETTE: [BodyColor; 6] = [
        BodyColor::Sky,
        BodyColor::Coral,
        BodyColor::Mint,
        BodyColor::Amber,
        BodyColor::Violet,
        BodyColor::Pink,
    ];

    /// Picks the palette entry for the `index`-th body
    pub fn from_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// CSS hex string for the host renderer
    pub fn hex(&self) -> &'static str {
        match self {
            BodyColor::Sky => "#66ccff",
            BodyColor::Coral => "#ff6666",
            BodyColor::Mint => "#66ff66",
            BodyColor::Amber => "#ffaa44",
            BodyColor::Violet => "#aa66ff",
            BodyColor::Pink => "#ff66aa",
        }
    }
}

impl Default for BodyColor {
    fn default() -> Self {
        BodyColor::Sky
    }
}

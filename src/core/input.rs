//! Input vocabulary shared between the host and the scenarios.
//!
//! The host translates its own key codes into [`Key`] and forwards pointer
//! positions in canvas pixels. Scenarios answer with what the controller
//! should do next.

/// A key press forwarded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Delete,
    Backspace,
    Char(char),
}

impl Key {
    /// True for the given letter regardless of case
    pub fn is_letter(&self, letter: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }
}

/// A scenario's answer to a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The scenario has no special meaning for this key; apply the defaults
    Unhandled,

    /// The scenario consumed the key and updated itself
    Handled,

    /// The key asks for a full reset
    Reset,

    /// The key asks to toggle pause
    TogglePause,

    /// The key is a display toggle with no effect on the simulation
    Ignored,
}

/// A scenario's answer to pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The pointer was outside every interactive region
    Ignored,

    /// The scenario updated itself
    Handled,

    /// The state jumped; history and trails no longer describe it
    ClearHistory {
        /// Also restart the simulated clock
        reset_time: bool,
    },
}

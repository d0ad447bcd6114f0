//! Flip-flop: one bit of memory toggled by low pulses.

use crate::network::Level;

/// A flip-flop module state.
///
/// High pulses are ignored. A low pulse toggles the bit and the module
/// emits its new state: high when it turned on, low when it turned off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipFlop {
    on: bool,
}

impl FlipFlop {
    /// Create a new flip-flop in the off state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle an incoming pulse, returning the level to emit (if any).
    pub fn receive(&mut self, level: Level) -> Option<Level> {
        if level.is_high() {
            return None;
        }
        self.on = !self.on;
        Some(Level::from(self.on))
    }

    /// Whether the flip-flop is currently on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Overwrite the stored bit.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Return to the off state.
    pub fn reset(&mut self) {
        self.on = false;
    }
}

//! Core types for network representation.

use std::fmt;
use std::ops::Add;

use crate::cycle::Tally;

/// A unique identifier for a module in the network.
///
/// Ids are dense and follow declaration order; sinks created during wiring
/// come after every declared module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub usize);

impl ModuleId {
    /// Sender id of the external trigger pulse. Never a real module.
    pub const BUTTON: ModuleId = ModuleId(usize::MAX);

    pub fn is_button(&self) -> bool {
        *self == Self::BUTTON
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_button() {
            write!(f, "button")
        } else {
            write!(f, "M{}", self.0)
        }
    }
}

/// Signal level carried by a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "low"),
            Level::High => write!(f, "high"),
        }
    }
}

/// An edge event: one level travelling from one module to another.
///
/// Pulses only live inside a single press's work queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pulse {
    /// Sending module ([`ModuleId::BUTTON`] for the external trigger)
    pub from: ModuleId,
    /// Receiving module
    pub to: ModuleId,
    pub level: Level,
}

/// Cumulative low/high pulse counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PulseCounts {
    pub low: u64,
    pub high: u64,
}

impl PulseCounts {
    /// Count a single pulse.
    pub fn record(&mut self, level: Level) {
        match level {
            Level::Low => self.low += 1,
            Level::High => self.high += 1,
        }
    }

    /// Total number of pulses.
    pub fn total(&self) -> u64 {
        self.low + self.high
    }

    /// `low * high`, the usual summary of a run.
    ///
    /// Widened so extrapolated counts never overflow.
    pub fn product(&self) -> u128 {
        u128::from(self.low) * u128::from(self.high)
    }
}

impl Add for PulseCounts {
    type Output = PulseCounts;

    fn add(self, rhs: PulseCounts) -> PulseCounts {
        PulseCounts {
            low: self.low + rhs.low,
            high: self.high + rhs.high,
        }
    }
}

impl Tally for PulseCounts {
    fn checked_add(self, rhs: PulseCounts) -> Option<PulseCounts> {
        Some(PulseCounts {
            low: self.low.checked_add(rhs.low)?,
            high: self.high.checked_add(rhs.high)?,
        })
    }

    fn checked_sub(self, rhs: PulseCounts) -> Option<PulseCounts> {
        Some(PulseCounts {
            low: self.low.checked_sub(rhs.low)?,
            high: self.high.checked_sub(rhs.high)?,
        })
    }

    fn checked_scale(self, factor: u64) -> Option<PulseCounts> {
        Some(PulseCounts {
            low: self.low.checked_mul(factor)?,
            high: self.high.checked_mul(factor)?,
        })
    }
}

impl fmt::Display for PulseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "low={} high={}", self.low, self.high)
    }
}

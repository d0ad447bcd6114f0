//! Conjunction: a NAND over the most recent level from every input.

use indexmap::IndexMap;

use crate::network::{Level, ModuleId};

/// A conjunction module state.
///
/// Remembers the last level received from each input (initially low) and
/// emits low only while every remembered level is high. The memory is
/// seeded with every wired input before the first press and persists
/// across presses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjunction {
    memory: IndexMap<ModuleId, Level>,
    /// Set when this module emits a high pulse; cleared before each press.
    fired_high: bool,
}

impl Conjunction {
    /// Create a conjunction that knows all of its inputs up front.
    pub fn new(inputs: impl IntoIterator<Item = ModuleId>) -> Self {
        Self {
            memory: inputs.into_iter().map(|id| (id, Level::Low)).collect(),
            fired_high: false,
        }
    }

    /// Record a pulse from `from` and return the level to emit.
    pub fn receive(&mut self, from: ModuleId, level: Level) -> Level {
        self.memory.insert(from, level);
        let out = self.output();
        if out.is_high() {
            self.fired_high = true;
        }
        out
    }

    /// Level this conjunction would emit given its current memory.
    ///
    /// An empty memory reports high; `receive` always records the sender
    /// first, so a wired conjunction never evaluates an empty memory.
    pub fn output(&self) -> Level {
        if !self.memory.is_empty() && self.memory.values().all(|l| l.is_high()) {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Remembered level per input, in wiring order.
    pub fn inputs(&self) -> impl Iterator<Item = (ModuleId, Level)> + '_ {
        self.memory.iter().map(|(id, level)| (*id, *level))
    }

    /// Remembered level for one input.
    pub fn last_from(&self, input: ModuleId) -> Option<Level> {
        self.memory.get(&input).copied()
    }

    /// Number of known inputs.
    pub fn input_count(&self) -> usize {
        self.memory.len()
    }

    /// Whether a high pulse was emitted since the flag was last cleared.
    pub fn fired_high(&self) -> bool {
        self.fired_high
    }

    pub fn clear_fired(&mut self) {
        self.fired_high = false;
    }

    /// Overwrite the remembered levels in wiring order and clear the fired flag.
    pub fn restore(&mut self, levels: impl IntoIterator<Item = Level>) {
        for (slot, level) in self.memory.values_mut().zip(levels) {
            *slot = level;
        }
        self.fired_high = false;
    }

    /// Forget every received level and the fired flag.
    pub fn reset(&mut self) {
        for level in self.memory.values_mut() {
            *level = Level::Low;
        }
        self.fired_high = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ModuleId = ModuleId(0);
    const B: ModuleId = ModuleId(1);

    #[test]
    fn test_low_only_when_all_high() {
        let mut conj = Conjunction::new([A, B]);
        assert_eq!(conj.receive(A, Level::High), Level::High);
        assert_eq!(conj.receive(B, Level::High), Level::Low);
        assert_eq!(conj.receive(A, Level::Low), Level::High);
    }

    #[test]
    fn test_single_input_inverts() {
        let mut conj = Conjunction::new([A]);
        assert_eq!(conj.receive(A, Level::High), Level::Low);
        assert_eq!(conj.receive(A, Level::Low), Level::High);
    }

    #[test]
    fn test_empty_memory_reports_high() {
        let conj = Conjunction::new(Vec::new());
        assert_eq!(conj.output(), Level::High);
    }

    #[test]
    fn test_fired_flag() {
        let mut conj = Conjunction::new([A]);
        conj.receive(A, Level::High);
        assert!(!conj.fired_high());
        conj.receive(A, Level::Low);
        assert!(conj.fired_high());
        conj.receive(A, Level::High);
        assert!(conj.fired_high(), "flag is sticky until cleared");
        conj.clear_fired();
        assert!(!conj.fired_high());
    }

    #[test]
    fn test_reset_restores_low_memory() {
        let mut conj = Conjunction::new([A, B]);
        conj.receive(A, Level::High);
        conj.receive(B, Level::Low);
        conj.reset();
        assert_eq!(conj, Conjunction::new([A, B]));
        assert_eq!(conj.inputs().collect::<Vec<_>>(), vec![(A, Level::Low), (B, Level::Low)]);
    }
}

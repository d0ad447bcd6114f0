//! Module models for pulse propagation.
//!
//! This module provides the four module behaviors:
//! - Relay: forwards every pulse unchanged (the entry module is a relay)
//! - FlipFlop: toggles on low, ignores high
//! - Conjunction: NAND over the last level from each input
//! - Sink: absorbs pulses, created for destinations that are never declared
//!
//! Each module maps one received pulse to at most one level, which the
//! engine fans out to every output in order.

mod conjunction;
mod flip_flop;

pub use conjunction::Conjunction;
pub use flip_flop::FlipFlop;

use crate::dsl::DeclaredKind;
use crate::network::{Level, ModuleId};

/// Behavior and state of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    Relay,
    FlipFlop(FlipFlop),
    Conjunction(Conjunction),
    Sink,
}

impl ModuleKind {
    /// Instantiate a declared kind with its resolved inputs.
    pub fn from_declared(kind: DeclaredKind, inputs: &[ModuleId]) -> Self {
        match kind {
            DeclaredKind::Relay => ModuleKind::Relay,
            DeclaredKind::FlipFlop => ModuleKind::FlipFlop(FlipFlop::new()),
            DeclaredKind::Conjunction => {
                ModuleKind::Conjunction(Conjunction::new(inputs.iter().copied()))
            }
        }
    }

    /// Human-readable kind name.
    pub fn label(&self) -> &'static str {
        match self {
            ModuleKind::Relay => "relay",
            ModuleKind::FlipFlop(_) => "flip-flop",
            ModuleKind::Conjunction(_) => "conjunction",
            ModuleKind::Sink => "sink",
        }
    }
}

/// A module in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    /// Destinations in emission order
    pub outputs: Vec<ModuleId>,
    pub kind: ModuleKind,
}

impl Module {
    /// Create a new module.
    pub fn new(id: ModuleId, name: String, outputs: Vec<ModuleId>, kind: ModuleKind) -> Self {
        Self {
            id,
            name,
            outputs,
            kind,
        }
    }

    /// Create a sink for a destination that was never declared.
    pub fn sink(id: ModuleId, name: String) -> Self {
        Self::new(id, name, Vec::new(), ModuleKind::Sink)
    }

    /// Deliver a pulse, returning the level to send to every output.
    pub fn receive(&mut self, from: ModuleId, level: Level) -> Option<Level> {
        match &mut self.kind {
            ModuleKind::Relay => Some(level),
            ModuleKind::FlipFlop(ff) => ff.receive(level),
            ModuleKind::Conjunction(conj) => Some(conj.receive(from, level)),
            ModuleKind::Sink => None,
        }
    }

    /// Restore the state the module had right after wiring.
    pub fn reset(&mut self) {
        match &mut self.kind {
            ModuleKind::FlipFlop(ff) => ff.reset(),
            ModuleKind::Conjunction(conj) => conj.reset(),
            ModuleKind::Relay | ModuleKind::Sink => {}
        }
    }

    pub fn as_flip_flop(&self) -> Option<&FlipFlop> {
        match &self.kind {
            ModuleKind::FlipFlop(ff) => Some(ff),
            _ => None,
        }
    }

    pub fn as_conjunction(&self) -> Option<&Conjunction> {
        match &self.kind {
            ModuleKind::Conjunction(conj) => Some(conj),
            _ => None,
        }
    }

    /// Check if this module is a conjunction.
    pub fn is_conjunction(&self) -> bool {
        matches!(self.kind, ModuleKind::Conjunction(_))
    }
}

//! Pulse propagation engine.
//!
//! This module drives a wired [`Network`](crate::network::Network).
//!
//! ## Presses
//!
//! A press injects one pulse (low by default) into the entry module and
//! delivers pulses from a FIFO queue until it is empty:
//!
//! ```text
//! queue = [button -> entry]
//! while let Some(pulse) = queue.pop_front():
//!     count pulse.level
//!     for level in module[pulse.to].receive(pulse.from, pulse.level):
//!         queue.extend(outputs of pulse.to, in order)
//! ```
//!
//! Delivery is strictly breadth-first, so a conjunction evaluates every
//! pulse of a round against the levels its inputs sent in earlier rounds.
//!
//! ## Long runs
//!
//! [`PulseMachine::fast_forward`] applies cycle detection to whole machine
//! snapshots and works on any network. The [`sync`] shortcut answers "when
//! does the target first see low" for counter networks only.

mod machine;
pub mod sync;

pub use machine::{Extrapolation, MachineConfig, MachineState, PulseMachine};
pub use sync::SyncConfig;

/// Conventional name of the module that receives each press.
pub const DEFAULT_ENTRY: &str = "broadcaster";

/// Conventional name of the final sink in counter networks.
pub const DEFAULT_TARGET: &str = "rx";

/// Default press ceiling for the synchronization search.
pub const DEFAULT_MAX_PRESSES: u64 = 100_000;

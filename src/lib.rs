//! # Pulse Core
//!
//! An event-driven simulator for networks of pulse-passing modules.
//!
//! This library provides:
//! - A small DSL for describing module networks
//! - Breadth-first pulse propagation over relays, flip-flops and conjunctions
//! - Generic cycle detection for extrapolating deterministic processes
//! - A counter synchronization shortcut for networks built from binary counters
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the module description language
//! - [`network`] - Wired module graph, pulse types and validation
//! - [`modules`] - Module behaviors (relay, flip-flop, conjunction, sink)
//! - [`engine`] - Press loop, pulse counting and long-run extrapolation
//! - [`cycle`] - Repeated-state search over any step function
//! - [`platform`] - Tilting rock platform, a second user of [`cycle`]
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! pulse count network.txt --presses 1000
//! pulse sync network.txt --target rx
//! ```
//!
//! ### Library
//!
//! ```
//! use pulse_core::PulseMachine;
//!
//! let mut machine = PulseMachine::from_dsl("broadcaster -> a\n%a -> out").unwrap();
//! let counts = machine.press_many(4);
//! assert_eq!((counts.low, counts.high), (10, 2));
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmPulseMachine } from 'pulse_core';
//!
//! const machine = new WasmPulseMachine(networkDsl);
//! machine.press_many(1000);
//! console.log(machine.product());
//! ```

pub mod cycle;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod modules;
pub mod network;
pub mod platform;

// Re-export main types for convenience
pub use cycle::{Cycle, CycleDetector, Trajectory};
pub use engine::{Extrapolation, MachineConfig, PulseMachine};
pub use error::{PulseError, Result};
pub use network::{Level, Network, PulseCounts};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmPulseMachine;

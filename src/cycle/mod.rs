//! Cycle detection and extrapolation for deterministic stepped processes.
//!
//! A process whose next state depends only on its current state must
//! eventually revisit a state if its state space is finite. Once the first
//! repeat is known as `(offset, period)`, the state after any number of
//! steps `T` equals the recorded state after
//!
//! ```text
//! T                                  if T < offset + period
//! offset + (T - offset) mod period   otherwise
//! ```
//!
//! so nothing beyond `offset + period` steps is ever simulated. Running
//! totals (pulse counts, for example) extrapolate the same way with
//! [`Cycle::accumulate`].

mod detector;

pub use detector::{Cycle, CycleDetector, Search, Tally, Trajectory};

/// Default step ceiling for [`CycleDetector`].
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

//! Repeated-state search over a deterministic step function.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use tracing::{debug, warn};

use super::DEFAULT_MAX_STEPS;
use crate::error::{PulseError, Result};

/// Offset and period of the first repeated state.
///
/// The state after `offset` steps equals the state after `offset + period`
/// steps, and no earlier pair of steps repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cycle {
    pub offset: usize,
    pub period: usize,
}

impl Cycle {
    /// Map a step count onto the recorded step with the same state.
    ///
    /// The result is always below `offset + period`.
    pub fn fold(&self, target: u64) -> usize {
        let offset = self.offset as u64;
        if target < offset + self.period as u64 {
            return target as usize;
        }
        self.offset + ((target - offset) % self.period as u64) as usize
    }

    /// Number of whole periods completed between `offset` and `target`.
    pub fn whole_periods(&self, target: u64) -> u64 {
        target.saturating_sub(self.offset as u64) / self.period as u64
    }

    /// Extrapolate a cumulative quantity to `target` steps.
    ///
    /// `cumulative[i]` must hold the running total after `i` steps for every
    /// `i` up to and including `offset + period`. Fails when fewer values
    /// were recorded or when the total at `target` does not fit.
    pub fn accumulate<A: Tally>(&self, target: u64, cumulative: &[A]) -> Result<A> {
        let at = |idx: usize| {
            cumulative.get(idx).copied().ok_or_else(|| {
                PulseError::invalid_parameter(format!("running total missing for step {}", idx))
            })
        };
        let overflow =
            || PulseError::invalid_parameter(format!("running total overflows at step {}", target));

        let per_period = at(self.offset + self.period)?
            .checked_sub(at(self.offset)?)
            .ok_or_else(|| PulseError::invalid_parameter("running total decreased within a period"))?;
        per_period
            .checked_scale(self.whole_periods(target))
            .and_then(|laps| at(self.fold(target)).ok()?.checked_add(laps))
            .ok_or_else(overflow)
    }
}

/// A running total that [`Cycle::accumulate`] can extrapolate.
///
/// Every operation reports overflow instead of wrapping.
pub trait Tally: Copy {
    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    /// Multiply by a step count.
    fn checked_scale(self, factor: u64) -> Option<Self>;
}

impl Tally for u64 {
    fn checked_add(self, rhs: u64) -> Option<u64> {
        u64::checked_add(self, rhs)
    }

    fn checked_sub(self, rhs: u64) -> Option<u64> {
        u64::checked_sub(self, rhs)
    }

    fn checked_scale(self, factor: u64) -> Option<u64> {
        u64::checked_mul(self, factor)
    }
}

/// How a bounded search toward a target step ended.
#[derive(Debug, Clone)]
pub enum Search<S> {
    /// A state repeated at or before the target step.
    Cycle(Trajectory<S>),
    /// The target step was reached first; the system is left in that state.
    Reached,
}

/// Recorded snapshots up to the first repeat, plus the cycle they form.
#[derive(Debug, Clone)]
pub struct Trajectory<S> {
    pub cycle: Cycle,
    /// Snapshot after each step, starting with the initial state
    states: Vec<S>,
}

impl<S> Trajectory<S> {
    /// Snapshot after `target` steps.
    pub fn state_at(&self, target: u64) -> &S {
        &self.states[self.cycle.fold(target)]
    }

    /// Consume the trajectory, keeping only the snapshot after `target` steps.
    pub fn into_state_at(mut self, target: u64) -> S {
        let idx = self.cycle.fold(target);
        self.states.swap_remove(idx)
    }

    /// Every recorded snapshot (`offset + period` of them).
    pub fn states(&self) -> &[S] {
        &self.states
    }
}

/// Finds the first repeated state of a deterministic process.
///
/// Each step must fully complete before its snapshot is taken. Snapshots are
/// indexed by hash; a hash hit counts as a repeat only when the recorded
/// snapshot is equal, so collisions cannot report a false cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDetector {
    max_steps: usize,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl CycleDetector {
    /// Create a detector with the default step ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of steps to run before giving up.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Search a process whose state is a value: `step` maps a state to the next.
    pub fn detect<S, F>(&self, initial: S, mut step: F) -> Result<Trajectory<S>>
    where
        S: Hash + Eq + Clone,
        F: FnMut(&S) -> S,
    {
        let mut current = initial;
        self.detect_with(&mut current, |state| *state = step(state), |state| state.clone())
    }

    /// Search a process that is advanced in place.
    ///
    /// `snapshot` extracts the observable state after every step; anything it
    /// leaves out (running counters, for example) does not take part in the
    /// comparison.
    pub fn detect_with<T, S, F, G>(&self, system: &mut T, step: F, snapshot: G) -> Result<Trajectory<S>>
    where
        S: Hash + Eq,
        F: FnMut(&mut T),
        G: FnMut(&T) -> S,
    {
        match self.scan(system, self.max_steps, step, snapshot) {
            Some(trajectory) => Ok(trajectory),
            None => {
                warn!(max_steps = self.max_steps, "Step ceiling reached without a repeated state");
                Err(PulseError::NoCycleFound {
                    steps: self.max_steps,
                })
            }
        }
    }

    /// Advance an in-place process toward step `target`, stopping at the
    /// first repeated state or at `target`, whichever comes first.
    ///
    /// At most `min(target, offset + period)` steps are run. Fails with
    /// [`PulseError::NoCycleFound`] only when the ceiling is below `target`
    /// and no state repeats within it.
    pub fn detect_toward<T, S, F, G>(
        &self,
        system: &mut T,
        target: u64,
        step: F,
        snapshot: G,
    ) -> Result<Search<S>>
    where
        S: Hash + Eq,
        F: FnMut(&mut T),
        G: FnMut(&T) -> S,
    {
        let limit = usize::try_from(target).map_or(self.max_steps, |t| t.min(self.max_steps));
        match self.scan(system, limit, step, snapshot) {
            Some(trajectory) => Ok(Search::Cycle(trajectory)),
            None if limit as u64 == target => Ok(Search::Reached),
            None => {
                warn!(max_steps = self.max_steps, target, "Step ceiling reached without a repeated state");
                Err(PulseError::NoCycleFound {
                    steps: self.max_steps,
                })
            }
        }
    }

    /// Run up to `limit` steps, returning the trajectory if a state repeats.
    fn scan<T, S, F, G>(&self, system: &mut T, limit: usize, mut step: F, mut snapshot: G) -> Option<Trajectory<S>>
    where
        S: Hash + Eq,
        F: FnMut(&mut T),
        G: FnMut(&T) -> S,
    {
        let hasher = RandomState::new();
        let mut seen: HashMap<u64, usize> = HashMap::new();
        let mut states = Vec::new();

        let initial = snapshot(system);
        seen.insert(hasher.hash_one(&initial), 0);
        states.push(initial);

        for steps in 1..=limit {
            step(system);
            let state = snapshot(system);
            let hash = hasher.hash_one(&state);

            if let Some(&earlier) = seen.get(&hash) {
                if states[earlier] == state {
                    let cycle = Cycle {
                        offset: earlier,
                        period: steps - earlier,
                    };
                    debug!(offset = cycle.offset, period = cycle.period, "Found repeated state");
                    return Some(Trajectory { cycle, states });
                }
            }

            seen.insert(hash, steps);
            states.push(state);
        }

        None
    }
}

//! Counter synchronization shortcut.
//!
//! Some networks are built from independent binary counters, each ending in
//! a monitor conjunction, whose monitors all feed one final conjunction in
//! front of the target module:
//!
//! ```text
//! broadcaster -> counter_1 .. counter_k
//! counter_i   -> &monitor_i -> &feeder -> target
//! ```
//!
//! The feeder sends low to the target only when every monitor emits high in
//! the same press. If each counter returns to its zero state on the very
//! press its monitor first emits high, that press index is the counter's
//! period and the first synchronized press is the least common multiple of
//! all of them.
//!
//! # Precondition
//!
//! Nothing here verifies that the counters are independent or that they
//! reset on their first firing. Networks that break either assumption get a
//! wrong answer, silently. [`PulseMachine::fast_forward`] with a
//! [`CycleDetector`](crate::cycle::CycleDetector) is the general, always
//! correct (but much slower) path.

use indexmap::IndexMap;
use num_integer::Integer;
use tracing::{debug, info};

use super::{PulseMachine, DEFAULT_MAX_PRESSES};
use crate::error::{PulseError, Result};
use crate::network::ModuleId;

/// Configuration for the synchronization search.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Give up if some monitor has not fired after this many presses.
    pub max_presses: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_presses: DEFAULT_MAX_PRESSES,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the press ceiling.
    pub fn with_max_presses(mut self, max_presses: u64) -> Self {
        self.max_presses = max_presses;
        self
    }
}

/// Locate the monitor conjunctions of the counters in front of `target`.
///
/// `target` must have exactly one sender, a conjunction (the feeder), and
/// every sender of the feeder must itself be a conjunction.
pub fn find_counter_monitors(machine: &PulseMachine, target: &str) -> Result<Vec<ModuleId>> {
    let network = machine.network();
    let target_id = network.require(target)?;

    let feeder = match network.inputs(target_id) {
        [feeder] => *feeder,
        senders => {
            return Err(PulseError::structure(format!(
                "'{}' must have exactly one sender, found {}",
                target,
                senders.len()
            )))
        }
    };
    if !network.module(feeder).is_conjunction() {
        return Err(PulseError::structure(format!(
            "'{}' feeds '{}' but is a {}, not a conjunction",
            network.name(feeder),
            target,
            network.module(feeder).kind.label()
        )));
    }

    let monitors = network.inputs(feeder).to_vec();
    if monitors.is_empty() {
        return Err(PulseError::structure(format!(
            "feeder '{}' has no senders",
            network.name(feeder)
        )));
    }
    if let Some(&bad) = monitors.iter().find(|&&id| !network.module(id).is_conjunction()) {
        return Err(PulseError::structure(format!(
            "'{}' feeds '{}' but is a {}, not a conjunction",
            network.name(bad),
            network.name(feeder),
            network.module(bad).kind.label()
        )));
    }

    debug!(
        sink = target,
        feeder = network.name(feeder),
        monitors = monitors.len(),
        "Found counter monitors"
    );
    Ok(monitors)
}

/// Press until every monitor has emitted a high pulse at least once.
///
/// Returns, per monitor name, the 1-based index (counted from the first
/// press made here) of the press in which it first fired.
pub fn first_high_presses(
    machine: &mut PulseMachine,
    monitors: &[ModuleId],
    config: &SyncConfig,
) -> Result<IndexMap<String, u64>> {
    if monitors.is_empty() {
        return Err(PulseError::invalid_parameter("no monitors to watch"));
    }
    for &id in monitors {
        let module = machine.network().module(id);
        if !module.is_conjunction() {
            return Err(PulseError::WrongModuleKind {
                name: module.name.clone(),
                expected: "conjunction",
                actual: module.kind.label(),
            });
        }
    }

    let mut pending: Vec<ModuleId> = monitors.to_vec();
    let mut fired: IndexMap<String, u64> = IndexMap::new();

    for press in 1..=config.max_presses {
        machine.press();
        pending.retain(|&id| {
            let module = machine.network().module(id);
            let has_fired = module.as_conjunction().is_some_and(|c| c.fired_high());
            if has_fired {
                debug!(monitor = %module.name, press, "Monitor fired high");
                fired.insert(module.name.clone(), press);
            }
            !has_fired
        });
        if pending.is_empty() {
            // Report in the caller's monitor order
            let network = machine.network();
            let ordered: IndexMap<String, u64> = monitors
                .iter()
                .filter_map(|&id| {
                    let name = network.name(id);
                    fired.get(name).map(|&p| (name.to_string(), p))
                })
                .collect();
            return Ok(ordered);
        }
    }

    Err(PulseError::MonitorNeverFired {
        monitors: pending
            .iter()
            .map(|&id| machine.network().name(id).to_string())
            .collect(),
        presses: config.max_presses,
    })
}

/// Least common multiple of press periods.
pub fn combine_periods<I>(periods: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    periods.into_iter().fold(1, |acc, p| acc.lcm(&p))
}

/// Number of presses until `target` first receives a low pulse, using the
/// counter shortcut.
///
/// Only valid under the precondition described in the module docs.
pub fn presses_until_low(machine: &mut PulseMachine, target: &str, config: &SyncConfig) -> Result<u64> {
    let monitors = find_counter_monitors(machine, target)?;
    let periods = first_high_presses(machine, &monitors, config)?;
    let presses = combine_periods(periods.values().copied());
    info!(sink = target, counters = periods.len(), presses, "Synchronized counters");
    Ok(presses)
}

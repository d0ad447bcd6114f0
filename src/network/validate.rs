//! Network validation.

use std::collections::VecDeque;

use tracing::warn;

use super::{ModuleId, Network};

/// Validate a network for simulation.
///
/// Wiring already guarantees that every lookup succeeds, so nothing here is
/// fatal. Declared modules the entry can never reach are reported (and
/// logged) because they keep their initial state forever, which usually
/// points at a typo in the module list.
pub fn validate_network(network: &Network) -> Vec<ModuleId> {
    let unreachable = unreachable_modules(network);
    for &id in &unreachable {
        warn!(module = network.name(id), "Module is unreachable from the entry");
    }
    unreachable
}

/// Declared modules with no path from the entry module.
pub fn unreachable_modules(network: &Network) -> Vec<ModuleId> {
    let mut seen = vec![false; network.len()];
    let mut queue = VecDeque::from([network.entry()]);
    seen[network.entry().0] = true;

    while let Some(id) = queue.pop_front() {
        for &next in network.outputs(id) {
            if !seen[next.0] {
                seen[next.0] = true;
                queue.push_back(next);
            }
        }
    }

    (0..network.declared_count())
        .map(ModuleId)
        .filter(|id| !seen[id.0])
        .collect()
}

//! Main pulse machine interface.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::DEFAULT_ENTRY;
use crate::cycle::{Cycle, CycleDetector, Search, Tally};
use crate::dsl::{self, NetlistAst};
use crate::error::{PulseError, Result};
use crate::modules::{Conjunction, ModuleKind};
use crate::network::{validate_network, Level, ModuleId, Network, Pulse, PulseCounts};

/// Configuration for the pulse machine.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Name of the module that receives the external trigger.
    pub entry: String,
    /// Level of the external trigger pulse.
    pub trigger: Level,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY.to_string(),
            trigger: Level::Low,
        }
    }
}

impl MachineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry module name.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Set the level injected by each press.
    pub fn with_trigger(mut self, trigger: Level) -> Self {
        self.trigger = trigger;
        self
    }
}

/// Hashable snapshot of every module's memory.
///
/// Holds flip-flop bits and conjunction memories in module id order.
/// Counters, the press count and per-press monitoring flags are not part
/// of it, so two snapshots compare equal exactly when future presses
/// behave identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MachineState {
    pub flip_flops: Vec<bool>,
    pub memories: Vec<Level>,
}

/// Outcome of a long run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrapolation {
    /// Cumulative counters at the target press
    pub counts: PulseCounts,
    /// Press cycle, when a state repeated before the target
    pub cycle: Option<Cycle>,
    /// Presses actually simulated
    pub simulated: u64,
}

/// The pulse propagation engine.
///
/// Owns its network exclusively; module states change only inside
/// [`press`](Self::press). Counters and the press count belong to the
/// instance, so independent machines never share state.
#[derive(Debug, Clone)]
pub struct PulseMachine {
    /// The wired network being simulated
    network: Network,
    /// Cumulative pulse counters
    counts: PulseCounts,
    /// Number of completed presses
    presses: u64,
    /// Level injected by each press
    trigger: Level,
    /// Work queue, kept between presses to reuse its allocation
    queue: VecDeque<Pulse>,
}

impl PulseMachine {
    /// Create a machine for the given network with a low trigger.
    pub fn new(network: Network) -> Self {
        validate_network(&network);
        Self {
            network,
            counts: PulseCounts::default(),
            presses: 0,
            trigger: Level::Low,
            queue: VecDeque::new(),
        }
    }

    /// Wire a parsed module list with a custom configuration.
    pub fn from_ast(ast: &NetlistAst, config: MachineConfig) -> Result<Self> {
        let network = Network::from_ast(ast, &config.entry)?;
        let mut machine = Self::new(network);
        machine.trigger = config.trigger;
        Ok(machine)
    }

    /// Parse and wire a module list with the default configuration.
    pub fn from_dsl(input: &str) -> Result<Self> {
        Self::from_ast(&dsl::parse(input)?, MachineConfig::default())
    }

    /// Run one press to quiescence, returning the pulses it sent.
    pub fn press(&mut self) -> PulseCounts {
        self.press_observed(|_| {})
    }

    /// Run one press, reporting every pulse as it is delivered.
    ///
    /// Pulses are delivered breadth-first: everything one activation emits
    /// goes to the back of the queue in output order, so a whole round is
    /// delivered before the pulses it causes.
    pub fn press_observed<F>(&mut self, mut on_pulse: F) -> PulseCounts
    where
        F: FnMut(&Pulse),
    {
        for module in self.network.modules_mut() {
            if let ModuleKind::Conjunction(conj) = &mut module.kind {
                conj.clear_fired();
            }
        }

        let mut sent = PulseCounts::default();
        let mut queue = std::mem::take(&mut self.queue);
        queue.push_back(Pulse {
            from: ModuleId::BUTTON,
            to: self.network.entry(),
            level: self.trigger,
        });

        while let Some(pulse) = queue.pop_front() {
            sent.record(pulse.level);
            on_pulse(&pulse);

            let module = self.network.module_mut(pulse.to);
            if let Some(level) = module.receive(pulse.from, pulse.level) {
                queue.extend(module.outputs.iter().map(|&to| Pulse {
                    from: pulse.to,
                    to,
                    level,
                }));
            }
        }

        self.queue = queue;
        self.counts = self.counts + sent;
        self.presses += 1;
        trace!(press = self.presses, low = sent.low, high = sent.high, "Press complete");
        sent
    }

    /// Press `n` times, returning the cumulative counters.
    pub fn press_many(&mut self, n: u64) -> PulseCounts {
        for _ in 0..n {
            self.press();
        }
        self.counts
    }

    /// Cumulative counters since construction or the last reset.
    pub fn counts(&self) -> PulseCounts {
        self.counts
    }

    /// Number of presses since construction or the last reset.
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Get a reference to the network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Return every module to its wired state and zero the counters.
    pub fn reset(&mut self) {
        for module in self.network.modules_mut() {
            module.reset();
        }
        self.counts = PulseCounts::default();
        self.presses = 0;
    }

    /// Snapshot every module's memory.
    pub fn state(&self) -> MachineState {
        let mut state = MachineState::default();
        for module in self.network.modules() {
            match &module.kind {
                ModuleKind::FlipFlop(ff) => state.flip_flops.push(ff.is_on()),
                ModuleKind::Conjunction(conj) => state.memories.extend(conj.inputs().map(|(_, l)| l)),
                ModuleKind::Relay | ModuleKind::Sink => {}
            }
        }
        state
    }

    /// Overwrite every module's memory from a snapshot taken on this network.
    pub fn restore(&mut self, state: &MachineState) -> Result<()> {
        let current = self.state();
        if current.flip_flops.len() != state.flip_flops.len()
            || current.memories.len() != state.memories.len()
        {
            return Err(PulseError::invalid_parameter(
                "snapshot does not match this network",
            ));
        }

        let mut bits = state.flip_flops.iter().copied();
        let mut levels = state.memories.iter().copied();
        for module in self.network.modules_mut() {
            match &mut module.kind {
                ModuleKind::FlipFlop(ff) => {
                    if let Some(on) = bits.next() {
                        ff.set_on(on);
                    }
                }
                ModuleKind::Conjunction(conj) => {
                    let n = conj.input_count();
                    conj.restore(levels.by_ref().take(n));
                }
                ModuleKind::Relay | ModuleKind::Sink => {}
            }
        }
        Ok(())
    }

    /// Advance by `presses` presses, skipping whole cycles of machine state.
    ///
    /// Presses a scratch copy until either its [`MachineState`] repeats or
    /// the target is reached, so at most `min(presses, offset + period)`
    /// presses are simulated. On a repeat the equivalent recorded state is
    /// restored and the counters are extrapolated; monitoring flags are then
    /// cleared rather than describing the skipped press.
    pub fn fast_forward(&mut self, presses: u64, detector: &CycleDetector) -> Result<Extrapolation> {
        let total_presses = self.presses.checked_add(presses).ok_or_else(|| {
            PulseError::invalid_parameter(format!("press count overflows after {} more presses", presses))
        })?;

        let base = self.counts;
        let mut scratch = self.clone();
        scratch.counts = PulseCounts::default();
        let mut cumulative = vec![PulseCounts::default()];
        let search = detector.detect_toward(
            &mut scratch,
            presses,
            |m| {
                m.press();
                cumulative.push(m.counts);
            },
            PulseMachine::state,
        )?;
        let simulated = (cumulative.len() - 1) as u64;

        let (extra, cycle) = match search {
            Search::Cycle(trajectory) => {
                let cycle = trajectory.cycle;
                let extra = cycle.accumulate(presses, &cumulative)?;
                debug!(
                    offset = cycle.offset,
                    period = cycle.period,
                    presses,
                    "Extrapolated press cycle"
                );
                self.restore(trajectory.state_at(presses))?;
                (extra, Some(cycle))
            }
            Search::Reached => {
                // The scratch copy already sits on the target press
                let extra = scratch.counts;
                self.network = scratch.network;
                (extra, None)
            }
        };

        self.counts = base.checked_add(extra).ok_or_else(|| {
            PulseError::invalid_parameter(format!("pulse counters overflow at press {}", total_presses))
        })?;
        self.presses = total_presses;
        Ok(Extrapolation {
            counts: self.counts,
            cycle,
            simulated,
        })
    }

    /// Offset and period of the press cycle starting from the current state.
    pub fn press_cycle(&self, detector: &CycleDetector) -> Result<Cycle> {
        let mut scratch = self.clone();
        let trajectory = detector.detect_with(
            &mut scratch,
            |m| {
                m.press();
            },
            PulseMachine::state,
        )?;
        Ok(trajectory.cycle)
    }

    /// Run [`fast_forward`](Self::fast_forward) on a copy, leaving this
    /// machine untouched. The reported counters start from zero.
    pub fn extrapolate_counts(&self, presses: u64, detector: &CycleDetector) -> Result<Extrapolation> {
        let mut scratch = self.clone();
        scratch.counts = PulseCounts::default();
        scratch.fast_forward(presses, detector)
    }

    /// Whether a flip-flop is currently on.
    pub fn is_on(&self, name: &str) -> Result<bool> {
        let id = self.network.require(name)?;
        let module = self.network.module(id);
        module
            .as_flip_flop()
            .map(|ff| ff.is_on())
            .ok_or_else(|| wrong_kind(name, "flip-flop", &module.kind))
    }

    /// Remembered level per input of a conjunction, in wiring order.
    pub fn conjunction_inputs(&self, name: &str) -> Result<Vec<(&str, Level)>> {
        let conj = self.conjunction(name)?;
        Ok(conj
            .inputs()
            .map(|(id, level)| (self.network.name(id), level))
            .collect())
    }

    /// Whether a conjunction emitted at least one high pulse during the
    /// most recent press.
    pub fn fired_high(&self, name: &str) -> Result<bool> {
        Ok(self.conjunction(name)?.fired_high())
    }

    fn conjunction(&self, name: &str) -> Result<&Conjunction> {
        let id = self.network.require(name)?;
        let module = self.network.module(id);
        module
            .as_conjunction()
            .ok_or_else(|| wrong_kind(name, "conjunction", &module.kind))
    }
}

fn wrong_kind(name: &str, expected: &'static str, actual: &ModuleKind) -> PulseError {
    PulseError::WrongModuleKind {
        name: name.to_string(),
        expected,
        actual: actual.label(),
    }
}

//! Property tests over randomly wired networks.
//!
//! Generated networks only wire module `i` to modules `j > i` (plus a
//! shared sink), so every press terminates.

use proptest::prelude::*;

use pulse_core::modules::{Conjunction, FlipFlop};
use pulse_core::network::ModuleId;
use pulse_core::{CycleDetector, Level, PulseCounts, PulseError, PulseMachine};

/// Render a layered network of flip-flops (`true`) and conjunctions.
fn render(kinds: &[bool], edges: &[Vec<bool>], roots: &[bool]) -> String {
    let n = kinds.len();
    let mut entry: Vec<String> = (0..n).filter(|&i| roots[i]).map(|i| format!("m{}", i)).collect();
    if entry.is_empty() {
        entry.push("m0".to_string());
    }

    let mut lines = vec![format!("broadcaster -> {}", entry.join(", "))];
    for i in 0..n {
        let sigil = if kinds[i] { '%' } else { '&' };
        let mut outputs: Vec<String> = (i + 1..n).filter(|&j| edges[i][j]).map(|j| format!("m{}", j)).collect();
        if outputs.is_empty() || edges[i][i] {
            outputs.push("out".to_string());
        }
        lines.push(format!("{}m{} -> {}", sigil, i, outputs.join(", ")));
    }
    lines.join("\n")
}

fn network() -> impl Strategy<Value = String> {
    (2usize..7)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(any::<bool>(), n),
                proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n),
                proptest::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(kinds, edges, roots)| render(&kinds, &edges, &roots))
}

fn press_log(machine: &mut PulseMachine, presses: usize) -> Vec<PulseCounts> {
    (0..presses).map(|_| machine.press()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn presses_are_deterministic(dsl in network(), presses in 1usize..60) {
        let mut first = PulseMachine::from_dsl(&dsl).unwrap();
        let mut second = PulseMachine::from_dsl(&dsl).unwrap();
        prop_assert_eq!(first.state(), second.state());
        prop_assert_eq!(press_log(&mut first, presses), press_log(&mut second, presses));
        prop_assert_eq!(first.counts(), second.counts());
        prop_assert_eq!(first.state(), second.state());
    }

    #[test]
    fn reset_replays_fresh_machine(dsl in network(), presses in 1usize..40) {
        let mut machine = PulseMachine::from_dsl(&dsl).unwrap();
        let fresh_log = press_log(&mut machine, presses);
        machine.reset();
        prop_assert_eq!(machine.counts(), PulseCounts::default());
        prop_assert_eq!(machine.presses(), 0);
        prop_assert_eq!(press_log(&mut machine, presses), fresh_log);
    }

    #[test]
    fn fast_forward_matches_direct(dsl in network(), presses in 0u64..400) {
        let detector = CycleDetector::new().with_max_steps(64);
        let mut fast = PulseMachine::from_dsl(&dsl).unwrap();
        match fast.fast_forward(presses, &detector) {
            Ok(_) => {}
            // Press cycle longer than the ceiling; nothing to compare
            Err(PulseError::NoCycleFound { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        }

        let mut direct = PulseMachine::from_dsl(&dsl).unwrap();
        direct.press_many(presses);
        prop_assert_eq!(fast.counts(), direct.counts());
        prop_assert_eq!(fast.presses(), direct.presses());
        prop_assert_eq!(fast.state(), direct.state());
    }

    #[test]
    fn flip_flop_has_period_two(on in any::<bool>(), highs in 0usize..5) {
        let mut ff = FlipFlop::new();
        ff.set_on(on);
        for _ in 0..highs {
            prop_assert_eq!(ff.receive(Level::High), None);
        }
        prop_assert_eq!(ff.receive(Level::Low), Some(Level::from(!on)));
        prop_assert_eq!(ff.receive(Level::Low), Some(Level::from(on)));
        prop_assert_eq!(ff.is_on(), on);
    }

    #[test]
    fn conjunction_is_nand_over_latest_levels(
        deliveries in proptest::collection::vec((0usize..4, any::<bool>()), 1..20),
    ) {
        let inputs: Vec<ModuleId> = (0..4).map(ModuleId).collect();
        let mut conj = Conjunction::new(inputs.clone());
        let mut latest = [false; 4];
        for (input, high) in deliveries {
            latest[input] = high;
            let emitted = conj.receive(inputs[input], Level::from(high));
            let expected = if latest.iter().all(|&h| h) { Level::Low } else { Level::High };
            prop_assert_eq!(emitted, expected);
            prop_assert_eq!(conj.output(), expected);
        }
    }
}

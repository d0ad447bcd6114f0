//! End-to-end scenarios through the public API: text in, counters and
//! loads out.

use pulse_core::dsl::{self, NetlistAst};
use pulse_core::engine::sync::{self, SyncConfig};
use pulse_core::platform::{Direction, Platform};
use pulse_core::{CycleDetector, Level, MachineConfig, PulseError, PulseMachine};

const RIPPLE: &str = "\
# Three flip-flops and an inverter
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

const TWO_BIT: &str = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

// Pulse counting

#[test]
fn ripple_single_press() {
    let mut machine = PulseMachine::from_dsl(RIPPLE).unwrap();
    let sent = machine.press();
    assert_eq!((sent.low, sent.high), (8, 4));
    assert_eq!(machine.counts(), sent);
}

#[test]
fn ripple_thousand_presses() {
    let mut machine = PulseMachine::from_dsl(RIPPLE).unwrap();
    let counts = machine.press_many(1000);
    assert_eq!((counts.low, counts.high), (8000, 4000));
    assert_eq!(counts.product(), 32_000_000);
}

#[test]
fn two_bit_thousand_presses() {
    let mut machine = PulseMachine::from_dsl(TWO_BIT).unwrap();
    assert_eq!(machine.press_many(1000).product(), 11_687_500);
}

#[test]
fn from_pairs_matches_text() {
    let ast = NetlistAst::from_pairs([
        ("broadcaster", vec!["a"]),
        ("%a", vec!["inv", "con"]),
        ("&inv", vec!["b"]),
        ("%b", vec!["con"]),
        ("&con", vec!["output"]),
    ])
    .unwrap();
    let mut from_pairs = PulseMachine::from_ast(&ast, MachineConfig::default()).unwrap();
    let mut from_text = PulseMachine::from_dsl(TWO_BIT).unwrap();
    assert_eq!(from_pairs.press_many(1000), from_text.press_many(1000));
}

#[test]
fn instances_do_not_share_counters() {
    let mut first = PulseMachine::from_dsl(RIPPLE).unwrap();
    let second = PulseMachine::from_dsl(RIPPLE).unwrap();
    first.press_many(10);
    assert_eq!(first.counts().total(), 120);
    assert_eq!(second.counts().total(), 0);
    assert_eq!(second.presses(), 0);
}

// Long runs

#[test]
fn extrapolated_counts_match_direct_run() {
    let detector = CycleDetector::new().with_max_steps(100);
    let machine = PulseMachine::from_dsl(TWO_BIT).unwrap();
    let extrapolated = machine.extrapolate_counts(1000, &detector).unwrap();

    let mut direct = PulseMachine::from_dsl(TWO_BIT).unwrap();
    assert_eq!(extrapolated.counts, direct.press_many(1000));
}

#[test]
fn fast_forward_from_mid_run() {
    let detector = CycleDetector::new().with_max_steps(10);
    let mut fast = PulseMachine::from_dsl(TWO_BIT).unwrap();
    fast.press_many(3);
    fast.fast_forward(997, &detector).unwrap();

    let mut direct = PulseMachine::from_dsl(TWO_BIT).unwrap();
    direct.press_many(1000);

    assert_eq!(fast.counts(), direct.counts());
    assert_eq!(fast.presses(), 1000);
    assert_eq!(fast.state(), direct.state());
}

#[test]
fn trillion_presses_report_exact_product() {
    let machine = PulseMachine::from_dsl(TWO_BIT).unwrap();
    let run = machine
        .extrapolate_counts(1_000_000_000_000, &CycleDetector::new())
        .unwrap();
    assert_eq!(run.counts.low, 4_250_000_000_000);
    assert_eq!(run.counts.high, 2_750_000_000_000);
    assert_eq!(run.counts.product(), 11_687_500_000_000_000_000_000_000);
    assert_eq!(run.simulated, 4);
}

#[test]
fn press_count_beyond_u64_is_rejected() {
    let machine = PulseMachine::from_dsl(TWO_BIT).unwrap();
    assert!(matches!(
        machine.extrapolate_counts(u64::MAX, &CycleDetector::new()),
        Err(PulseError::InvalidParameter { .. })
    ));
}

#[test]
fn sync_shortcut_on_counter_network() {
    let network = "\
broadcaster -> b0, fa
%b0 -> b1, k
%b1 -> k
&k -> b0, m
&m -> feeder
%fa -> ma
&ma -> feeder
&feeder -> rx
";
    let mut machine = PulseMachine::from_dsl(network).unwrap();
    let presses = sync::presses_until_low(&mut machine, "rx", &SyncConfig::default()).unwrap();
    assert_eq!(presses, 6);
}

// Errors

#[test]
fn unknown_sigil_is_fatal() {
    let err = PulseMachine::from_dsl("broadcaster -> a\n!a -> b").unwrap_err();
    assert!(matches!(
        err,
        PulseError::UnknownModuleKind { sigil: '!', line: 2 }
    ));
}

#[test]
fn custom_entry_must_exist() {
    let ast = dsl::parse(RIPPLE).unwrap();
    let config = MachineConfig::new().with_entry("start");
    assert!(matches!(
        PulseMachine::from_ast(&ast, config),
        Err(PulseError::MissingEntry { .. })
    ));
}

#[test]
fn queries_reject_wrong_kind() {
    let machine = PulseMachine::from_dsl(RIPPLE).unwrap();
    assert!(matches!(
        machine.is_on("inv"),
        Err(PulseError::WrongModuleKind { .. })
    ));
    assert!(matches!(
        machine.fired_high("a"),
        Err(PulseError::WrongModuleKind { .. })
    ));
    assert!(matches!(
        machine.is_on("nope"),
        Err(PulseError::ModuleNotFound { .. })
    ));
}

#[test]
fn conjunction_inputs_follow_wiring_order() {
    let mut machine = PulseMachine::from_dsl(TWO_BIT).unwrap();
    assert_eq!(
        machine.conjunction_inputs("con").unwrap(),
        vec![("a", Level::Low), ("b", Level::Low)]
    );
    machine.press();
    assert_eq!(
        machine.conjunction_inputs("con").unwrap(),
        vec![("a", Level::High), ("b", Level::High)]
    );
}

// Platform

const PLATFORM: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

#[test]
fn platform_north_load() {
    let mut platform = Platform::parse(PLATFORM).unwrap();
    platform.tilt(Direction::North);
    assert_eq!(platform.north_load(), 136);
}

#[test]
fn platform_load_after_billion_cycles() {
    let platform = Platform::parse(PLATFORM).unwrap();
    let load = platform
        .load_after_cycles(1_000_000_000, &CycleDetector::new())
        .unwrap();
    assert_eq!(load, 64);
}

#[test]
fn platform_ceiling_is_reported() {
    let platform = Platform::parse(PLATFORM).unwrap();
    let err = platform
        .load_after_cycles(1_000_000_000, &CycleDetector::new().with_max_steps(2))
        .unwrap_err();
    assert!(matches!(err, PulseError::NoCycleFound { steps: 2 }));
}

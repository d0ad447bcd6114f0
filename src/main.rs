//! Pulse - Pulse Propagation Simulator
//!
//! Runs module networks described in the pulse DSL and answers long-run
//! questions through cycle extrapolation.
//!
//! # Usage
//!
//! ```bash
//! pulse count network.txt --presses 1000
//! pulse cycle network.txt --presses 1000000000000
//! pulse sync network.txt --target rx
//! RUST_LOG=debug pulse tilt platform.txt --cycles 1000000000
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pulse_core::{
    cycle::DEFAULT_MAX_STEPS,
    dsl,
    engine::{sync, SyncConfig, DEFAULT_ENTRY, DEFAULT_MAX_PRESSES, DEFAULT_TARGET},
    error::Result,
    platform::{Direction, Platform},
    CycleDetector, Level, MachineConfig, PulseMachine,
};
use tracing_subscriber::EnvFilter;

/// Pulse propagation simulator
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Press the button N times and report the pulse counters
    Count {
        /// Path to the module list
        #[arg(value_name = "NETWORK_FILE")]
        network_file: PathBuf,

        /// Number of presses to simulate
        #[arg(short, long, default_value_t = 1000)]
        presses: u64,

        /// Name of the module each press is sent to
        #[arg(long, default_value = DEFAULT_ENTRY)]
        entry: String,

        /// Send a high pulse on each press instead of a low one
        #[arg(long)]
        high: bool,
    },

    /// Extrapolate the pulse counters to a large press count via cycle detection
    Cycle {
        /// Path to the module list
        #[arg(value_name = "NETWORK_FILE")]
        network_file: PathBuf,

        /// Number of presses to extrapolate to
        #[arg(short, long)]
        presses: u64,

        /// Maximum presses to simulate while searching for a repeated state
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Name of the module each press is sent to
        #[arg(long, default_value = DEFAULT_ENTRY)]
        entry: String,
    },

    /// Presses until the target first receives a low pulse (counter networks only)
    Sync {
        /// Path to the module list
        #[arg(value_name = "NETWORK_FILE")]
        network_file: PathBuf,

        /// Name of the final sink
        #[arg(short, long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Give up if a counter has not fired after this many presses
        #[arg(long, default_value_t = DEFAULT_MAX_PRESSES)]
        max_presses: u64,

        /// Name of the module each press is sent to
        #[arg(long, default_value = DEFAULT_ENTRY)]
        entry: String,
    },

    /// North load of a rock platform after tilting or spin cycles
    Tilt {
        /// Path to the platform grid
        #[arg(value_name = "PLATFORM_FILE")]
        platform_file: PathBuf,

        /// Number of spin cycles; without it the platform is tilted north once
        #[arg(short, long)]
        cycles: Option<u64>,

        /// Maximum spin cycles to simulate while searching for a repeated state
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so results on stdout stay scriptable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Count {
            network_file,
            presses,
            entry,
            high,
        } => {
            let trigger = if high { Level::High } else { Level::Low };
            let config = MachineConfig::new().with_entry(entry).with_trigger(trigger);
            let mut machine = load_machine(&network_file, config)?;
            let counts = machine.press_many(presses);
            println!("low:     {}", counts.low);
            println!("high:    {}", counts.high);
            println!("product: {}", counts.product());
        }

        Commands::Cycle {
            network_file,
            presses,
            max_steps,
            entry,
        } => {
            let machine = load_machine(&network_file, MachineConfig::new().with_entry(entry))?;
            let detector = CycleDetector::new().with_max_steps(max_steps);
            let run = machine.extrapolate_counts(presses, &detector)?;
            match run.cycle {
                Some(cycle) => {
                    println!("offset:  {}", cycle.offset);
                    println!("period:  {}", cycle.period);
                }
                None => println!("no repeat within {} presses", run.simulated),
            }
            println!("low:     {}", run.counts.low);
            println!("high:    {}", run.counts.high);
            println!("product: {}", run.counts.product());
        }

        Commands::Sync {
            network_file,
            target,
            max_presses,
            entry,
        } => {
            let mut machine = load_machine(&network_file, MachineConfig::new().with_entry(entry))?;
            let config = SyncConfig::new().with_max_presses(max_presses);
            let presses = sync::presses_until_low(&mut machine, &target, &config)?;
            println!("{}", presses);
        }

        Commands::Tilt {
            platform_file,
            cycles,
            max_steps,
        } => {
            let content = dsl::read_file(&platform_file)?;
            let mut platform = Platform::parse(&content)?;
            let load = match cycles {
                Some(cycles) => {
                    let detector = CycleDetector::new().with_max_steps(max_steps);
                    platform.load_after_cycles(cycles, &detector)?
                }
                None => {
                    platform.tilt(Direction::North);
                    platform.north_load()
                }
            };
            println!("{}", load);
        }
    }

    Ok(())
}

fn load_machine(path: &Path, config: MachineConfig) -> Result<PulseMachine> {
    let ast = dsl::parse_file(path)?;
    PulseMachine::from_ast(&ast, config)
}

//! Cache hierarchy simulator CLI.
//!
//! This binary is the driver around the simulator core. It performs:
//! 1. **Configuration:** Builds the geometry from eight positional arguments.
//! 2. **Replay:** Streams the trace file into the hierarchy one request at a time.
//! 3. **Reporting:** Prints the configuration, cache and stream buffer contents, and measurements.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{Config, LevelConfig, PrefetchConfig};
use cachesim_core::sim::{Report, Simulator, TraceReader};
use cachesim_core::SimError;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Two-level cache hierarchy simulator with stream-buffer prefetching",
    long_about = "Replay a memory reference trace through an L1/L2 cache hierarchy and report hits, misses, writebacks, and memory traffic.\n\nSet L2_SIZE to 0 to simulate L1 only and PREF_N to 0 to disable prefetching.\n\nExample:\n  sim 32 8192 4 262144 8 3 10 traces/gcc_trace.txt"
)]
struct Cli {
    /// Block size in bytes (shared by all levels).
    blocksize: u32,

    /// L1 size in bytes.
    l1_size: u32,

    /// L1 associativity.
    l1_assoc: u32,

    /// L2 size in bytes (0 disables L2).
    l2_size: u32,

    /// L2 associativity.
    l2_assoc: u32,

    /// Number of stream buffers on the last level (0 disables prefetching).
    pref_n: u32,

    /// Blocks per stream buffer.
    pref_m: u32,

    /// Trace file of `<r|w> <hex address>` lines.
    trace_file: String,

    /// Print the measurements as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            block_size: self.blocksize,
            l1: LevelConfig::new(self.l1_size, self.l1_assoc),
            l2: LevelConfig::new(self.l2_size, self.l2_assoc),
            prefetch: PrefetchConfig::new(self.pref_n, self.pref_m),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Builds the simulator, replays the trace, and prints the report.
fn run(cli: &Cli) -> Result<(), SimError> {
    let mut sim = Simulator::new(cli.config())?;
    sim.try_run(TraceReader::open(&cli.trace_file)?)?;

    if cli.json {
        match sim.stats().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", Report::new(&sim, &cli.trace_file));
    }
    Ok(())
}

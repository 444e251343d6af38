//! Simulator Tests.
//!
//! Replay of event sequences through the configured hierarchy.

use std::io::Cursor;

use cachesim_core::common::{ConfigError, TraceError};
use cachesim_core::config::{Config, LevelConfig, PrefetchConfig};
use cachesim_core::sim::{TraceEvent, TraceReader};
use cachesim_core::Simulator;

use crate::common::{init_tracing, trace_file};

fn l1_only(block_size: u32, size: u32, assoc: u32) -> Config {
    Config {
        block_size,
        l1: LevelConfig::new(size, assoc),
        l2: LevelConfig::new(0, 0),
        prefetch: PrefetchConfig::default(),
    }
}

#[test]
fn new_rejects_invalid_geometry() {
    let err = Simulator::new(l1_only(32, 96, 1)).unwrap_err();
    assert!(matches!(err, ConfigError::SetCount { level: 1, sets: 3 }));

    let config = Config {
        prefetch: PrefetchConfig::new(1, 0),
        ..Config::default()
    };
    let err = Simulator::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPrefetchWindow { streams: 1 }));
}

#[test]
fn new_keeps_the_configuration() {
    let sim = Simulator::new(Config::default()).unwrap();
    assert_eq!(sim.config(), &Config::default());
    assert_eq!(sim.events(), 0);
    assert_eq!(sim.stats().memory_traffic, 0);
}

#[test]
fn run_applies_events_in_order() {
    init_tracing();
    let mut sim = Simulator::new(l1_only(32, 8192, 4)).unwrap();

    sim.run([TraceEvent::read(0x1000), TraceEvent::write(0x1000)]);

    let stats = sim.stats();
    assert_eq!(sim.events(), 2);
    assert_eq!(stats.l1.reads, 1);
    assert_eq!(stats.l1.read_misses, 1);
    assert_eq!(stats.l1.writes, 1);
    assert_eq!(stats.l1.write_misses, 0);
    assert_eq!(stats.memory_traffic, 1);
}

/// Order matters: a write before a read leaves the block dirty.
#[test]
fn step_is_sequential() {
    let mut sim = Simulator::new(l1_only(64, 128, 1)).unwrap();

    sim.step(TraceEvent::write(0));
    sim.step(TraceEvent::read(128));

    assert_eq!(sim.stats().l1.writebacks, 1);
    assert_eq!(sim.stats().memory_traffic, 3);
}

#[test]
fn try_run_replays_a_trace_file() {
    let file = trace_file("r 0\nw 40\nr 0\n");
    let mut sim = Simulator::new(l1_only(32, 8192, 4)).unwrap();

    sim.try_run(TraceReader::open(file.path()).unwrap()).unwrap();

    assert_eq!(sim.events(), 3);
    assert_eq!(sim.stats().l1.accesses(), 3);
    assert_eq!(sim.stats().l1.misses(), 2);
}

/// Events before a bad line are applied; nothing after it is.
#[test]
fn try_run_stops_at_first_error() {
    let mut sim = Simulator::new(l1_only(32, 8192, 4)).unwrap();
    let reader = TraceReader::new(Cursor::new("r 0\nr 40\nx 60\nr 80\n"));

    let err = sim.try_run(reader).unwrap_err();

    assert!(matches!(err, TraceError::UnknownKind { line: 3, kind: 'x' }));
    assert_eq!(sim.events(), 2);
    assert_eq!(sim.stats().l1.reads, 2);
}

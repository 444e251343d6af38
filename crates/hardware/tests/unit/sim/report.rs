//! Report Rendering Tests.

use cachesim_core::config::{Config, LevelConfig, PrefetchConfig};
use cachesim_core::sim::{Report, TraceEvent};
use cachesim_core::Simulator;
use pretty_assertions::assert_eq;

fn simulate(config: Config, events: &[TraceEvent]) -> Simulator {
    let mut sim = Simulator::new(config).unwrap();
    sim.run(events.iter().copied());
    sim
}

/// L1 only: banner, one contents section, and the measurement list.
#[test]
fn single_level_report_matches_reference_layout() {
    let config = Config {
        block_size: 16,
        l1: LevelConfig::new(64, 2),
        l2: LevelConfig::new(0, 0),
        prefetch: PrefetchConfig::new(0, 0),
    };
    let sim = simulate(
        config,
        &[
            TraceEvent::write(0x00),
            TraceEvent::read(0x10),
            TraceEvent::read(0x20),
        ],
    );

    let expected = concat!(
        "===== Simulator configuration =====\n",
        "BLOCKSIZE:  16\n",
        "L1_SIZE:    64\n",
        "L1_ASSOC:   2\n",
        "L2_SIZE:    0\n",
        "L2_ASSOC:   0\n",
        "PREF_N:     0\n",
        "PREF_M:     0\n",
        "trace_file: t.trace\n",
        "\n",
        "===== L1 contents =====\n",
        "set      0:        1          0 D\n",
        "set      1:        0           \n",
        "\n",
        "===== Measurements =====\n",
        "a. L1 reads:                      2\n",
        "b. L1 read misses:                2\n",
        "c. L1 writes:                     1\n",
        "d. L1 write misses:               1\n",
        "e. L1 miss rate:                  1.0000\n",
        "f. L1 writebacks:                 0\n",
        "g. L1 prefetches:                 0\n",
        "h. L2 reads (demand):             0\n",
        "i. L2 read misses (demand):       0\n",
        "j. L2 reads (prefetch):           0\n",
        "k. L2 read misses (prefetch):     0\n",
        "l. L2 writes:                     0\n",
        "m. L2 write misses:               0\n",
        "n. L2 miss rate:                  0.0000\n",
        "o. L2 writebacks:                 0\n",
        "p. L2 prefetches:                 0\n",
        "q. memory traffic:                3\n",
    );

    assert_eq!(Report::new(&sim, "t.trace").to_string(), expected);
}

/// With L2 and stream buffers on, both levels are listed and the terminal
/// level's stream windows follow them.
#[test]
fn two_level_report_lists_stream_buffers() {
    let config = Config {
        block_size: 16,
        l1: LevelConfig::new(32, 1),
        l2: LevelConfig::new(64, 1),
        prefetch: PrefetchConfig::new(1, 2),
    };
    let sim = simulate(config, &[TraceEvent::read(0x00)]);
    let report = Report::new(&sim, "trace.txt").to_string();

    let expected_sections = concat!(
        "===== L1 contents =====\n",
        "set      0:        0  \n",
        "set      1:         \n",
        "\n",
        "===== L2 contents =====\n",
        "set      0:        0  \n",
        "set      1:         \n",
        "set      2:         \n",
        "set      3:         \n",
        "\n",
        "===== Stream Buffer(s) contents =====\n",
        "        1        2\n",
        "\n",
        "===== Measurements =====\n",
    );
    assert!(report.contains(expected_sections), "unexpected report:\n{report}");
    assert!(report.contains("trace_file: trace.txt\n"));
    assert!(report.contains("n. L2 miss rate:                  1.0000\n"));
    assert!(report.contains("p. L2 prefetches:                 2\n"));
    assert!(report.ends_with("q. memory traffic:                3\n"));
}

/// Stream buffers are not listed when prefetching is off.
#[test]
fn no_stream_section_without_prefetch() {
    let sim = simulate(Config::default(), &[TraceEvent::read(0x1000)]);
    let report = Report::new(&sim, "x").to_string();

    assert!(report.contains("===== L2 contents =====\n"));
    assert!(!report.contains("Stream Buffer"));
}

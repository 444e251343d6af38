//! Trace Parsing Tests.
//!
//! Line-level parsing, iteration over in-memory readers, and reading trace files.

use std::io::Cursor;

use cachesim_core::common::{AccessKind, TraceError};
use cachesim_core::sim::{TraceEvent, TraceReader, read_trace};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::trace_file;

// ══════════════════════════════════════════════════════════
// 1. Single lines
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("r ffe04540", AccessKind::Read, 0xffe0_4540)]
#[case("w 7b030d68", AccessKind::Write, 0x7b03_0d68)]
#[case("r 0x1000", AccessKind::Read, 0x1000)]
#[case("w 0XABCD", AccessKind::Write, 0xabcd)]
#[case("r 0", AccessKind::Read, 0)]
#[case("  w\tffffffff  ", AccessKind::Write, u32::MAX)]
fn parses_valid_lines(#[case] text: &str, #[case] kind: AccessKind, #[case] address: u32) {
    let event = TraceEvent::parse_line(1, text).unwrap();
    assert_eq!(event, Some(TraceEvent { kind, address }));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t")]
fn blank_lines_yield_nothing(#[case] text: &str) {
    assert_eq!(TraceEvent::parse_line(1, text).unwrap(), None);
}

#[rstest]
#[case("x 1000", 'x')]
#[case("R 1000", 'R')]
#[case("W 1000", 'W')]
fn unknown_request_type_is_rejected(#[case] text: &str, #[case] expected: char) {
    let err = TraceEvent::parse_line(7, text).unwrap_err();
    assert!(matches!(err, TraceError::UnknownKind { line: 7, kind } if kind == expected));
}

#[rstest]
#[case("r")]
#[case("rw 1000")]
#[case("r 1000 extra")]
#[case("r xyz")]
#[case("r 0x")]
#[case("w 100000000")]
fn malformed_lines_are_rejected(#[case] text: &str) {
    let err = TraceEvent::parse_line(3, text).unwrap_err();
    assert!(matches!(err, TraceError::Malformed { line: 3, .. }));
}

#[test]
fn constructors_set_kind() {
    assert_eq!(TraceEvent::read(4).kind, AccessKind::Read);
    assert_eq!(TraceEvent::write(4).kind, AccessKind::Write);
}

// ══════════════════════════════════════════════════════════
// 2. Readers
// ══════════════════════════════════════════════════════════

#[test]
fn reader_yields_events_in_order_and_skips_blank_lines() {
    let input = "r 10\n\nw 20\n   \nr 0x30\n";
    let events: Vec<_> = TraceReader::new(Cursor::new(input))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        events,
        vec![
            TraceEvent::read(0x10),
            TraceEvent::write(0x20),
            TraceEvent::read(0x30)
        ]
    );
}

/// Error line numbers count blank lines too.
#[test]
fn reader_reports_physical_line_numbers() {
    let input = "r 10\n\nq 20\n";
    let mut reader = TraceReader::new(Cursor::new(input));

    assert_eq!(reader.next().unwrap().unwrap(), TraceEvent::read(0x10));
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, TraceError::UnknownKind { line: 3, kind: 'q' }));
}

#[test]
fn reader_handles_missing_trailing_newline_and_crlf() {
    let input = "r 10\r\nw 20";
    let events: Vec<_> = TraceReader::new(Cursor::new(input))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(events, vec![TraceEvent::read(0x10), TraceEvent::write(0x20)]);
}

#[test]
fn read_trace_loads_a_file() {
    let file = trace_file("r ffe04540\nw ffe04544\n");
    let events = read_trace(file.path()).unwrap();

    assert_eq!(
        events,
        vec![TraceEvent::read(0xffe0_4540), TraceEvent::write(0xffe0_4544)]
    );
}

#[test]
fn read_trace_fails_on_first_bad_line() {
    let file = trace_file("r 10\nw zz\nr 20\n");
    let err = read_trace(file.path()).unwrap_err();

    assert!(matches!(err, TraceError::Malformed { line: 2, .. }));
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.trace");

    let err = TraceReader::open(&path).unwrap_err();

    assert!(matches!(err, TraceError::Open { .. }));
    assert!(err.to_string().starts_with("unable to open file"));
    assert!(err.to_string().contains("missing.trace"));
}

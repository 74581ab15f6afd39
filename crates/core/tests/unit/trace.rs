//! Trace parsing and loading tests.

use std::fs;
use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use l1sim_core::common::SimError;
use l1sim_core::sim::trace::{load_core_traces, load_trace_file, parse_line, TraceEntry, TraceOp};

#[test]
fn parses_read_and_write_lines() {
    assert_eq!(
        parse_line("R 817b08"),
        Some(TraceEntry {
            op: TraceOp::Read,
            address: 0x817b08
        })
    );
    assert_eq!(
        parse_line("W 7fffe7ff0"),
        None,
        "addresses wider than 32 bits are rejected"
    );
    assert_eq!(
        parse_line("W ff"),
        Some(TraceEntry {
            op: TraceOp::Write,
            address: 0xff
        })
    );
}

#[test]
fn accepts_optional_hex_prefix() {
    assert_eq!(parse_line("R 0x10").map(|e| e.address), Some(0x10));
    assert_eq!(parse_line("R 0X10").map(|e| e.address), Some(0x10));
}

#[test]
fn malformed_lines_are_skipped() {
    assert_eq!(parse_line(""), None);
    assert_eq!(parse_line("R"), None);
    assert_eq!(parse_line("X 10"), None);
    assert_eq!(parse_line("R zz"), None);
    assert_eq!(parse_line("# comment"), None);
    assert_eq!(parse_line("read 10"), None);
}

#[test]
fn trailing_tokens_are_ignored() {
    assert_eq!(
        parse_line("R 1f trailing junk").map(|e| e.address),
        Some(0x1f)
    );
}

#[test]
fn loads_a_trace_file_skipping_bad_lines() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "R 0").unwrap();
    writeln!(file, "bogus line").unwrap();
    writeln!(file, "W 1c").unwrap();
    writeln!(file).unwrap();
    file.flush().unwrap();

    let entries = load_trace_file(file.path()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].op, TraceOp::Read);
    assert_eq!(entries[1].address, 0x1c);
}

#[test]
fn missing_trace_file_is_an_open_error() {
    let err = load_trace_file(std::path::Path::new("/nonexistent/app_proc0.trace")).unwrap_err();
    assert!(matches!(err, SimError::TraceOpen { .. }));
}

#[test]
fn loads_one_trace_per_core_by_prefix() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("app1");
    let prefix = prefix.to_str().unwrap();
    for core in 0..4 {
        fs::write(
            format!("{}_proc{}.trace", prefix, core),
            format!("R {:x}\n", core * 4),
        )
        .unwrap();
    }

    let traces = load_core_traces(prefix, 4).unwrap();
    assert_eq!(traces.len(), 4);
    assert_eq!(traces[2][0].address, 8);
}

#[test]
fn one_missing_core_trace_fails_the_load() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("app1");
    let prefix = prefix.to_str().unwrap();
    for core in 0..3 {
        fs::write(format!("{}_proc{}.trace", prefix, core), "R 0\n").unwrap();
    }

    assert!(load_core_traces(prefix, 4).is_err());
}

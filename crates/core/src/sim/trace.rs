//! Memory-access trace parsing and loading.
//!
//! A trace file holds one access per line: `R` or `W`, whitespace, and a hex
//! address (`0x` prefix optional). Lines that do not match are silently
//! skipped; trailing tokens are ignored. Core `k` reads
//! `<prefix>_proc<k>.trace`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::{SimError, SimResult};

/// Kind of memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    Read,
    Write,
}

/// One trace entry: an access kind and a 32-bit address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    pub op: TraceOp,
    pub address: u32,
}

/// Parses one trace line; returns `None` for lines that do not match.
pub fn parse_line(line: &str) -> Option<TraceEntry> {
    let mut tokens = line.split_whitespace();
    let op = match tokens.next()? {
        "R" => TraceOp::Read,
        "W" => TraceOp::Write,
        _ => return None,
    };
    let addr = tokens.next()?;
    let addr = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let address = u32::from_str_radix(addr, 16).ok()?;
    Some(TraceEntry { op, address })
}

/// Loads one trace file, skipping malformed lines.
pub fn load_trace_file(path: &Path) -> SimResult<Vec<TraceEntry>> {
    let file = File::open(path).map_err(|source| SimError::TraceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| SimError::TraceRead {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(entry) = parse_line(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Loads `<prefix>_proc<k>.trace` for each core `k`.
pub fn load_core_traces(prefix: &str, num_cores: usize) -> SimResult<Vec<Vec<TraceEntry>>> {
    (0..num_cores)
        .map(|core| {
            let path = format!("{}_proc{}.trace", prefix, core);
            load_trace_file(Path::new(&path))
        })
        .collect()
}

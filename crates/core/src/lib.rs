//! Multi-core L1 cache simulator with a MESI snooping bus.
//!
//! This crate implements a cycle-driven simulator of per-core L1 caches kept
//! coherent over a single serializing snooping bus. It provides:
//! 1. **Coherence:** Set-associative LRU caches with MESI line states and
//!    the bus that broadcasts BusRd/BusRdX/BusUpgr transactions.
//! 2. **Timing:** Memory, writeback, and cache-to-cache transfer latencies
//!    billed on the bus, with cores stalling when they lose arbitration.
//! 3. **Simulation:** A lockstep driver consuming one memory-access trace
//!    per core, plus configuration, statistics, and report formatting.
//!
//! No data is moved: lines track tags and states only; the block size just
//! scales traffic and transfer-latency accounting.

/// Cache coherence model (caches, bus, MESI states).
pub mod coherence;
/// Common types (address decomposition, errors).
pub mod common;
/// Simulator configuration.
pub mod config;
/// Driver, trace ingestion, and report output.
pub mod sim;
/// Per-core and bus-wide statistics.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` for the reference setup.
pub use crate::config::SimConfig;
/// Lockstep simulator; construct with `Simulator::new` and call `run`.
pub use crate::sim::driver::Simulator;

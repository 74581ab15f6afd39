//! Shared test infrastructure.
//!
//! Provides a small deterministic cache geometry and trace builders so
//! scenario tests can state their expectations against hand-computed
//! numbers.

use l1sim_core::coherence::Bus;
use l1sim_core::config::SimConfig;
use l1sim_core::sim::trace::{TraceEntry, TraceOp};
use l1sim_core::Simulator;

/// A tiny geometry: 2 sets, 2-way, 4-byte blocks.
///
/// With these parameters:
///   - set index = (addr >> 2) & 1
///   - tag       = addr >> 3
///   - memory latency 100 cycles, cache-to-cache transfer 2 cycles
pub fn tiny_config(num_cores: usize) -> SimConfig {
    SimConfig {
        set_index_bits: 1,
        associativity: 2,
        block_bits: 2,
        num_cores,
        ..SimConfig::default()
    }
}

/// A read trace entry.
pub fn r(address: u32) -> TraceEntry {
    TraceEntry {
        op: TraceOp::Read,
        address,
    }
}

/// A write trace entry.
pub fn w(address: u32) -> TraceEntry {
    TraceEntry {
        op: TraceOp::Write,
        address,
    }
}

/// Builds a simulator and runs it to completion.
pub fn run(config: SimConfig, traces: Vec<Vec<TraceEntry>>) -> Simulator {
    let mut sim = Simulator::new(config, traces).expect("scenario config is valid");
    sim.run();
    sim
}

/// Ticks the bus until the in-flight transaction completes.
pub fn drain(bus: &mut Bus) {
    while bus.is_busy() {
        bus.update();
    }
}

//! Cycle-accurate simulation driver.
//!
//! The driver owns the caches, the bus, the per-core trace cursors, and the
//! global cycle counter, and advances all cores in lockstep. Each cycle it:
//! 1. Retires the in-flight bus transaction's instruction when the
//!    transaction is one cycle from completion, charging the final exec
//!    cycle to the owning core.
//! 2. Advances the bus, possibly releasing it.
//! 3. Lets each core, in ascending id order, attempt its next trace entry,
//!    mapping the cache's result onto exec/idle cycle accounting. Lower ids
//!    win bus contention within a cycle; this bias is part of the model.
//! 4. Increments the global cycle.
//!
//! A trace entry that hits retires immediately; one that misses retires in
//! step 1 of the cycle its bus service completes.

use crate::coherence::{AccessResult, Bus, Cache, Peers};
use crate::common::{SimError, SimResult};
use crate::config::SimConfig;
use crate::sim::trace::{TraceEntry, TraceOp};
use crate::stats::{BusStats, CoreStats};

/// Lockstep simulator over one trace per core.
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    caches: Vec<Cache>,
    bus: Bus,
    traces: Vec<Vec<TraceEntry>>,
    cursors: Vec<usize>,
    cycle: u64,
}

impl Simulator {
    /// Creates a simulator for the given configuration and per-core traces.
    /// `traces` must hold exactly one trace per configured core.
    pub fn new(config: SimConfig, traces: Vec<Vec<TraceEntry>>) -> SimResult<Self> {
        config.validate()?;
        if traces.len() != config.num_cores {
            return Err(SimError::Config(format!(
                "expected {} traces, got {}",
                config.num_cores,
                traces.len()
            )));
        }
        let caches = (0..config.num_cores)
            .map(|id| Cache::new(id, &config))
            .collect();
        let cursors = vec![0; config.num_cores];
        Ok(Self {
            config,
            caches,
            bus: Bus::new(),
            traces,
            cursors,
            cycle: 0,
        })
    }

    /// Simulates one cycle. Returns `false` once every core has exhausted
    /// its trace (the final bookkeeping cycle still runs).
    pub fn step(&mut self) -> bool {
        let mut work_remaining = false;

        // The last cycle of a multi-cycle bus service is when the fetched
        // instruction retires.
        if self.bus.remaining_cycles() == 1 {
            if let Some(owner) = self.bus.owner() {
                self.caches[owner].stats.exec_cycles += 1;
                self.caches[owner].stats.instructions += 1;
                self.cursors[owner] += 1;
            }
        }
        self.bus.update();

        for core in 0..self.caches.len() {
            if self.cursors[core] >= self.traces[core].len() {
                continue;
            }
            work_remaining = true;
            let entry = self.traces[core][self.cursors[core]];
            let result = self.issue(core, entry);
            let stats = &mut self.caches[core].stats;
            match result {
                AccessResult::Hit => {
                    stats.exec_cycles += 1;
                    match entry.op {
                        TraceOp::Read => stats.reads += 1,
                        TraceOp::Write => stats.writes += 1,
                    }
                    stats.instructions += 1;
                    self.cursors[core] += 1;
                }
                AccessResult::MissIssued => {
                    stats.exec_cycles += 1;
                    match entry.op {
                        TraceOp::Read => stats.reads += 1,
                        TraceOp::Write => stats.writes += 1,
                    }
                    // Retirement happens when the bus service completes.
                }
                AccessResult::BusBusyOther => {
                    stats.idle_cycles += 1;
                }
                AccessResult::BusBusySelf => {
                    // Waiting on its own transaction is billed as busy
                    // compute, not idle.
                    stats.exec_cycles += 1;
                }
            }
        }

        self.cycle += 1;
        work_remaining
    }

    /// Runs to completion (until every core's trace is exhausted).
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Hands the entry to core's cache, splitting the cache array around the
    /// requester so the bus can snoop the rest.
    fn issue(&mut self, core: usize, entry: TraceEntry) -> AccessResult {
        let (before, rest) = self.caches.split_at_mut(core);
        let (cache, after) = rest.split_first_mut().expect("core index in range");
        let mut peers = Peers { before, after };
        match entry.op {
            TraceOp::Read => cache.read(entry.address, self.cycle, &mut self.bus, &mut peers),
            TraceOp::Write => cache.write(entry.address, self.cycle, &mut self.bus, &mut peers),
        }
    }

    /// The configuration this simulator was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current global cycle (the cycle about to be simulated).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Number of simulated cores.
    pub fn num_cores(&self) -> usize {
        self.caches.len()
    }

    /// Statistics for one core.
    pub fn core_stats(&self, core: usize) -> &CoreStats {
        &self.caches[core].stats
    }

    /// Aggregate bus statistics.
    pub fn bus_stats(&self) -> &BusStats {
        &self.bus.stats
    }

    /// The cache of one core, for state inspection.
    pub fn cache(&self, core: usize) -> &Cache {
        &self.caches[core]
    }

    /// Largest per-core execution cycle count.
    pub fn max_exec_cycles(&self) -> u64 {
        self.caches
            .iter()
            .map(|c| c.stats.exec_cycles)
            .max()
            .unwrap_or(0)
    }
}

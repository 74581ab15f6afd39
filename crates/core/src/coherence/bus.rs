//! The serializing snooping bus.
//!
//! At most one memory, transfer, or writeback service is billed at a time.
//! The bus does not queue: callers gate on [`Bus::is_busy`] and
//! [`Bus::owner`] and retry on later cycles. A transaction's duration is
//! charged separately through [`Bus::add_remaining_cycles`] by whichever
//! cache knows the right latency (the requester for memory fetches, a
//! snooping peer for writebacks and cache-to-cache transfers), so nested
//! charges stack under the original owner instead of starting a new
//! transaction.

use log::{debug, trace};

use crate::coherence::Peers;
use crate::stats::BusStats;

/// Coherence transaction kinds broadcast on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusOp {
    /// Request for a read-shared copy.
    BusRd,
    /// Request for an exclusive, writable copy; invalidates peers.
    BusRdX,
    /// Upgrade of a held line to Modified without re-fetching the block.
    BusUpgr,
}

impl BusOp {
    /// Whether peers must invalidate on seeing this transaction.
    pub fn is_write(self) -> bool {
        matches!(self, BusOp::BusRdX | BusOp::BusUpgr)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BusOp::BusRd => "BusRd",
            BusOp::BusRdX => "BusRdX",
            BusOp::BusUpgr => "BusUpgr",
        }
    }
}

/// Single-transaction snooping bus shared by all caches.
#[derive(Debug)]
pub struct Bus {
    busy: bool,
    /// Cycles left on the in-flight service. Signed: a zero-duration
    /// transaction (an upgrade no peer extends) is released one cycle after
    /// broadcast with a `-1` residue, which the next charge absorbs.
    remaining: i64,
    owner: Option<usize>,
    pub stats: BusStats,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            busy: false,
            remaining: 0,
            owner: None,
            stats: BusStats::default(),
        }
    }

    /// Whether a transaction is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Core that owns the in-flight transaction, if any.
    pub fn owner(&self) -> Option<usize> {
        self.owner
    }

    /// Cycles left on the in-flight transaction (may be negative when idle).
    pub fn remaining_cycles(&self) -> i64 {
        self.remaining
    }

    /// Charges `cycles` of bus service on behalf of `core`.
    ///
    /// If the bus is idle this starts a transaction owned by `core`;
    /// otherwise the cycles stack under the existing owner. A writeback
    /// triggered inside snoop processing extends the in-flight transaction
    /// rather than claiming the bus for the snooper.
    pub fn add_remaining_cycles(&mut self, cycles: u64, core: usize) {
        self.remaining += cycles as i64;
        if self.busy {
            return;
        }
        self.busy = true;
        self.owner = Some(core);
    }

    /// Advances the bus by one cycle, releasing it when the in-flight
    /// transaction completes. Called once per cycle before any core issues.
    pub fn update(&mut self) {
        if self.busy {
            self.remaining -= 1;
            if self.remaining <= 0 {
                self.busy = false;
                self.owner = None;
                trace!("bus: transaction complete");
            }
        }
    }

    /// Broadcasts a coherence transaction to every cache except the requester.
    ///
    /// Rejected (returns `false` without snooping) if the bus is held by a
    /// different core; callers screen for this, but the bus re-checks. The
    /// requester may already own the bus from a victim writeback earlier in
    /// the same access.
    ///
    /// Peers are snooped in ascending core-id order. For reads, only the
    /// first peer holding a valid copy is asked to supply the block (and
    /// charge transfer latency); later holders still downgrade.
    ///
    /// # Returns
    ///
    /// `true` iff some peer held a valid copy of the block.
    pub fn broadcast(
        &mut self,
        op: BusOp,
        address: u32,
        requester: usize,
        peers: &mut Peers<'_>,
    ) -> bool {
        if self.busy && self.owner != Some(requester) {
            debug!(
                "bus: {} from core {} rejected, bus held by core {:?}",
                op.as_str(),
                requester,
                self.owner
            );
            return false;
        }

        self.busy = true;
        self.owner = Some(requester);

        self.stats.transactions += 1;
        match op {
            BusOp::BusRd => self.stats.bus_rd += 1,
            BusOp::BusRdX => self.stats.bus_rd_x += 1,
            BusOp::BusUpgr => self.stats.bus_upgr += 1,
        }

        let is_write = op.is_write();
        let mut any_copy = false;
        let mut data_requested = !is_write;
        for cache in peers.iter_mut() {
            if cache.snoop(address, is_write, requester, data_requested, self) {
                any_copy = true;
                data_requested = false;
            }
        }

        debug!(
            "bus: {} {:#010x} from core {} (peer copy: {})",
            op.as_str(),
            address,
            requester,
            any_copy
        );
        any_copy
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

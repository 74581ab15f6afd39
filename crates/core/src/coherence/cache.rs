//! Per-core set-associative L1 cache with MESI line states.
//!
//! Each cache services its core's reads and writes, snoops every bus
//! transaction issued by a peer, and accounts its own statistics. Lines hold
//! only a tag, a MESI state, a dirty bit, and an LRU timestamp; block data
//! is never materialized, and the configured block size only drives traffic
//! and transfer-latency accounting.

use log::debug;

use crate::coherence::bus::{Bus, BusOp};
use crate::coherence::mesi::MesiState;
use crate::coherence::Peers;
use crate::common::AddressMap;
use crate::config::SimConfig;
use crate::stats::CoreStats;

/// Outcome of one attempted cache access.
///
/// Not an error type: the driver's cycle accounting is a total function over
/// these four cases, and the busy variants mean "retry this trace entry on a
/// later cycle".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessResult {
    /// The access completed this cycle.
    Hit,
    /// The access missed; a bus transaction is now in flight and the
    /// instruction retires when it completes.
    MissIssued,
    /// The bus is held by another core; the core stalls idle.
    BusBusyOther,
    /// The bus is busy with this core's own earlier transaction.
    BusBusySelf,
}

/// One cache line: tag, coherence state, dirty bit, LRU stamp.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u32,
    state: MesiState,
    dirty: bool,
    last_access: u64,
}

/// One set of `associativity` lines.
#[derive(Clone, Debug)]
struct CacheSet {
    lines: Vec<CacheLine>,
}

/// Private L1 cache for one core.
#[derive(Debug)]
pub struct Cache {
    id: usize,
    addr_map: AddressMap,
    block_size: u32,
    mem_latency: u64,
    transfer_latency: u64,
    sets: Vec<CacheSet>,
    pub stats: CoreStats,
}

impl Cache {
    /// Creates the cache for core `id` with the configured geometry.
    pub fn new(id: usize, config: &SimConfig) -> Self {
        let sets = (0..config.num_sets())
            .map(|_| CacheSet {
                lines: vec![CacheLine::default(); config.associativity as usize],
            })
            .collect();
        Self {
            id,
            addr_map: AddressMap::new(config.set_index_bits, config.block_bits),
            block_size: config.block_size(),
            mem_latency: config.mem_latency,
            transfer_latency: config.bus_transfer_latency(),
            sets,
            stats: CoreStats::default(),
        }
    }

    /// This cache's core id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Coherence state of the line holding `address`, or `Invalid` if the
    /// block is not cached. Inspection only; does not touch LRU state.
    pub fn line_state(&self, address: u32) -> MesiState {
        let set = self.addr_map.set_index(address);
        let tag = self.addr_map.tag(address);
        match self.find_line(set, tag) {
            Some(way) => self.sets[set].lines[way].state,
            None => MesiState::Invalid,
        }
    }

    /// Dirty bit of the line holding `address`; `false` if the block is not
    /// cached. Inspection only.
    pub fn line_dirty(&self, address: u32) -> bool {
        let set = self.addr_map.set_index(address);
        let tag = self.addr_map.tag(address);
        match self.find_line(set, tag) {
            Some(way) => self.sets[set].lines[way].dirty,
            None => false,
        }
    }

    /// Way index of the valid line matching `tag` in `set`, if any.
    fn find_line(&self, set: usize, tag: u32) -> Option<usize> {
        self.sets[set]
            .lines
            .iter()
            .position(|line| line.state.is_valid() && line.tag == tag)
    }

    /// Selects the victim way for a fill: the first invalid line if one
    /// exists, otherwise the valid line with the strictly smallest LRU stamp
    /// (lowest way index wins ties).
    fn victim_way(&self, set: usize) -> usize {
        let mut victim = 0;
        let mut min_stamp = u64::MAX;
        for (way, line) in self.sets[set].lines.iter().enumerate() {
            if line.state == MesiState::Invalid {
                return way;
            }
            if line.last_access < min_stamp {
                min_stamp = line.last_access;
                victim = way;
            }
        }
        victim
    }

    /// Flushes a modified line to memory: counts the writeback, charges
    /// memory latency on the bus (stacking under the current owner), and
    /// clears the dirty bit. The line's state is left to the caller, which
    /// either overwrites it with the fill or downgrades it in the snoop.
    fn write_back(&mut self, set: usize, way: usize, bus: &mut Bus) {
        self.stats.writebacks += 1;
        self.stats.traffic_bytes += u64::from(self.block_size);
        bus.stats.traffic_bytes += u64::from(self.block_size);
        bus.add_remaining_cycles(self.mem_latency, self.id);
        self.sets[set].lines[way].dirty = false;
    }

    /// Services a read from this cache's core.
    ///
    /// On a miss the victim is selected (writing back a modified victim
    /// first), `BusRd` is broadcast, and the line fills `Shared` if a peer
    /// supplied the block or `Exclusive` after a 100-cycle memory fetch.
    pub fn read(
        &mut self,
        address: u32,
        cycle: u64,
        bus: &mut Bus,
        peers: &mut Peers<'_>,
    ) -> AccessResult {
        if bus.is_busy() && bus.owner() == Some(self.id) {
            return AccessResult::BusBusySelf;
        }

        let set = self.addr_map.set_index(address);
        let tag = self.addr_map.tag(address);

        if let Some(way) = self.find_line(set, tag) {
            self.stats.hits += 1;
            self.sets[set].lines[way].last_access = cycle;
            debug!(
                "core {}: READ {:#010x} hit way {} ({})",
                self.id,
                address,
                way,
                self.sets[set].lines[way].state
            );
            return AccessResult::Hit;
        }

        if bus.is_busy() && bus.owner() != Some(self.id) {
            return AccessResult::BusBusyOther;
        }

        self.stats.misses += 1;
        let way = self.victim_way(set);
        if self.sets[set].lines[way].state == MesiState::Modified {
            self.write_back(set, way, bus);
        }
        if self.sets[set].lines[way].state.is_valid() {
            self.stats.evictions += 1;
        }

        let supplied = bus.broadcast(BusOp::BusRd, address, self.id, peers);
        let state = if supplied {
            MesiState::Shared
        } else {
            bus.add_remaining_cycles(self.mem_latency, self.id);
            MesiState::Exclusive
        };

        self.stats.traffic_bytes += u64::from(self.block_size);
        bus.stats.traffic_bytes += u64::from(self.block_size);

        let line = &mut self.sets[set].lines[way];
        line.tag = tag;
        line.state = state;
        line.dirty = false;
        line.last_access = cycle;
        debug!(
            "core {}: READ {:#010x} miss, filled way {} ({})",
            self.id, address, way, state
        );
        AccessResult::MissIssued
    }

    /// Services a write from this cache's core.
    ///
    /// A hit in `Modified` completes locally. A hit in `Exclusive` or
    /// `Shared` must upgrade: if the bus is busy the write is retried later,
    /// otherwise `BusUpgr` is broadcast and the line moves to `Modified`. A
    /// miss broadcasts `BusRdX`, charges the full memory latency whether or
    /// not a peer held the block, and fills `Modified`.
    pub fn write(
        &mut self,
        address: u32,
        cycle: u64,
        bus: &mut Bus,
        peers: &mut Peers<'_>,
    ) -> AccessResult {
        if bus.is_busy() && bus.owner() == Some(self.id) {
            return AccessResult::BusBusySelf;
        }

        let set = self.addr_map.set_index(address);
        let tag = self.addr_map.tag(address);

        if let Some(way) = self.find_line(set, tag) {
            let state = self.sets[set].lines[way].state;
            if state != MesiState::Modified {
                if bus.is_busy() {
                    return AccessResult::BusBusyOther;
                }
                if state == MesiState::Shared {
                    self.stats.invalidations += 1;
                }
                bus.broadcast(BusOp::BusUpgr, address, self.id, peers);
                self.sets[set].lines[way].state = MesiState::Modified;
                debug!(
                    "core {}: WRITE {:#010x} hit way {} ({} -> M)",
                    self.id, address, way, state
                );
            } else {
                debug!("core {}: WRITE {:#010x} hit way {} (M)", self.id, address, way);
            }
            self.stats.hits += 1;
            let line = &mut self.sets[set].lines[way];
            line.last_access = cycle;
            line.dirty = true;
            return AccessResult::Hit;
        }

        if bus.is_busy() && bus.owner() != Some(self.id) {
            return AccessResult::BusBusyOther;
        }

        self.stats.misses += 1;
        let way = self.victim_way(set);
        if self.sets[set].lines[way].state == MesiState::Modified {
            self.write_back(set, way, bus);
        }
        if self.sets[set].lines[way].state.is_valid() {
            self.stats.evictions += 1;
        }

        let peer_had_copy = bus.broadcast(BusOp::BusRdX, address, self.id, peers);
        if peer_had_copy {
            self.stats.invalidations += 1;
        }
        // Writes always round-trip memory for the fill, even when a peer
        // held the block.
        bus.add_remaining_cycles(self.mem_latency, self.id);

        self.stats.traffic_bytes += u64::from(self.block_size);
        bus.stats.traffic_bytes += u64::from(self.block_size);

        let line = &mut self.sets[set].lines[way];
        line.tag = tag;
        line.state = MesiState::Modified;
        line.dirty = true;
        line.last_access = cycle;
        debug!("core {}: WRITE {:#010x} miss, filled way {} (M)", self.id, address, way);
        AccessResult::MissIssued
    }

    /// Reacts to a transaction broadcast by a peer.
    ///
    /// A snooped write invalidates a held line (writing it back first when
    /// modified). A snooped read downgrades `Exclusive`/`Modified` holders
    /// to `Shared`; if `data_requested` this cache additionally supplies the
    /// block, adding the block to its traffic and charging transfer latency
    /// on the bus under the requester's ownership.
    ///
    /// # Returns
    ///
    /// `true` iff this cache held a valid copy of the block.
    pub fn snoop(
        &mut self,
        address: u32,
        is_write: bool,
        requester: usize,
        data_requested: bool,
        bus: &mut Bus,
    ) -> bool {
        if requester == self.id {
            return false;
        }

        let set = self.addr_map.set_index(address);
        let tag = self.addr_map.tag(address);
        let Some(way) = self.find_line(set, tag) else {
            return false;
        };

        if is_write {
            if self.sets[set].lines[way].state == MesiState::Modified {
                self.write_back(set, way, bus);
            }
            self.sets[set].lines[way].state = MesiState::Invalid;
            debug!(
                "core {}: snoop invalidated {:#010x} (write by core {})",
                self.id, address, requester
            );
        } else {
            let state = self.sets[set].lines[way].state;
            if state == MesiState::Exclusive || state == MesiState::Modified {
                if state == MesiState::Modified {
                    self.write_back(set, way, bus);
                }
                self.sets[set].lines[way].state = MesiState::Shared;
                debug!(
                    "core {}: snoop downgraded {:#010x} ({} -> S)",
                    self.id, address, state
                );
            }
            if data_requested {
                self.stats.traffic_bytes += u64::from(self.block_size);
                bus.add_remaining_cycles(self.transfer_latency, self.id);
            }
        }
        true
    }
}

//! Configuration for the cache coherence simulator.
//!
//! This module defines the parameters of the simulated system. It provides:
//! 1. **Defaults:** Baseline geometry and timing constants.
//! 2. **Structure:** A flat config covering cache geometry, core count, and bus timing.
//! 3. **Derived values:** Block size, set count, per-core cache size, transfer latency.
//!
//! Configuration comes from CLI flags or can be deserialized from JSON;
//! `SimConfig::default()` reproduces the reference setup.

use serde::Deserialize;

use crate::common::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of set index bits (32 sets).
    pub const SET_INDEX_BITS: u32 = 5;

    /// Associativity (2-way set associative).
    pub const ASSOCIATIVITY: u32 = 2;

    /// Number of block offset bits (32-byte blocks).
    pub const BLOCK_BITS: u32 = 5;

    /// Number of cores sharing the snooping bus.
    pub const NUM_CORES: usize = 4;

    /// Main memory round-trip latency in cycles.
    pub const MEM_LATENCY: u64 = 100;

    /// Bus word width in bytes.
    pub const WORD_BYTES: u32 = 4;

    /// Cycles to move one word between caches over the bus.
    pub const WORD_TRANSFER_CYCLES: u64 = 2;
}

/// Parameters of the simulated cache hierarchy and bus.
///
/// # Examples
///
/// Creating the default configuration:
///
/// ```
/// use l1sim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.set_index_bits, 5);
/// assert_eq!(config.block_size(), 32);
/// assert_eq!(config.cache_size_kb(), 2);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use l1sim_core::config::SimConfig;
///
/// let json = r#"{ "set_index_bits": 1, "associativity": 2, "block_bits": 2, "num_cores": 2 }"#;
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.block_size(), 4);
/// assert_eq!(config.bus_transfer_latency(), 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Number of set index bits; the cache has `1 << set_index_bits` sets.
    #[serde(default = "SimConfig::default_set_index_bits")]
    pub set_index_bits: u32,

    /// Associativity (ways per set).
    #[serde(default = "SimConfig::default_associativity")]
    pub associativity: u32,

    /// Number of block offset bits; blocks are `1 << block_bits` bytes.
    #[serde(default = "SimConfig::default_block_bits")]
    pub block_bits: u32,

    /// Number of cores, each with a private L1 cache on the shared bus.
    #[serde(default = "SimConfig::default_num_cores")]
    pub num_cores: usize,

    /// Cycles charged on the bus for a main memory fetch or writeback.
    #[serde(default = "SimConfig::default_mem_latency")]
    pub mem_latency: u64,

    /// Bus word width in bytes; sizes cache-to-cache transfers.
    #[serde(default = "SimConfig::default_word_bytes")]
    pub word_bytes: u32,

    /// Cycles per word for a cache-to-cache transfer.
    #[serde(default = "SimConfig::default_word_transfer_cycles")]
    pub word_transfer_cycles: u64,
}

impl SimConfig {
    /// Returns the default number of set index bits.
    fn default_set_index_bits() -> u32 {
        defaults::SET_INDEX_BITS
    }

    /// Returns the default associativity.
    fn default_associativity() -> u32 {
        defaults::ASSOCIATIVITY
    }

    /// Returns the default number of block offset bits.
    fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Returns the default core count.
    fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }

    /// Returns the default main memory latency in cycles.
    fn default_mem_latency() -> u64 {
        defaults::MEM_LATENCY
    }

    /// Returns the default bus word width in bytes.
    fn default_word_bytes() -> u32 {
        defaults::WORD_BYTES
    }

    /// Returns the default per-word transfer cost in cycles.
    fn default_word_transfer_cycles() -> u64 {
        defaults::WORD_TRANSFER_CYCLES
    }

    /// Block size in bytes.
    pub fn block_size(&self) -> u32 {
        1 << self.block_bits
    }

    /// Number of sets per cache.
    pub fn num_sets(&self) -> u32 {
        1 << self.set_index_bits
    }

    /// Per-core cache capacity in kilobytes.
    pub fn cache_size_kb(&self) -> u32 {
        self.num_sets() * self.associativity * self.block_size() / 1024
    }

    /// Cycles charged on the bus when one cache supplies a block to another.
    pub fn bus_transfer_latency(&self) -> u64 {
        self.word_transfer_cycles * u64::from(self.block_size() / self.word_bytes)
    }

    /// Checks that the geometry leaves room for a tag and that every
    /// structural parameter is non-degenerate.
    pub fn validate(&self) -> SimResult<()> {
        if self.associativity == 0 {
            return Err(SimError::Config("associativity must be at least 1".into()));
        }
        if self.num_cores == 0 {
            return Err(SimError::Config("core count must be at least 1".into()));
        }
        if self.set_index_bits + self.block_bits >= 32 {
            return Err(SimError::Config(format!(
                "set index bits ({}) + block bits ({}) leave no tag bits in a 32-bit address",
                self.set_index_bits, self.block_bits
            )));
        }
        if self.word_bytes == 0 || self.block_size() % self.word_bytes != 0 {
            return Err(SimError::Config(format!(
                "bus word width ({} bytes) must divide the block size ({} bytes)",
                self.word_bytes,
                self.block_size()
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            set_index_bits: defaults::SET_INDEX_BITS,
            associativity: defaults::ASSOCIATIVITY,
            block_bits: defaults::BLOCK_BITS,
            num_cores: defaults::NUM_CORES,
            mem_latency: defaults::MEM_LATENCY,
            word_bytes: defaults::WORD_BYTES,
            word_transfer_cycles: defaults::WORD_TRANSFER_CYCLES,
        }
    }
}

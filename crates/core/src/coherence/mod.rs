//! Cache coherence model: per-core caches and the shared snooping bus.
//!
//! The driver owns both the cache array and the bus; a cache never holds a
//! reference to its peers. When core `i` accesses memory, the driver splits
//! the cache array around index `i` and hands the remainder to the bus as
//! [`Peers`], which preserves registration order for snoop delivery.

/// Per-core set-associative cache with MESI line states.
pub mod cache;
/// The serializing snooping bus.
pub mod bus;
/// MESI line states.
pub mod mesi;

pub use bus::{Bus, BusOp};
pub use cache::{AccessResult, Cache};
pub use mesi::MesiState;

/// The caches other than the requester, split around its index.
///
/// Iteration runs `before` then `after`, i.e. ascending core id with the
/// requester skipped, which is the order snoops are delivered in.
pub struct Peers<'a> {
    pub before: &'a mut [Cache],
    pub after: &'a mut [Cache],
}

impl<'a> Peers<'a> {
    /// Iterates the peer caches in ascending core-id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cache> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    /// An empty peer set, for single-cache use.
    pub fn none() -> Peers<'static> {
        Peers {
            before: &mut [],
            after: &mut [],
        }
    }
}

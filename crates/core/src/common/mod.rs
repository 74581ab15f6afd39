//! Common types shared across the simulator (address decomposition, errors).

/// Address decomposition into tag, set index, and block offset.
pub mod addr;
/// Simulator error types.
pub mod error;

pub use addr::AddressMap;
pub use error::{SimError, SimResult};

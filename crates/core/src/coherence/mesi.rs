//! MESI line states.

use std::fmt;

/// Coherence state of one cache line.
///
/// A line is valid iff its state is not `Invalid`. Across all caches, a block
/// has at most one `Modified` or `Exclusive` holder, and never a `Modified`
/// or `Exclusive` holder alongside `Shared` copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MesiState {
    Modified,
    Exclusive,
    Shared,
    #[default]
    Invalid,
}

impl MesiState {
    /// Whether the line holds a usable copy of its block.
    pub fn is_valid(self) -> bool {
        self != MesiState::Invalid
    }

    /// Single-letter name used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            MesiState::Modified => "M",
            MesiState::Exclusive => "E",
            MesiState::Shared => "S",
            MesiState::Invalid => "I",
        }
    }
}

impl fmt::Display for MesiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

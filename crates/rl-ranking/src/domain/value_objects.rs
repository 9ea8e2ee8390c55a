//! Value objects for the rank list
//!
//! Vote counts, ranks and bid amounts are plain unsigned integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type aliases for clarity
pub type VoteCount = u32;
pub type Amount = u32;

/// Stable identifier of a ranked event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// 1-based position in the ranked list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl Rank {
    /// Top of the list
    pub const FIRST: Rank = Rank(1);

    pub fn new(rank: u32) -> Self {
        Self(rank)
    }

    /// Rank 0 is never a valid position
    pub fn is_valid(&self) -> bool {
        self.0 >= 1
    }

    /// Zero-based index into a ranked sequence
    pub fn index(&self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    /// Rank of the element stored at a zero-based index.
    ///
    /// `None` past the last representable rank.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .map(Self)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Rank {
    fn from(rank: u32) -> Self {
        Self(rank)
    }
}

//! Error types for the rank list

use super::value_objects::{Amount, EventId, Rank};
use thiserror::Error;

/// All errors that can occur while ranking or buying a rank
#[derive(Debug, Error)]
pub enum RankingError {
    /// A winning purchase references an event missing from the snapshot
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// Two events in one snapshot share an id
    #[error("Duplicate event id: {0}")]
    DuplicateEvent(EventId),

    /// Purchase targets an event that does not exist
    #[error("Unknown event: {0}")]
    UnknownEvent(EventId),

    /// Requested slice is outside the ranked list
    #[error("Invalid range [{start}, {end}] for list of {len}")]
    InvalidRange { start: u32, end: u32, len: usize },

    /// Rank outside 1..=max_rank
    #[error("Invalid rank {rank}: must be within 1..={max}")]
    InvalidRank { rank: u32, max: u32 },

    /// Snapshot exceeds configured limits
    #[error("Snapshot too large: {what} {count} > {max}")]
    SnapshotTooLarge {
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// Purchase rejected at admission
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    /// Storage collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RankingError {
    /// Data-integrity and storage faults, as opposed to caller mistakes.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RankingError::EventNotFound(_)
                | RankingError::DuplicateEvent(_)
                | RankingError::SnapshotTooLarge { .. }
                | RankingError::Store(_)
        )
    }

    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            RankingError::EventNotFound(_) => "event_not_found",
            RankingError::DuplicateEvent(_) => "duplicate_event",
            RankingError::UnknownEvent(_) => "unknown_event",
            RankingError::InvalidRange { .. } => "invalid_range",
            RankingError::InvalidRank { .. } => "invalid_rank",
            RankingError::SnapshotTooLarge { .. } => "snapshot_too_large",
            RankingError::Admission(_) => "amount_not_enough",
            RankingError::Store(_) => "store",
        }
    }
}

/// Outcome of the purchase admission check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("Amount not enough for rank {rank}: offered {offered}, current {current}")]
    AmountNotEnough {
        rank: Rank,
        current: Amount,
        offered: Amount,
    },
}

/// Storage adapter error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}

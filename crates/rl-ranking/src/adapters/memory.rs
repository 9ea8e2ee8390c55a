//! In-memory storage adapters
//!
//! Implement `EventStore` and `PurchaseStore` over vectors, preserving
//! insertion order. Used by tests and the CLI.

use crate::algorithms::{admit, max_amount_for_rank};
use crate::domain::entities::{Event, PurchaseBid};
use crate::domain::errors::{RankingError, StoreError};
use crate::domain::value_objects::{EventId, VoteCount};
use crate::ports::outbound::{EventStore, PurchaseStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

/// In-memory event table.
pub struct InMemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Seed with events in storage order.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Append an event, or replace the stored one with the same id.
    pub fn upsert(&self, event: Event) {
        let mut events = self.events.write();
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
    }

    /// Overwrite a vote count. Returns false when the event is unknown.
    pub fn set_votes(&self, id: EventId, vote_count: VoteCount) -> bool {
        let mut events = self.events.write();
        match events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.vote_count = vote_count;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn all_events(&self) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read();
        debug!(count = events.len(), "[rl] Snapshot of events");
        Ok(events.clone())
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().iter().find(|e| e.id == id).cloned())
    }
}

/// In-memory bid ledger, in admission order.
pub struct InMemoryPurchaseStore {
    bids: RwLock<Vec<PurchaseBid>>,
}

impl InMemoryPurchaseStore {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            bids: RwLock::new(Vec::new()),
        }
    }

    /// Seed with bids that are taken as already admitted.
    pub fn with_bids(bids: Vec<PurchaseBid>) -> Self {
        Self {
            bids: RwLock::new(bids),
        }
    }

    pub fn len(&self) -> usize {
        self.bids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.read().is_empty()
    }
}

impl Default for InMemoryPurchaseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseStore for InMemoryPurchaseStore {
    async fn all_bids(&self) -> Result<Vec<PurchaseBid>, StoreError> {
        let bids = self.bids.read();
        debug!(count = bids.len(), "[rl] Snapshot of bids");
        Ok(bids.clone())
    }

    async fn admit_bid(&self, bid: PurchaseBid) -> Result<(), RankingError> {
        // Write lock spans check and append.
        let mut bids = self.bids.write();
        admit(&bid, max_amount_for_rank(&bids, bid.rank))?;

        debug!(
            rank = bid.rank.0,
            amount = bid.amount,
            event_id = bid.event_id.0,
            "[rl] Bid admitted"
        );
        bids.push(bid);
        Ok(())
    }
}

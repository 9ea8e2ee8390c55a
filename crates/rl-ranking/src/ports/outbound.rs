//! Outbound Ports (Driven Ports / SPI)
//!
//! Storage collaborators. The core only needs snapshots materialised in
//! memory; how they are persisted is up to the adapter.

use crate::domain::entities::{Event, PurchaseBid};
use crate::domain::errors::{RankingError, StoreError};
use crate::domain::value_objects::EventId;
use async_trait::async_trait;

/// Event storage
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events with their current vote counts, in storage order.
    ///
    /// Storage order decides ties between equal vote counts.
    async fn all_events(&self) -> Result<Vec<Event>, StoreError>;

    /// Look up one event.
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError>;
}

/// Purchase bid storage
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// All admitted bids, in admission order.
    async fn all_bids(&self) -> Result<Vec<PurchaseBid>, StoreError>;

    /// Run admission and append the bid as one atomic step.
    ///
    /// On rejection the store is left unchanged.
    async fn admit_bid(&self, bid: PurchaseBid) -> Result<(), RankingError>;
}

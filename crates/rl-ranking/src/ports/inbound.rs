//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{Event, PurchaseBid, RankedList, ResolvedRankMap};
use crate::domain::errors::RankingError;
use crate::domain::value_objects::{Amount, EventId, Rank};
use async_trait::async_trait;

/// Primary Rank List API
#[async_trait]
pub trait RankingApi: Send + Sync {
    /// Rank every stored event.
    ///
    /// This is the main read path. It:
    /// 1. Fetches all events and all admitted bids
    /// 2. Resolves one winning bid per rank
    /// 3. Merges pins into the vote-sorted events
    async fn ranked_events(&self) -> Result<RankedList, RankingError>;

    /// Rank every stored event and keep the inclusive 1-based `[start, end]`.
    async fn ranked_range(&self, start: u32, end: u32) -> Result<RankedList, RankingError>;

    /// Buy a rank for an event.
    ///
    /// Rejected with `AmountNotEnough` unless `amount` strictly exceeds
    /// every bid already admitted for `rank`.
    async fn buy_rank(
        &self,
        event_id: EventId,
        rank: Rank,
        amount: Amount,
    ) -> Result<PurchaseBid, RankingError>;

    /// Collapse bids into one winner per rank. Pure.
    fn resolve_purchases(&self, bids: &[PurchaseBid]) -> ResolvedRankMap;

    /// Merge a snapshot with resolved pins. Pure.
    fn merge_ranking(
        &self,
        events: &[Event],
        rank_map: &ResolvedRankMap,
    ) -> Result<RankedList, RankingError>;
}

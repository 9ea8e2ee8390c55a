//! Ranking Service
//!
//! Main service implementing RankingApi over the storage ports.

use crate::algorithms::{merge, resolve};
use crate::config::RankingConfig;
use crate::domain::entities::{Event, PurchaseBid, RankedList, ResolvedRankMap};
use crate::domain::errors::RankingError;
use crate::domain::value_objects::{Amount, EventId, Rank};
use crate::ports::inbound::RankingApi;
use crate::ports::outbound::{EventStore, PurchaseStore};
use async_trait::async_trait;
use rl_telemetry::{
    log_event, metric_inc, time_histogram, BIDS_ADMITTED, BIDS_REJECTED, RANKED_EVENTS,
    RANKINGS_COMPUTED, RANKING_DURATION, RANKING_ERRORS,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Rank List Service
///
/// Read path:
/// 1. Snapshot events and admitted bids
/// 2. Validate snapshot size
/// 3. Resolve one winner per rank
/// 4. Merge pins into the vote order
///
/// Write path runs admission before a bid is stored.
pub struct RankingService<E, P> {
    events: Arc<E>,
    purchases: Arc<P>,
    config: RankingConfig,
}

impl<E: EventStore, P: PurchaseStore> RankingService<E, P> {
    /// Create a new service with default config
    pub fn new(events: Arc<E>, purchases: Arc<P>) -> Self {
        Self::with_config(events, purchases, RankingConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(events: Arc<E>, purchases: Arc<P>, config: RankingConfig) -> Self {
        Self {
            events,
            purchases,
            config,
        }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Validate snapshot sizes against limits and event id uniqueness
    fn validate_snapshot(
        &self,
        events: &[Event],
        bids: &[PurchaseBid],
    ) -> Result<(), RankingError> {
        if events.len() > self.config.max_event_count {
            return Err(RankingError::SnapshotTooLarge {
                what: "events",
                count: events.len(),
                max: self.config.max_event_count,
            });
        }

        if bids.len() > self.config.max_bid_count {
            return Err(RankingError::SnapshotTooLarge {
                what: "bids",
                count: bids.len(),
                max: self.config.max_bid_count,
            });
        }

        let mut seen = HashSet::with_capacity(events.len());
        if let Some(dup) = events.iter().find(|e| !seen.insert(e.id)) {
            return Err(RankingError::DuplicateEvent(dup.id));
        }

        Ok(())
    }

    fn validate_rank(&self, rank: Rank) -> Result<(), RankingError> {
        if !rank.is_valid() || rank.0 > self.config.max_rank {
            return Err(RankingError::InvalidRank {
                rank: rank.0,
                max: self.config.max_rank,
            });
        }
        Ok(())
    }

    async fn rank_snapshot(&self) -> Result<RankedList, RankingError> {
        let events = self.events.all_events().await?;
        let bids = self.purchases.all_bids().await?;
        self.validate_snapshot(&events, &bids)?;

        let _timer = time_histogram!(RANKING_DURATION);
        let rank_map = self.resolve_purchases(&bids);
        debug!(
            bid_count = bids.len(),
            pinned_ranks = rank_map.len(),
            "Resolved purchases"
        );

        let ranked = self.merge_ranking(&events, &rank_map)?;

        metric_inc!(RANKINGS_COMPUTED);
        RANKED_EVENTS.set(ranked.len() as f64);
        info!(
            event_count = ranked.len(),
            pinned_ranks = rank_map.len(),
            "Ranking complete"
        );

        Ok(ranked)
    }

    async fn admit_purchase(
        &self,
        event_id: EventId,
        rank: Rank,
        amount: Amount,
    ) -> Result<PurchaseBid, RankingError> {
        self.validate_rank(rank)?;

        if self.events.get_event(event_id).await?.is_none() {
            return Err(RankingError::UnknownEvent(event_id));
        }

        let bid = PurchaseBid {
            rank,
            amount,
            event_id,
        };
        self.purchases.admit_bid(bid).await?;

        metric_inc!(BIDS_ADMITTED);
        log_event!(
            info,
            "purchase",
            "Bid admitted",
            rank = rank.0,
            amount = amount,
            event_id = event_id.0
        );

        Ok(bid)
    }
}

fn record_failure(operation: &str, err: &RankingError) {
    metric_inc!(RANKING_ERRORS, &[operation, err.kind()]);

    match err {
        RankingError::Admission(rejection) => {
            metric_inc!(BIDS_REJECTED);
            log_event!(warn, "purchase", "Bid rejected", reason = %rejection);
        }
        e if e.is_internal() => {
            error!(operation, error = %e, "Ranking failed");
        }
        e => {
            debug!(operation, error = %e, "Request rejected");
        }
    }
}

#[async_trait]
impl<E: EventStore, P: PurchaseStore> RankingApi for RankingService<E, P> {
    async fn ranked_events(&self) -> Result<RankedList, RankingError> {
        self.rank_snapshot()
            .await
            .inspect_err(|e| record_failure("rank", e))
    }

    async fn ranked_range(&self, start: u32, end: u32) -> Result<RankedList, RankingError> {
        self.rank_snapshot()
            .await
            .and_then(|ranked| ranked.slice(start, end))
            .inspect_err(|e| record_failure("rank_range", e))
    }

    async fn buy_rank(
        &self,
        event_id: EventId,
        rank: Rank,
        amount: Amount,
    ) -> Result<PurchaseBid, RankingError> {
        self.admit_purchase(event_id, rank, amount)
            .await
            .inspect_err(|e| record_failure("buy", e))
    }

    fn resolve_purchases(&self, bids: &[PurchaseBid]) -> ResolvedRankMap {
        resolve(bids)
    }

    fn merge_ranking(
        &self,
        events: &[Event],
        rank_map: &ResolvedRankMap,
    ) -> Result<RankedList, RankingError> {
        merge(events, rank_map)
    }
}

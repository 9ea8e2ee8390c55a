//! RL-Rank: rank a stored snapshot from the command line
//!
//! Loads events and admitted bids from a JSON file, optionally submits new
//! bids through purchase admission, and prints the resulting ranking.
//!
//! ```text
//! {
//!   "events": [{ "id": 1, "name": "first", "keyword": "misc", "vote_count": 3 }],
//!   "bids":   [{ "rank": 1, "amount": 100, "event_id": 1 }]
//! }
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use rl_ranking::{
    Amount, Event, EventId, InMemoryEventStore, InMemoryPurchaseStore, PurchaseBid, Rank,
    RankedList, RankingConfig, RankingService,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Events and admitted bids as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub bids: Vec<PurchaseBid>,
    #[serde(default)]
    pub config: Option<RankingConfig>,
}

impl Snapshot {
    /// Read a snapshot file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
    }

    /// Build a service over in-memory stores seeded from this snapshot
    pub fn into_service(self) -> RankingService<InMemoryEventStore, InMemoryPurchaseStore> {
        RankingService::with_config(
            Arc::new(InMemoryEventStore::with_events(self.events)),
            Arc::new(InMemoryPurchaseStore::with_bids(self.bids)),
            self.config.unwrap_or_default(),
        )
    }
}

/// A `--buy EVENT:RANK:AMOUNT` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyOrder {
    pub event_id: EventId,
    pub rank: Rank,
    pub amount: Amount,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBuyError {
    #[error("expected EVENT:RANK:AMOUNT, got {0:?}")]
    Shape(String),

    #[error("invalid number {0:?}")]
    Number(String),
}

impl FromStr for BuyOrder {
    type Err = ParseBuyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [event, rank, amount] = parts.as_slice() else {
            return Err(ParseBuyError::Shape(s.to_string()));
        };

        let number = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|_| ParseBuyError::Number(v.to_string()))
        };

        Ok(BuyOrder {
            event_id: EventId::new(number(*event)?),
            rank: Rank::new(number(*rank)?),
            amount: number(*amount)?,
        })
    }
}

/// Plain-text table, one line per rank
pub fn render_text(list: &RankedList, first_rank: u32) -> String {
    let mut out = String::new();
    for (offset, event) in list.events.iter().enumerate() {
        let rank = first_rank as usize + offset;
        let _ = writeln!(
            out,
            "{:>4}  id={:<6} votes={:<6} {} [{}]",
            rank, event.id.0, event.vote_count, event.name, event.keyword
        );
    }
    out
}

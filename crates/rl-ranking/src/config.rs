//! Configuration for the rank list service

use serde::{Deserialize, Serialize};

/// Ranking configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum events ranked in one snapshot
    pub max_event_count: usize,
    /// Maximum admitted bids considered in one snapshot
    pub max_bid_count: usize,
    /// Highest rank a bid may target
    pub max_rank: u32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_event_count: 100_000,
            max_bid_count: 100_000,
            max_rank: 1_000,
        }
    }
}

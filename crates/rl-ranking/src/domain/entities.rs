//! Core entities for the rank list

use super::errors::RankingError;
use super::value_objects::{Amount, EventId, Rank, VoteCount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An event competing for a place in the list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier
    pub id: EventId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Category keyword
    #[serde(default)]
    pub keyword: String,
    /// Votes earned so far
    pub vote_count: VoteCount,
}

impl Event {
    pub fn new(id: impl Into<EventId>, vote_count: VoteCount) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            keyword: String::new(),
            vote_count,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }
}

/// A purchase of an explicit rank position for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseBid {
    /// Target position (1-based)
    pub rank: Rank,
    /// Amount paid
    pub amount: Amount,
    /// Event being promoted
    pub event_id: EventId,
}

impl PurchaseBid {
    pub fn new(rank: impl Into<Rank>, amount: Amount, event_id: impl Into<EventId>) -> Self {
        Self {
            rank: rank.into(),
            amount,
            event_id: event_id.into(),
        }
    }
}

/// Winning event per purchased rank.
///
/// Ordered by rank so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRankMap {
    pins: BTreeMap<Rank, EventId>,
}

impl ResolvedRankMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rank: Rank, event_id: EventId) -> Option<EventId> {
        self.pins.insert(rank, event_id)
    }

    pub fn get(&self, rank: Rank) -> Option<EventId> {
        self.pins.get(&rank).copied()
    }

    pub fn contains_rank(&self, rank: Rank) -> bool {
        self.pins.contains_key(&rank)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Pins in ascending rank order
    pub fn iter(&self) -> impl Iterator<Item = (Rank, EventId)> + '_ {
        self.pins.iter().map(|(rank, id)| (*rank, *id))
    }
}

impl FromIterator<(Rank, EventId)> for ResolvedRankMap {
    fn from_iter<I: IntoIterator<Item = (Rank, EventId)>>(iter: I) -> Self {
        Self {
            pins: iter.into_iter().collect(),
        }
    }
}

/// Final ordering of events, position 1 first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedList {
    pub events: Vec<Event>,
}

impl RankedList {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at a 1-based rank
    pub fn at(&self, rank: Rank) -> Option<&Event> {
        rank.index().and_then(|i| self.events.get(i))
    }

    /// Identifiers in ranked order
    pub fn ids(&self) -> Vec<EventId> {
        self.events.iter().map(|e| e.id).collect()
    }

    /// Inclusive 1-based range `[start, end]`.
    pub fn slice(&self, start: u32, end: u32) -> Result<RankedList, RankingError> {
        let len = self.events.len();
        if start < 1 || start > end || end as usize > len {
            return Err(RankingError::InvalidRange { start, end, len });
        }

        let from = (start - 1) as usize;
        let to = end as usize;
        Ok(RankedList::new(self.events[from..to].to_vec()))
    }
}

impl IntoIterator for RankedList {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

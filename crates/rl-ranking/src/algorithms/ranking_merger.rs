//! Ranking Merger
//!
//! Splices purchased pins into the vote-sorted event sequence.
//! O(N log N) for the sort, O(N + B) for the merge.
//!
//! Pins take effect when their rank is within the list and it is the
//! lowest rank won by their event. Every other slot takes the next
//! vote-sorted event that is neither placed nor reserved by a pin.

use crate::domain::entities::{Event, RankedList, ResolvedRankMap};
use crate::domain::errors::RankingError;
use crate::domain::invariants::{check_all_invariants, effective_pins};
use crate::domain::value_objects::{EventId, Rank};
use std::collections::{HashMap, HashSet};

/// Sort by votes descending. Stable: equal votes keep input order.
pub fn sort_by_votes(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
    sorted
}

/// Merge events with resolved pins into the final ranking.
///
/// Fails with [`RankingError::DuplicateEvent`] when two events share an id,
/// and with [`RankingError::EventNotFound`] when an in-range pin names an
/// event missing from `events`.
pub fn merge(events: &[Event], rank_map: &ResolvedRankMap) -> Result<RankedList, RankingError> {
    let sorted = sort_by_votes(events);
    let ranked = merge_sorted(&sorted, rank_map)?;

    debug_assert!(check_all_invariants(events, &sorted, &ranked, rank_map));
    Ok(ranked)
}

/// Merge against an already vote-sorted sequence.
pub fn merge_sorted(
    sorted: &[Event],
    rank_map: &ResolvedRankMap,
) -> Result<RankedList, RankingError> {
    let len = sorted.len();
    let mut by_id: HashMap<EventId, &Event> = HashMap::with_capacity(len);
    for event in sorted {
        if by_id.insert(event.id, event).is_some() {
            return Err(RankingError::DuplicateEvent(event.id));
        }
    }

    // Resolve pins up front so a bad id aborts before any output exists.
    let mut pinned: HashMap<Rank, &Event> = HashMap::new();
    for (rank, id) in effective_pins(rank_map, len) {
        let event = by_id
            .get(&id)
            .copied()
            .ok_or(RankingError::EventNotFound(id))?;
        pinned.insert(rank, event);
    }
    let reserved: HashSet<EventId> = pinned.values().map(|e| e.id).collect();

    let mut placed: HashSet<EventId> = HashSet::with_capacity(len);
    let mut result: Vec<Event> = Vec::with_capacity(len);
    let mut remainder = sorted.iter();

    for index in 0..len {
        let pin = Rank::from_index(index).and_then(|rank| pinned.get(&rank));

        if let Some(event) = pin {
            placed.insert(event.id);
            result.push((*event).clone());
            continue;
        }

        let next = remainder
            .by_ref()
            .find(|e| !reserved.contains(&e.id) && !placed.contains(&e.id));
        if let Some(event) = next {
            placed.insert(event.id);
            result.push(event.clone());
        }
    }

    // Anything still unplaced keeps its vote order at the tail.
    for event in sorted {
        if placed.insert(event.id) {
            result.push(event.clone());
        }
    }

    Ok(RankedList::new(result))
}

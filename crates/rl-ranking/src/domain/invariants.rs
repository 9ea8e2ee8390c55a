//! Domain invariants for the rank list
//!
//! Each check takes the merge inputs and its output and reports whether
//! the property holds. Used by debug assertions in the merger and by tests.

use super::entities::{Event, RankedList, ResolvedRankMap};
use super::value_objects::{EventId, Rank};
use std::collections::{HashMap, HashSet};

/// INVARIANT-1: Uniqueness & Totality
/// Every input event appears exactly once and nothing else appears.
pub fn invariant_unique_and_total(input: &[Event], output: &RankedList) -> bool {
    if input.len() != output.len() {
        return false;
    }

    let mut seen: HashSet<EventId> = HashSet::with_capacity(output.len());
    for event in &output.events {
        if !seen.insert(event.id) {
            return false;
        }
    }

    input.iter().all(|e| seen.contains(&e.id))
}

/// Pins that take effect: within the list bounds and the lowest rank
/// claimed by their event.
pub fn effective_pins(rank_map: &ResolvedRankMap, len: usize) -> Vec<(Rank, EventId)> {
    let mut claimed: HashSet<EventId> = HashSet::new();

    rank_map
        .iter()
        .filter(|(rank, _)| rank.index().map_or(false, |i| i < len))
        .filter(|(_, id)| claimed.insert(*id))
        .collect()
}

/// INVARIANT-2: Purchase Pins
/// Each effective pin holds its winning event at its rank.
pub fn invariant_pins_honored(output: &RankedList, rank_map: &ResolvedRankMap) -> bool {
    effective_pins(rank_map, output.len())
        .into_iter()
        .all(|(rank, id)| output.at(rank).map(|e| e.id) == Some(id))
}

/// INVARIANT-3: Vote Order
/// With pinned events removed from both, the output matches the
/// vote-sorted input in relative order.
pub fn invariant_vote_order(
    sorted_input: &[Event],
    output: &RankedList,
    rank_map: &ResolvedRankMap,
) -> bool {
    let pinned: HashSet<EventId> = effective_pins(rank_map, output.len())
        .into_iter()
        .map(|(_, id)| id)
        .collect();

    let expected = sorted_input
        .iter()
        .map(|e| e.id)
        .filter(|id| !pinned.contains(id));
    let actual = output.events.iter().map(|e| e.id).filter(|id| !pinned.contains(id));

    expected.eq(actual)
}

/// INVARIANT-4: Sorted Input
/// Votes never increase along the sequence, and equal-vote events keep
/// their original relative order.
pub fn invariant_stable_vote_sort(original: &[Event], sorted: &[Event]) -> bool {
    let position: HashMap<EventId, usize> = original
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id, i))
        .collect();

    sorted.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        a.vote_count > b.vote_count
            || (a.vote_count == b.vote_count && position.get(&a.id) < position.get(&b.id))
    })
}

/// Check all merge invariants
pub fn check_all_invariants(
    input: &[Event],
    sorted_input: &[Event],
    output: &RankedList,
    rank_map: &ResolvedRankMap,
) -> bool {
    invariant_unique_and_total(input, output)
        && invariant_pins_honored(output, rank_map)
        && invariant_vote_order(sorted_input, output, rank_map)
        && invariant_stable_vote_sort(input, sorted_input)
}

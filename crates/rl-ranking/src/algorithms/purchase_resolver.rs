//! Purchase Resolver
//!
//! Collapses all bids for the same rank into one winner. The first bid
//! recorded for a rank stands until a later bid offers strictly more;
//! equal amounts never overwrite. O(B) over the bids.

use crate::domain::entities::{PurchaseBid, ResolvedRankMap};
use crate::domain::value_objects::Rank;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Winning bid per rank, keeping amounts.
pub fn winning_bids(bids: &[PurchaseBid]) -> BTreeMap<Rank, PurchaseBid> {
    let mut winners: BTreeMap<Rank, PurchaseBid> = BTreeMap::new();

    for bid in bids {
        match winners.entry(bid.rank) {
            Entry::Vacant(slot) => {
                slot.insert(*bid);
            }
            Entry::Occupied(mut slot) => {
                if bid.amount > slot.get().amount {
                    slot.insert(*bid);
                }
            }
        }
    }

    winners
}

/// Resolve bids into the rank -> event map consumed by the merger.
pub fn resolve(bids: &[PurchaseBid]) -> ResolvedRankMap {
    winning_bids(bids)
        .into_iter()
        .map(|(rank, bid)| (rank, bid.event_id))
        .collect()
}

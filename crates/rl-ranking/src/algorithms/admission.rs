//! Purchase Admission
//!
//! Write-time gate in front of the resolver: a new bid must strictly
//! exceed every bid already admitted for its rank.

use crate::domain::entities::PurchaseBid;
use crate::domain::errors::AdmissionError;
use crate::domain::value_objects::{Amount, Rank};

/// Highest admitted amount for a rank, if any bid targets it.
pub fn max_amount_for_rank(bids: &[PurchaseBid], rank: Rank) -> Option<Amount> {
    bids.iter()
        .filter(|bid| bid.rank == rank)
        .map(|bid| bid.amount)
        .max()
}

/// Check a new bid against the current maximum for its rank.
pub fn admit(bid: &PurchaseBid, current_max: Option<Amount>) -> Result<(), AdmissionError> {
    match current_max {
        Some(current) if current >= bid.amount => Err(AdmissionError::AmountNotEnough {
            rank: bid.rank,
            current,
            offered: bid.amount,
        }),
        _ => Ok(()),
    }
}

//! Algorithms module for the rank list
//!
//! Contains:
//! - Purchase resolution (one winner per rank)
//! - Ranking merge (vote order with purchased pins)
//! - Purchase admission (strictly-greater check)

pub mod admission;
pub mod purchase_resolver;
pub mod ranking_merger;

pub use admission::{admit, max_amount_for_rank};
pub use purchase_resolver::{resolve, winning_bids};
pub use ranking_merger::{merge, merge_sorted, sort_by_votes};

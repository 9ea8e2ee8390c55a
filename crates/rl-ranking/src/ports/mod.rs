//! Ports module for the rank list
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::RankingApi;
pub use outbound::{EventStore, PurchaseStore};

//! # Rank List
//!
//! Orders events by earned votes while honoring purchased rank slots.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (Event, PurchaseBid, ResolvedRankMap, RankedList)
//! - **Algorithms**: Purchase resolution, ranking merge, purchase admission
//! - **Ports**: Inbound (RankingApi) and Outbound (EventStore, PurchaseStore)
//! - **Adapters**: In-memory stores
//! - **Application**: Service orchestration
//!
//! ## Ranking rules
//!
//! - Events are sorted by votes descending; equal votes keep storage order
//! - For each rank, the highest bid wins; on equal amounts the first bid stands
//! - A winning bid pins its event at that rank; all other ranks are filled
//!   in vote order, skipping pinned events
//! - Every event appears exactly once

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryEventStore, InMemoryPurchaseStore};
pub use application::service::RankingService;
pub use config::RankingConfig;
pub use domain::entities::*;
pub use domain::errors::{AdmissionError, RankingError, StoreError};
pub use domain::value_objects::*;
pub use ports::inbound::RankingApi;
pub use ports::outbound::{EventStore, PurchaseStore};

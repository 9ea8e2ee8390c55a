//! # Integration Test Flows
//!
//! Drives `RankingService` over the in-memory adapters:
//!
//! 1. **Read path**: stored events + stored bids -> ranked list
//! 2. **Write path**: buy -> admission -> ledger -> next read
//! 3. **Range reads**: inclusive 1-based slicing of the full ranking

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use rl_ranking::domain::invariants::{
        invariant_pins_honored, invariant_unique_and_total, invariant_vote_order,
    };
    use rl_ranking::{
        algorithms::{resolve, sort_by_votes},
        AdmissionError, Event, EventId, EventStore, InMemoryEventStore, InMemoryPurchaseStore,
        PurchaseBid, PurchaseStore, Rank, RankedList, RankingApi, RankingError, RankingService,
        StoreError,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn four_events() -> Vec<Event> {
        vec![
            Event::new(1, 1).with_name("first").with_keyword("misc"),
            Event::new(2, 2).with_name("second").with_keyword("misc"),
            Event::new(3, 3).with_name("third").with_keyword("misc"),
            Event::new(4, 4).with_name("fourth").with_keyword("misc"),
        ]
    }

    fn service_with(
        events: Vec<Event>,
        bids: Vec<PurchaseBid>,
    ) -> (
        RankingService<InMemoryEventStore, InMemoryPurchaseStore>,
        Arc<InMemoryEventStore>,
        Arc<InMemoryPurchaseStore>,
    ) {
        let events = Arc::new(InMemoryEventStore::with_events(events));
        let purchases = Arc::new(InMemoryPurchaseStore::with_bids(bids));
        let service = RankingService::new(events.clone(), purchases.clone());
        (service, events, purchases)
    }

    fn ids(list: &RankedList) -> Vec<u32> {
        list.events.iter().map(|e| e.id.0).collect()
    }

    /// Event store that counts snapshot reads
    struct CountingEventStore {
        inner: InMemoryEventStore,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl EventStore for CountingEventStore {
        async fn all_events(&self) -> Result<Vec<Event>, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.all_events().await
        }

        async fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
            self.inner.get_event(id).await
        }
    }

    // =============================================================================
    // READ PATH
    // =============================================================================

    /// Bids on rank 1 compete; the highest wins and the rest fill by votes
    #[tokio::test]
    async fn test_purchased_ranks_override_votes() {
        let (service, _, _) = service_with(
            four_events(),
            vec![
                PurchaseBid::new(1, 100, 1),
                PurchaseBid::new(1, 120, 2),
                PurchaseBid::new(3, 100, 3),
            ],
        );

        let ranked = service.ranked_events().await.unwrap();

        assert_eq!(ids(&ranked), vec![2, 4, 3, 1]);
        assert_eq!(ranked.events[0].name, "second");
    }

    #[tokio::test]
    async fn test_no_bids_sorts_by_votes_with_stable_ties() {
        let events = vec![
            Event::new(10, 5),
            Event::new(11, 8),
            Event::new(12, 5),
            Event::new(13, 8),
            Event::new(14, 0),
        ];
        let (service, _, _) = service_with(events, vec![]);

        let ranked = service.ranked_events().await.unwrap();

        assert_eq!(ids(&ranked), vec![11, 13, 10, 12, 14]);
    }

    #[tokio::test]
    async fn test_dangling_bid_fails_whole_ranking() {
        let (service, _, _) = service_with(four_events(), vec![PurchaseBid::new(2, 10, 77)]);

        let err = service.ranked_events().await.unwrap_err();

        assert!(matches!(err, RankingError::EventNotFound(id) if id == EventId::new(77)));
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn test_equal_bids_keep_first_admitted() {
        let (service, _, _) = service_with(
            four_events(),
            vec![PurchaseBid::new(2, 50, 1), PurchaseBid::new(2, 50, 3)],
        );

        let ranked = service.ranked_events().await.unwrap();

        assert_eq!(ranked.at(Rank::new(2)).map(|e| e.id), Some(EventId::new(1)));
        assert_eq!(ids(&ranked), vec![4, 1, 3, 2]);
    }

    #[tokio::test]
    async fn test_vote_change_is_seen_on_next_read() {
        let (service, events, _) = service_with(four_events(), vec![PurchaseBid::new(1, 5, 1)]);

        assert_eq!(ids(&service.ranked_events().await.unwrap()), vec![1, 4, 3, 2]);

        assert!(events.set_votes(EventId::new(2), 10));

        assert_eq!(ids(&service.ranked_events().await.unwrap()), vec![1, 2, 4, 3]);
    }

    #[tokio::test]
    async fn test_every_read_takes_a_fresh_snapshot() {
        let store = Arc::new(CountingEventStore {
            inner: InMemoryEventStore::with_events(four_events()),
            reads: AtomicUsize::new(0),
        });
        let service = RankingService::new(store.clone(), Arc::new(InMemoryPurchaseStore::new()));

        let first = service.ranked_events().await.unwrap();
        let second = service.ranked_events().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.reads.load(Ordering::SeqCst), 2);
    }

    // =============================================================================
    // WRITE PATH
    // =============================================================================

    #[tokio::test]
    async fn test_lower_bid_rejected_and_ledger_unchanged() {
        let (service, _, purchases) =
            service_with(four_events(), vec![PurchaseBid::new(1, 100, 1)]);

        let result = service.buy_rank(EventId::new(2), Rank::new(1), 90).await;

        assert!(matches!(
            result,
            Err(RankingError::Admission(AdmissionError::AmountNotEnough {
                current: 100,
                offered: 90,
                ..
            }))
        ));
        assert_eq!(
            purchases.all_bids().await.unwrap(),
            vec![PurchaseBid::new(1, 100, 1)]
        );
    }

    #[tokio::test]
    async fn test_outbid_moves_new_event_into_rank() {
        let (service, _, _) = service_with(four_events(), vec![PurchaseBid::new(1, 100, 1)]);

        service
            .buy_rank(EventId::new(3), Rank::new(1), 101)
            .await
            .unwrap();

        let ranked = service.ranked_events().await.unwrap();
        assert_eq!(ids(&ranked), vec![3, 4, 2, 1]);
    }

    #[tokio::test]
    async fn test_equal_bid_rejected_at_admission() {
        let (service, _, _) = service_with(four_events(), vec![PurchaseBid::new(2, 50, 1)]);

        let result = service.buy_rank(EventId::new(3), Rank::new(2), 50).await;

        assert!(matches!(result, Err(RankingError::Admission(_))));
    }

    #[tokio::test]
    async fn test_bid_beyond_list_still_lists_every_event() {
        let (service, _, _) = service_with(four_events(), vec![]);

        service
            .buy_rank(EventId::new(1), Rank::new(9), 1)
            .await
            .unwrap();

        let ranked = service.ranked_events().await.unwrap();
        assert_eq!(ids(&ranked), vec![4, 3, 2, 1]);
    }

    // =============================================================================
    // RANGE READS
    // =============================================================================

    #[tokio::test]
    async fn test_range_reads_match_full_ranking() {
        let (service, _, _) = service_with(four_events(), vec![PurchaseBid::new(2, 10, 1)]);

        let full = service.ranked_events().await.unwrap();
        let page = service.ranked_range(2, 3).await.unwrap();

        assert_eq!(page.events, full.events[1..3].to_vec());
    }

    #[tokio::test]
    async fn test_range_past_end_is_rejected() {
        let (service, _, _) = service_with(four_events(), vec![]);

        let err = service.ranked_range(3, 5).await.unwrap_err();

        assert!(matches!(err, RankingError::InvalidRange { len: 4, .. }));
        assert!(!err.is_internal());
    }

    // =============================================================================
    // RANDOMIZED SNAPSHOTS
    // =============================================================================

    #[tokio::test]
    async fn test_random_snapshots_uphold_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let n: u32 = rng.gen_range(1..30);
            let events: Vec<Event> = (1..=n).map(|id| Event::new(id, rng.gen_range(0..10))).collect();
            let bids: Vec<PurchaseBid> = (0..rng.gen_range(0..15))
                .map(|_| {
                    PurchaseBid::new(
                        rng.gen_range(1..n + 5),
                        rng.gen_range(0..20),
                        rng.gen_range(1..=n),
                    )
                })
                .collect();

            let (service, _, _) = service_with(events.clone(), bids.clone());
            let ranked = service.ranked_events().await.unwrap();
            let again = service.ranked_events().await.unwrap();

            let map = resolve(&bids);
            assert!(invariant_unique_and_total(&events, &ranked));
            assert!(invariant_pins_honored(&ranked, &map));
            assert!(invariant_vote_order(&sort_by_votes(&events), &ranked, &map));
            assert_eq!(ranked, again);
        }
    }
}

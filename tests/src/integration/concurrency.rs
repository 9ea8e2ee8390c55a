//! # Concurrency Flows
//!
//! The ranking core is pure; callers share one service across tasks.
//! Purchase admission must hold under competing buyers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rand::seq::SliceRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use rl_ranking::{
        Event, EventId, InMemoryEventStore, InMemoryPurchaseStore, PurchaseStore, Rank,
        RankingApi, RankingError, RankingService,
    };

    type Service = RankingService<InMemoryEventStore, InMemoryPurchaseStore>;

    fn shared_service(event_count: u32) -> (Arc<Service>, Arc<InMemoryPurchaseStore>) {
        let events = (1..=event_count).map(|id| Event::new(id, id * 3 % 7)).collect();
        let purchases = Arc::new(InMemoryPurchaseStore::new());
        let service = RankingService::new(
            Arc::new(InMemoryEventStore::with_events(events)),
            purchases.clone(),
        );
        (Arc::new(service), purchases)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_readers_see_identical_rankings() {
        let (service, _) = shared_service(50);
        let expected = service.ranked_events().await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.ranked_events().await })
            })
            .collect();

        for handle in handles {
            let ranked = handle.await.unwrap().unwrap();
            assert_eq!(ranked, expected);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_competing_buyers_admit_strictly_increasing_amounts() {
        let (service, purchases) = shared_service(10);

        let mut amounts: Vec<u32> = (1..=40).map(|i| i * 10).collect();
        amounts.shuffle(&mut StdRng::seed_from_u64(7));

        let rejected = Arc::new(Mutex::new(0usize));
        let handles: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                let service = service.clone();
                let rejected = rejected.clone();
                let amount = *amount;
                let event_id = EventId::new(i as u32 % 10 + 1);
                tokio::spawn(async move {
                    match service.buy_rank(event_id, Rank::new(1), amount).await {
                        Ok(_) => {}
                        Err(RankingError::Admission(_)) => *rejected.lock() += 1,
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let ledger = purchases.all_bids().await.unwrap();
        assert!(ledger.windows(2).all(|w| w[0].amount < w[1].amount));
        assert_eq!(ledger.last().map(|b| b.amount), Some(400));
        assert_eq!(ledger.len() + *rejected.lock(), amounts.len());

        let ranked = service.ranked_events().await.unwrap();
        let winner = ledger.last().map(|b| b.event_id);
        assert_eq!(ranked.at(Rank::FIRST).map(|e| e.id), winner);
    }
}

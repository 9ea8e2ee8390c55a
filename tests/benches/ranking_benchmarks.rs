//! # Rank List Benchmarks
//!
//! | Stage | Complexity |
//! |-------|------------|
//! | Purchase resolution | O(B) over bids |
//! | Vote sort | O(N log N) |
//! | Merge | O(N + B) |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use rl_ranking::algorithms::{merge, resolve};
use rl_ranking::{Event, PurchaseBid};

fn snapshot(events: u32, bids: usize) -> (Vec<Event>, Vec<PurchaseBid>) {
    let mut rng = StdRng::seed_from_u64(42);
    let events = (1..=events)
        .map(|id| Event::new(id, rng.gen_range(0..1_000)))
        .collect::<Vec<_>>();
    let max_id = events.len() as u32;
    let bids = (0..bids)
        .map(|_| {
            PurchaseBid::new(
                rng.gen_range(1..=max_id),
                rng.gen_range(0..10_000),
                rng.gen_range(1..=max_id),
            )
        })
        .collect();
    (events, bids)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("purchase-resolver");
    group.measurement_time(Duration::from_secs(5));

    for bid_count in [100, 1_000, 10_000] {
        let (_, bids) = snapshot(1_000, bid_count);
        group.throughput(Throughput::Elements(bid_count as u64));
        group.bench_with_input(BenchmarkId::new("resolve", bid_count), &bids, |b, bids| {
            b.iter(|| black_box(resolve(bids)))
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking-merger");
    group.measurement_time(Duration::from_secs(5));

    for event_count in [100u32, 1_000, 10_000, 100_000] {
        let (events, bids) = snapshot(event_count, event_count as usize / 10);
        let rank_map = resolve(&bids);

        group.throughput(Throughput::Elements(event_count as u64));
        group.bench_with_input(
            BenchmarkId::new("merge", event_count),
            &(events, rank_map),
            |b, (events, rank_map)| b.iter(|| black_box(merge(events, rank_map).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_merge);
criterion_main!(benches);

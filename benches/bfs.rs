use criterion::{criterion_group, criterion_main, Criterion};
use rayon::ThreadPoolBuilder;
use std::hint::black_box;

use hanoi_search::rules::RodGraph;
use hanoi_search::search::{Bfs, BfsConfig, DedupPolicy};
use hanoi_search::state::StateSpace;
use hanoi_search::variants::Variant;

fn bench_classic(c: &mut Criterion) {
    // Pin a small pool for stability
    let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let space = StateSpace::new(3, 8).unwrap();
    let rules = RodGraph::complete(3);
    let initial = space.uniform(0).unwrap();
    let target = space.uniform(1).unwrap();
    let bfs = Bfs::new();

    c.bench_function("bfs/classic_n8", |bch| {
        bch.iter(|| {
            pool.install(|| black_box(bfs.search(&space, &rules, initial, target).unwrap()))
        })
    });
}

fn bench_hub_star(c: &mut Criterion) {
    let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let space = StateSpace::new(3, 6).unwrap();
    let rules = RodGraph::star(3, 0);
    let initial = space.uniform(1).unwrap();
    let target = space.uniform(2).unwrap();
    let lean = Bfs::with_config(BfsConfig { dedup: DedupPolicy::PreviousFrontier });
    let full = Bfs::new();

    c.bench_function("bfs/hub_star_n6/last_level", |bch| {
        bch.iter(|| {
            pool.install(|| black_box(lean.search(&space, &rules, initial, target).unwrap()))
        })
    });
    c.bench_function("bfs/hub_star_n6/visited", |bch| {
        bch.iter(|| {
            pool.install(|| black_box(full.search(&space, &rules, initial, target).unwrap()))
        })
    });
}

fn bench_variant_preset(c: &mut Criterion) {
    let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let variant = Variant::K13e_01;
    let space = variant.space(6).unwrap();
    let rules = variant.rules(6);
    let (initial, target) = variant.endpoints(&space).unwrap();
    let bfs = Bfs::with_config(BfsConfig { dedup: variant.recommended_dedup() });

    c.bench_function("bfs/k13e_01_n6", |bch| {
        bch.iter(|| {
            pool.install(|| black_box(bfs.search(&space, &rules, initial, target).unwrap()))
        })
    });
}

criterion_group!(benches, bench_classic, bench_hub_star, bench_variant_preset);
criterion_main!(benches);

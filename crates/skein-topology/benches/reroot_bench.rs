//! Benchmarks for Skein Swarm Topology
//!
//! Measures performance of:
//! - Re-rooting along chains of increasing depth
//! - Invariant validation at construction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use skein_topology::{Flap, NodeId, Rod, Topology};

/// Build a straight chain 0 (leader) <- 1 <- ... <- depth.
fn chain(depth: u8) -> Topology {
    let mut links = vec![(NodeId(0), NodeId(0))];
    let mut rods = vec![Rod::ZERO];
    let mut flaps = vec![Flap::ZERO];
    for i in 1..=depth {
        links.push((NodeId(i), NodeId(i - 1)));
        rods.push(Rod::new(1, 0, 0));
        flaps.push(Flap::new(1.0, 0.2, 0.0));
    }
    Topology::from_links(&links, &rods, &flaps).expect("valid chain")
}

/// Benchmark rerooting to the far end of chains of different depths
fn bench_reroot_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("reroot_depth");

    for &depth in &[4u8, 15, 63, 254] {
        let topology = chain(depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter_batched(
                || topology.clone(),
                |mut t| t.reroot(black_box(NodeId(depth))).unwrap(),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Benchmark construction-time invariant validation
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_invariants");

    for &depth in &[15u8, 254] {
        let topology = chain(depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &topology,
            |b, topology| b.iter(|| black_box(topology).check_invariants().unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_reroot_depth, bench_validation);
criterion_main!(benches);

//! Q-learning solver benchmarks
//!
//! Hot paths:
//! 1. QLearningSolver::train() - the full episodic loop
//! 2. QLearningSolver::extract_path() - greedy table walk

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use qroute_core::{Network, TopologyConfig, Weights};
use qroute_rl::{QLearningConfig, QLearningSolver};

fn bench_topology() -> Network {
    TopologyConfig {
        nodes: 60,
        edge_probability: 0.12,
        seed: Some(99),
        ..TopologyConfig::default()
    }
    .generate()
}

fn bench_train(c: &mut Criterion) {
    let net = bench_topology();
    let ids = net.node_ids();
    let config = QLearningConfig {
        episodes: 200,
        seed: Some(7),
        ..QLearningConfig::default()
    };

    c.bench_function("rl_train", |b| {
        b.iter(|| {
            let mut solver = QLearningSolver::new(
                &net,
                ids[0],
                ids[ids.len() - 1],
                Weights::default(),
                config.clone(),
            )
            .expect("valid query");
            black_box(solver.train())
        });
    });
}

fn bench_extract_path(c: &mut Criterion) {
    let net = bench_topology();
    let ids = net.node_ids();
    let mut solver = QLearningSolver::new(
        &net,
        ids[0],
        ids[ids.len() - 1],
        Weights::default(),
        QLearningConfig {
            episodes: 500,
            seed: Some(7),
            ..QLearningConfig::default()
        },
    )
    .expect("valid query");
    solver.train();

    c.bench_function("rl_extract_path", |b| {
        b.iter(|| black_box(solver.extract_path()));
    });
}

criterion_group!(benches, bench_train, bench_extract_path);
criterion_main!(benches);

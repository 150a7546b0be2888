use criterion::{criterion_group, criterion_main, Criterion};
use crypto_core::{Block, ShaHash};
use std::time::Duration;

fn bench_gate_hash2(c: &mut Criterion) {
    c.bench_function("ShaHash::gate_hash2", |b| {
        let x = rand::random::<Block>();
        let y = rand::random::<Block>();
        b.iter(|| {
            let z = ShaHash::gate_hash2(x, y, 42);
            criterion::black_box(z);
        });
    });
}

fn bench_output_hash(c: &mut Criterion) {
    c.bench_function("ShaHash::output_hash", |b| {
        let x = rand::random::<Block>();
        b.iter(|| {
            let z = ShaHash::output_hash(x, 42);
            criterion::black_box(z);
        });
    });
}

criterion_group! {
    name = hash;
    config = Criterion::default().warm_up_time(Duration::from_millis(100));
    targets = bench_gate_hash2, bench_output_hash
}
criterion_main!(hash);

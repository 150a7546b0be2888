use circuit::Circuit;
use criterion::{criterion_group, criterion_main, Criterion};
use crypto_core::AesRng;
use std::time::Duration;
use twopc::{gen_label_pairs, GCGenerator, PointPermuteGenerator};

fn bench_garble(c: &mut Criterion, name: &str) {
    c.bench_function(&format!("garbling {name}"), |b| {
        let circ = Circuit::load(&format!("../circuit/circuit_files/bristol/{name}.txt")).unwrap();
        let mut rng = AesRng::new();
        let gen = PointPermuteGenerator::new();

        b.iter(|| {
            let labels = gen_label_pairs(&mut rng, &circ);
            let complete_gc = gen.garble(&circ, &labels).unwrap();
            criterion::black_box(complete_gc);
        });
    });
}

fn bench_garble_adder64(c: &mut Criterion) {
    bench_garble(c, "adder64");
}

fn bench_garble_mult64(c: &mut Criterion) {
    bench_garble(c, "mult64");
}

criterion_group! {
    name = garbling;
    config = Criterion::default().warm_up_time(Duration::from_millis(100));
    targets = bench_garble_adder64, bench_garble_mult64
}
criterion_main!(garbling);

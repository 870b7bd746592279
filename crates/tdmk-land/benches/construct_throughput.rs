use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tdmk_core::{CodomainFamily, Parameters};
use tdmk_land::Landscape;

fn construct_bench(c: &mut Criterion) {
    c.bench_function("construct_m128_k5", |b| {
        b.iter(|| {
            let parameters = Parameters::new(128, 5, 2, 2).unwrap();
            let landscape =
                Landscape::construct(parameters, CodomainFamily::Random, 42).unwrap();
            black_box(landscape);
        });
    });
}

criterion_group!(benches, construct_bench);
criterion_main!(benches);

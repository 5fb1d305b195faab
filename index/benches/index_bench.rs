use criterion::{Criterion, black_box, criterion_group, criterion_main};
use singfit_index::{SimilarityIndex, l2_normalize};

fn random_unit_vec(dim: usize, seed: u64) -> Vec<f32> {
    let mut v = Vec::with_capacity(dim);
    let mut state = seed;
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        v.push(((state >> 33) as f32) / (u32::MAX as f32) - 0.5);
    }
    l2_normalize(&mut v);
    v
}

fn bench_search(c: &mut Criterion) {
    let dim = 192;
    for n in [100usize, 500, 2000] {
        let entries = (0..n)
            .map(|i| (format!("singer-{i:05}"), random_unit_vec(dim, i as u64 + 1)))
            .collect();
        let idx = SimilarityIndex::build(dim, entries).unwrap();
        let query = random_unit_vec(dim, 0xDEAD);

        c.bench_function(&format!("search_top3_{n}"), |b| {
            b.iter(|| idx.search(black_box(&query), 3).unwrap())
        });
    }
}

fn bench_build(c: &mut Criterion) {
    let dim = 192;
    let entries: Vec<(String, Vec<f32>)> = (0..500)
        .map(|i| (format!("singer-{i:05}"), random_unit_vec(dim, i as u64 + 1)))
        .collect();

    c.bench_function("build_500", |b| {
        b.iter(|| SimilarityIndex::build(dim, black_box(entries.clone())).unwrap())
    });
}

criterion_group!(benches, bench_search, bench_build);
criterion_main!(benches);

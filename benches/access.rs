use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use doseflow::{BaselineSamplerConfig, Matrix, PairedBaselineSampler, PairedDataset, PairedOutcomeSampler};

fn make_table(n: usize, d: usize, rng: &mut ChaCha8Rng) -> Matrix {
    let mut m = Array2::<f32>::zeros((n, d));
    for v in m.iter_mut() {
        *v = StandardNormal.sample(rng);
    }
    Matrix::from(m)
}

fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("paired_access");

    // (cells, genes, factors)
    let cases = [(1_000usize, 64usize, 8usize), (10_000, 2_000, 32)];

    for &(n, g, k) in &cases {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let control = make_table(n, g, &mut rng);
        let treated_x1 = make_table(n, g, &mut rng);
        let treated_d = make_table(n, k, &mut rng);
        let indices: Vec<usize> = (0..256).map(|_| rng.random_range(0..n)).collect();

        let baseline =
            PairedBaselineSampler::new(control, treated_d.clone(), &BaselineSamplerConfig::default())
                .unwrap();
        let outcome = PairedOutcomeSampler::new_aligned(treated_x1, treated_d).unwrap();

        group.bench_with_input(
            BenchmarkId::new("baseline_get", format!("n{n}_g{g}")),
            &n,
            |b, &n| b.iter(|| baseline.get(n / 2).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("outcome_get", format!("n{n}_g{g}")),
            &n,
            |b, &n| b.iter(|| outcome.get(n / 2).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("baseline_gather256", format!("n{n}_g{g}")),
            &indices,
            |b, idx| b.iter(|| baseline.gather(idx).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("outcome_gather256", format!("n{n}_g{g}")),
            &indices,
            |b, idx| b.iter(|| outcome.gather(idx).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_access);
criterion_main!(benches);

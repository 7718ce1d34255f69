// Benchmarks for the bit-matrix kernel and the subset enumeration
//
// These inner loops dominate a solve: row XORs during echelon updates,
// block transposition at initialization, and the sub-ISD enumeration.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use isd_solver::core::{Matrix, SolverRng, Vector, transpose};
use isd_solver::tools::enumerate;

fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut rng = SolverRng::from_seed(seed);
    let mut m = Matrix::new(rows, cols);
    for r in 0..rows {
        for w in m.row_words_mut(r) {
            *w = rng.next_u64();
        }
    }
    m
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    for &n in &[128usize, 512, 1024] {
        let m = random_matrix(n, n, 42);
        let mut t = Matrix::new(n, n);
        group.bench_function(format!("{}x{}", n, n), |b| {
            b.iter(|| transpose(&mut t.view_mut(), black_box(&m.view())));
        });
    }
    group.finish();
}

fn bench_row_xor(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_xor");
    for &cols in &[256usize, 1024, 4096] {
        let a = random_matrix(1, cols, 7);
        let mut dst = Vector::new(cols);
        group.bench_function(format!("{} bits", cols), |b| {
            b.iter(|| dst.view_mut().xor_assign(black_box(&a.row(0))));
        });
    }
    group.finish();
}

fn bench_enumerate(c: &mut Criterion) {
    let mut rng = SolverRng::from_seed(9);
    let vals: Vec<u64> = (0..64).map(|_| rng.next_u64()).collect();
    let mut group = c.benchmark_group("enumerate");
    for p in 2..=4usize {
        group.bench_function(format!("p{} over 64", p), |b| {
            b.iter(|| {
                let mut acc = 0u64;
                enumerate::enumerate_val(black_box(&vals), p, |v: u64| {
                    acc ^= v;
                });
                acc
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transpose, bench_row_xor, bench_enumerate);
criterion_main!(benches);

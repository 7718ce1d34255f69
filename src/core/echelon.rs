//! Row reduction of bit matrices
//!
//! `echelonize` brings a column range into reduced row-echelon form;
//! `echelonize_col_rev` is the column-reversed analog that yields the
//! anti-diagonal identity used by the ISD form (reduction runs bottom-to-top
//! in column order).

use super::matrix::Matrix;
use super::ops;

/// Reduce columns `[col_start, col_end)` of `m` to reduced row-echelon form
/// using rows `[pivot_start, rows)` as pivot candidates. The first row in
/// scan order with a 1 at the current column becomes the pivot. Returns the
/// number of pivot rows found.
pub fn echelonize_range(m: &mut Matrix, col_start: usize, col_end: usize, pivot_start: usize) -> usize {
    assert!(col_end <= m.columns(), "echelonize: column range out of bounds");
    let rows = m.rows();
    let words = m.columns().div_ceil(64);
    let mut pivot = pivot_start;
    for c in col_start..col_end {
        if pivot >= rows {
            break;
        }
        // first row at or below the pivot cursor with a 1 in this column
        let mut r = pivot;
        while r < rows && !m.get_bit(r, c) {
            r += 1;
        }
        if r == rows {
            continue;
        }
        if r != pivot {
            m.swap_rows(r, pivot);
        }
        for r2 in 0..rows {
            if r2 != pivot && m.get_bit(r2, c) {
                let (src, dst) = m.row_pair_mut(pivot, r2);
                ops::xor_words(dst, src, words);
            }
        }
        pivot += 1;
    }
    pivot - pivot_start
}

/// Reduced row-echelon form over all columns; returns the rank.
pub fn echelonize(m: &mut Matrix) -> usize {
    let cols = m.columns();
    echelonize_range(m, 0, cols, 0)
}

/// Column-reversed reduction: columns are consumed from `col_end - 1` down
/// to `col_start`, pivot rows ascend from `pivot_start`, so the reduced
/// block forms an anti-diagonal identity. Returns the number of pivots.
pub fn echelonize_col_rev(
    m: &mut Matrix,
    col_start: usize,
    col_end: usize,
    pivot_start: usize,
) -> usize {
    assert!(col_end <= m.columns(), "echelonize_col_rev: column range out of bounds");
    let rows = m.rows();
    let words = m.columns().div_ceil(64);
    let mut pivot = pivot_start;
    for i in 0..col_end - col_start {
        if pivot >= rows {
            break;
        }
        let c = col_end - 1 - i;
        let mut r = pivot;
        while r < rows && !m.get_bit(r, c) {
            r += 1;
        }
        if r == rows {
            continue;
        }
        if r != pivot {
            m.swap_rows(r, pivot);
        }
        for r2 in 0..rows {
            if r2 != pivot && m.get_bit(r2, c) {
                let (src, dst) = m.row_pair_mut(pivot, r2);
                ops::xor_words(dst, src, words);
            }
        }
        pivot += 1;
    }
    pivot - pivot_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SolverRng;

    fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
        let mut rng = SolverRng::from_seed(seed);
        let mut m = Matrix::new(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                if rng.next_u64() & 1 != 0 {
                    m.set_bit(r, c);
                }
            }
        }
        m
    }

    #[test]
    fn test_full_rank_square() {
        let mut m = Matrix::new(20, 20);
        m.set_identity();
        // shear a few rows so it is not already reduced
        for r in 1..20 {
            let (src, dst) = m.row_pair_mut(r - 1, r);
            ops::xor_words(dst, src, 1);
        }
        let rank = echelonize(&mut m);
        assert_eq!(rank, 20);
        let mut id = Matrix::new(20, 20);
        id.set_identity();
        assert_eq!(m, id);
    }

    #[test]
    fn test_rank_of_random_wide_matrix() {
        // a 64x128 random matrix is full rank with overwhelming probability
        let mut m = random_matrix(64, 128, 3);
        let rank = echelonize(&mut m);
        assert_eq!(rank, 64);
        // each pivot column holds a single 1
        let mut pivots = 0;
        for c in 0..128 {
            let col_hw = (0..64).filter(|&r| m.get_bit(r, c)).count();
            if col_hw == 1 && m.get_bit(pivots, c) {
                pivots += 1;
                if pivots == 64 {
                    break;
                }
            }
        }
        assert_eq!(pivots, 64);
    }

    #[test]
    fn test_echelonize_idempotent() {
        let mut m = random_matrix(30, 50, 77);
        let r1 = echelonize(&mut m);
        let snapshot = m.clone();
        let r2 = echelonize(&mut m);
        assert_eq!(r1, r2);
        assert_eq!(m, snapshot);
    }

    #[test]
    fn test_zero_rows_below_rank() {
        let mut m = Matrix::new(10, 8);
        // rank-deficient by construction: duplicate rows
        for r in 0..10 {
            m.set_bit(r, r % 4);
        }
        let rank = echelonize(&mut m);
        assert_eq!(rank, 4);
        for r in rank..10 {
            assert_eq!(m.row(r).hammingweight(), 0);
        }
    }

    #[test]
    fn test_col_rev_antidiagonal() {
        let mut m = random_matrix(16, 40, 5);
        let rank = echelonize_col_rev(&mut m, 0, 40, 0);
        assert_eq!(rank, 16);
        // row i has its pivot 1 at column 40 - 1 - i, alone in that column
        for i in 0..16 {
            let c = 40 - 1 - i;
            for r in 0..16 {
                assert_eq!(m.get_bit(r, c), r == i);
            }
        }
    }
}

//! Bit-matrix transposition via recursive-halving block transpose
//!
//! A 64x64 bit block is transposed in-register by XOR-swapping half-shifted
//! copies at every halving step. The 2-tile variant interleaves two
//! horizontally adjacent blocks so both destination cachelines stay hot.

use super::block::BlockTag;
use super::matrix::{MatView, MatViewMut};

/// Transpose a full 64x64 bit block. `src`/`dst` point at the first word of
/// the block; rows are `stride` words apart.
fn block_transpose64(dst: &mut [u64], dstride: usize, src: &[u64], sstride: usize) {
    let mut m: u64 = (1u64 << 32) - 1;
    let mut j: usize = 32;
    let mut tmp = [0u64; 64];

    for k in 0..32 {
        let a = src[k * sstride];
        let b = src[(k + 32) * sstride];
        let t = ((a >> 32) ^ b) & m;
        tmp[k] = a ^ (t << 32);
        tmp[k + 32] = b ^ t;
    }
    j >>= 1;
    m ^= m << j;
    while j != 1 {
        let mut k = 0usize;
        for _ in 0..32 {
            let t = ((tmp[k] >> j) ^ tmp[k + j]) & m;
            tmp[k] ^= t << j;
            tmp[k + j] ^= t;
            k = (k + j + 1) & !j;
        }
        j >>= 1;
        m ^= m << j;
    }
    let mut k = 0;
    while k < 64 {
        let t = ((tmp[k] >> 1) ^ tmp[k + 1]) & m;
        dst[k * dstride] = tmp[k] ^ (t << 1);
        dst[(k + 1) * dstride] = tmp[k + 1] ^ t;
        k += 2;
    }
}

/// Transpose two horizontally adjacent 64x64 blocks at once: src = (A B)
/// yields dst rows 0..64 = A^T and rows 64..128 = B^T.
fn block_transpose64x2(dst: &mut [u64], dstride: usize, src: &[u64], sstride: usize) {
    let mut m: u64 = (1u64 << 32) - 1;
    let mut j: usize = 32;
    let mut tmp = [0u64; 128];

    for k in 0..32 {
        let a1 = src[k * sstride];
        let b1 = src[(k + 32) * sstride];
        let t1 = ((a1 >> 32) ^ b1) & m;
        tmp[k] = a1 ^ (t1 << 32);
        tmp[k + 32] = b1 ^ t1;
        let a2 = src[k * sstride + 1];
        let b2 = src[(k + 32) * sstride + 1];
        let t2 = ((a2 >> 32) ^ b2) & m;
        tmp[k + 64] = a2 ^ (t2 << 32);
        tmp[k + 96] = b2 ^ t2;
    }
    j >>= 1;
    m ^= m << j;
    while j != 1 {
        let mut k = 0usize;
        for _ in 0..32 {
            let t = ((tmp[k] >> j) ^ tmp[k + j]) & m;
            tmp[k] ^= t << j;
            tmp[k + j] ^= t;
            let t2 = ((tmp[k + 64] >> j) ^ tmp[k + j + 64]) & m;
            tmp[k + 64] ^= t2 << j;
            tmp[k + j + 64] ^= t2;
            k = (k + j + 1) & !j;
        }
        j >>= 1;
        m ^= m << j;
    }
    let mut k = 0;
    while k < 128 {
        let t = ((tmp[k] >> 1) ^ tmp[k + 1]) & m;
        dst[k * dstride] = tmp[k] ^ (t << 1);
        dst[(k + 1) * dstride] = tmp[k + 1] ^ t;
        k += 2;
    }
}

/// Transpose a partial block of up to `bits` x `bits` (bits a power of two,
/// 4..=64). Source rows past `src_rows` read as zero; only the first
/// `dst_rows` destination rows are written.
fn block_transpose_partial(
    dst: &mut [u64],
    dstride: usize,
    dst_rows: usize,
    src: &[u64],
    sstride: usize,
    src_rows: usize,
    bits: usize,
) {
    debug_assert!(bits.is_power_of_two() && (4..=64).contains(&bits));
    debug_assert!(dst_rows <= bits && src_rows <= bits);
    let mut m: u64 = if bits == 64 { !0u64 >> 32 } else { (1u64 << (bits / 2)) - 1 };
    let mut j = bits / 2;
    let mut tmp = [0u64; 64];

    for k in 0..bits / 2 {
        if k < src_rows {
            let a = src[k * sstride];
            let b = if k + bits / 2 < src_rows { src[(k + bits / 2) * sstride] } else { 0 };
            let t = (b ^ (a >> (bits / 2))) & m;
            tmp[k] = a ^ (t << (bits / 2));
            tmp[k + bits / 2] = b ^ t;
        } else {
            tmp[k] = 0;
            tmp[k + bits / 2] = 0;
        }
    }
    j >>= 1;
    m ^= m << j;
    while j != 1 {
        let mut k = 0usize;
        for _ in 0..bits / 2 {
            let t = ((tmp[k] >> j) ^ tmp[k + j]) & m;
            tmp[k] ^= t << j;
            tmp[k + j] ^= t;
            k = (k + j + 1) & !j;
        }
        j >>= 1;
        m ^= m << j;
    }
    let mut k = 0;
    while k + 1 < dst_rows {
        let t = ((tmp[k] >> 1) ^ tmp[k + 1]) & m;
        dst[k * dstride] = tmp[k] ^ (t << 1);
        dst[(k + 1) * dstride] = tmp[k + 1] ^ t;
        k += 2;
    }
    // k is even and < bits here, so tmp[k + 1] stays in range
    if k < dst_rows {
        let t = ((tmp[k] >> 1) ^ tmp[k + 1]) & m;
        dst[k * dstride] = tmp[k] ^ (t << 1);
    }
}

/// `dst := src^T`. Requires `dst.rows == src.cols`, `dst.cols == src.rows`;
/// in-place transposition is impossible by construction since `dst` is a
/// unique mutable borrow. Padding bits of written destination words are
/// zero-filled.
pub fn transpose<T: BlockTag, U: BlockTag>(dst: &mut MatViewMut<'_, U>, src: &MatView<'_, T>) {
    const BITS: usize = 64;
    assert!(
        dst.columns() == src.rows() && dst.rows() == src.columns(),
        "transpose: matrix dimensions do not match"
    );
    if dst.columns() == 0 || dst.rows() == 0 {
        return;
    }
    let src_rows = src.rows();
    let src_cols = src.columns();
    let sstride = src.stride();
    let dstride = dst.stride();
    let sw = src.words();
    let dw = dst.words_mut();
    let sidx = |r: usize, c: usize| r * sstride + c / 64;
    let didx = |r: usize, c: usize| r * dstride + c / 64;

    let mut r = 0;
    while r + BITS <= src_rows {
        let mut c = 0;
        while c + 2 * BITS <= src_cols {
            block_transpose64x2(&mut dw[didx(c, r)..], dstride, &sw[sidx(r, c)..], sstride);
            c += 2 * BITS;
        }
        if c + BITS <= src_cols {
            block_transpose64(&mut dw[didx(c, r)..], dstride, &sw[sidx(r, c)..], sstride);
            c += BITS;
        }
        if c < src_cols {
            block_transpose_partial(
                &mut dw[didx(c, r)..],
                dstride,
                src_cols % BITS,
                &sw[sidx(r, c)..],
                sstride,
                BITS,
                BITS,
            );
        }
        r += BITS;
    }
    if r < src_rows {
        let mut c = 0;
        while c + BITS <= src_cols {
            block_transpose_partial(
                &mut dw[didx(c, r)..],
                dstride,
                BITS,
                &sw[sidx(r, c)..],
                sstride,
                src_rows % BITS,
                BITS,
            );
            c += BITS;
        }
        if c < src_cols {
            let partialbits =
                ((src_cols % BITS).max(src_rows % BITS)).next_power_of_two().max(4);
            block_transpose_partial(
                &mut dw[didx(c, r)..],
                dstride,
                src_cols % BITS,
                &sw[sidx(r, c)..],
                sstride,
                src_rows % BITS,
                partialbits,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matrix::Matrix;
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

    fn check_roundtrip(rows: usize, cols: usize, seed: u64) {
        let m = random_matrix(rows, cols, seed);
        let mut t = Matrix::new(cols, rows);
        transpose(&mut t.view_mut(), &m.view());
        for r in 0..rows {
            for c in 0..cols {
                assert_eq!(m.get_bit(r, c), t.get_bit(c, r), "{}x{} at ({},{})", rows, cols, r, c);
            }
        }
        let mut m2 = Matrix::new(rows, cols);
        transpose(&mut m2.view_mut(), &t.view());
        assert_eq!(m, m2);
    }

    #[test]
    fn test_transpose_square_block_sizes() {
        for &n in &[1usize, 3, 17, 63, 64, 65, 127, 128, 129, 197] {
            check_roundtrip(n, n, 42 + n as u64);
        }
    }

    #[test]
    fn test_transpose_rectangular() {
        check_roundtrip(5, 300, 7);
        check_roundtrip(300, 5, 8);
        check_roundtrip(70, 130, 9);
        check_roundtrip(64, 128, 10);
        check_roundtrip(100, 50, 11);
    }

    #[test]
    fn test_transpose_identity() {
        let mut m = Matrix::new(80, 80);
        m.set_identity();
        let mut t = Matrix::new(80, 80);
        transpose(&mut t.view_mut(), &m.view());
        assert_eq!(m, t);
    }
}

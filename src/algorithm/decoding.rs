//! Common decoding types and the sub-ISD interface

use crate::core::{MatView, Matrix, VecView, Vector};
use crate::error::DecodingError;
use crate::tools::config::ConfigMap;
use crate::tools::stats::DecodingStats;

/// An immutable syndrome-decoding instance: find e with wt(e) <= w and
/// H e^T = S.
#[derive(Debug, Clone)]
pub struct SyndromeDecodingProblem {
    pub h: Matrix,
    pub s: Vector,
    pub w: usize,
}

/// H e^T for a full-length error vector.
pub fn compute_syndrome(h: &MatView<'_>, e: &VecView<'_>) -> Vector {
    debug_assert_eq!(h.columns(), e.columns());
    let mut s = Vector::new(h.rows());
    for r in 0..h.rows() {
        let parity = crate::core::ops::hammingweight_and_words(
            h.row_words(r),
            e.words(),
            h.columns(),
        ) & 1;
        if parity != 0 {
            s.set_bit(r);
        }
    }
    s
}

/// True iff `e` solves the instance: H e^T = S and wt(e) <= w.
pub fn check_sd_solution(h: &MatView<'_>, s: &VecView<'_>, w: usize, e: &VecView<'_>) -> bool {
    if e.columns() != h.columns() || s.columns() != h.rows() {
        return false;
    }
    if e.hammingweight() > w {
        return false;
    }
    compute_syndrome(h, e).view() == *s
}

/// A sub-ISD enumerator.
///
/// The driver owns the ISD form; each iteration it hands the current
/// (H2^T | H1^T) block and S2 to `solve`, which walks its candidate space
/// and reports every l-bit match through the callback. The callback
/// receives ascending H12^T row indices plus the weight already accumulated
/// on the padding bits ("w1 partial", 0 when the sub-ISD did not compute
/// it) and returns false to stop the enumeration for this iteration.
///
/// The driver is generic over the implementation so the callback inlines;
/// no dynamic dispatch on the hot path.
pub trait SubIsd {
    const NAME: &'static str;

    fn load_config(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError>;
    fn save_config(&self, cfg: &mut ConfigMap);

    /// Validate the configuration against the instance shape and set up
    /// internal tables. `rows` is the H12^T row count (k + l), `l` the
    /// number of key bits, `w` the weight bound.
    fn initialize(&mut self, rows: usize, l: usize, w: usize) -> Result<(), DecodingError>;

    /// One full enumeration pass over the current views.
    fn solve<F: FnMut(&[u32], u32) -> bool>(
        &mut self,
        h12t: &MatView<'_>,
        s2: &VecView<'_>,
        cb: F,
    ) -> Result<(), DecodingError>;

    fn stats(&self) -> &DecodingStats;
}

/// Copy the masked first word of every H12^T row into a reused buffer;
/// every production sub-ISD keys its enumeration on these and refreshes
/// them once per iteration without allocating.
pub(crate) fn collect_firstwords(h12t: &MatView<'_>, mask: u64, out: &mut Vec<u64>) {
    out.clear();
    out.extend((0..h12t.rows()).map(|r| h12t.row_words(r)[0] & mask));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_syndrome_identity() {
        // H = (I | P): syndrome of a unit error on column c < n-k is e_c
        let mut h = Matrix::new(4, 8);
        for r in 0..4 {
            h.set_bit(r, r);
        }
        h.set_bit(0, 5);
        h.set_bit(3, 5);
        let mut e = Vector::new(8);
        e.set_bit(2);
        let s = compute_syndrome(&h.view(), &e.view());
        assert_eq!(s.hammingweight(), 1);
        assert!(s.get_bit(2));

        let mut e2 = Vector::new(8);
        e2.set_bit(5);
        let s2 = compute_syndrome(&h.view(), &e2.view());
        assert!(s2.get_bit(0) && s2.get_bit(3) && s2.hammingweight() == 2);
    }

    #[test]
    fn test_check_sd_solution() {
        let mut h = Matrix::new(3, 6);
        for r in 0..3 {
            h.set_bit(r, r);
        }
        let mut e = Vector::new(6);
        e.set_bit(1);
        let s = compute_syndrome(&h.view(), &e.view());
        assert!(check_sd_solution(&h.view(), &s.view(), 1, &e.view()));
        assert!(check_sd_solution(&h.view(), &s.view(), 3, &e.view()));
        // weight bound violation
        assert!(!check_sd_solution(&h.view(), &s.view(), 0, &e.view()));
        // wrong syndrome
        let mut e3 = Vector::new(6);
        e3.set_bit(0);
        assert!(!check_sd_solution(&h.view(), &s.view(), 1, &e3.view()));
    }
}

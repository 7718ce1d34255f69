//! Random syndrome-decoding instance generation
//!
//! Two flavours: a fully random instance (left-identity H, uniform S),
//! which below the Gilbert-Varshamov bound usually has no solution at all,
//! and a planted instance where S = H e^T for a hidden weight-w error e,
//! guaranteeing a solution. Tests and `--gen` runs want the planted kind.

use crate::algorithm::decoding::compute_syndrome;
use crate::core::{Matrix, SolverRng, Vector};
use crate::error::DecodingError;

use super::utils::cryptographic_w;

pub struct SdpGenerator {
    n: usize,
    k: usize,
    w: usize,
    planted: bool,
    h: Matrix,
    s: Vector,
    e: Option<Vector>,
    rng: SolverRng,
}

impl SdpGenerator {
    pub fn new() -> Self {
        SdpGenerator::with_rng(SolverRng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        SdpGenerator::with_rng(SolverRng::from_seed(seed))
    }

    fn with_rng(rng: SolverRng) -> Self {
        SdpGenerator {
            n: 0,
            k: 0,
            w: 0,
            planted: false,
            h: Matrix::default(),
            s: Vector::default(),
            e: None,
            rng,
        }
    }

    fn check_and_set(
        &mut self,
        n: usize,
        k: Option<usize>,
        w: Option<usize>,
    ) -> Result<(), DecodingError> {
        if n == 0 {
            return Err(DecodingError::input("generator: n must be positive"));
        }
        let k = k.unwrap_or(n / 2);
        if k == 0 || k >= n {
            return Err(DecodingError::input(format!(
                "generator: need 0 < k < n, got n={} k={}",
                n, k
            )));
        }
        let w = w.unwrap_or_else(|| cryptographic_w(n, k));
        if w == 0 || w > n - k {
            return Err(DecodingError::input(format!(
                "generator: need 0 < w <= n-k, got w={} n-k={}",
                w,
                n - k
            )));
        }
        self.n = n;
        self.k = k;
        self.w = w;
        Ok(())
    }

    fn fill_h(&mut self) {
        let (n, k) = (self.n, self.k);
        self.h = Matrix::new(n - k, n);
        // random right block, identity on the left (n-k) x (n-k) block
        for r in 0..n - k {
            self.h.set_bit(r, r);
            for c in n - k..n {
                if self.rng.next_u64() & 1 != 0 {
                    self.h.set_bit(r, c);
                }
            }
        }
    }

    /// Generate a fully random instance; k and w default to n/2 and the
    /// cryptographic weight.
    pub fn generate(
        &mut self,
        n: usize,
        k: Option<usize>,
        w: Option<usize>,
    ) -> Result<(), DecodingError> {
        self.check_and_set(n, k, w)?;
        self.planted = false;
        self.e = None;
        self.fill_h();
        self.s = Vector::new(self.n - self.k);
        for c in 0..self.n - self.k {
            if self.rng.next_u64() & 1 != 0 {
                self.s.set_bit(c);
            }
        }
        Ok(())
    }

    /// Generate an instance with a hidden weight-w error: S = H e^T.
    pub fn generate_planted(
        &mut self,
        n: usize,
        k: Option<usize>,
        w: Option<usize>,
    ) -> Result<(), DecodingError> {
        self.check_and_set(n, k, w)?;
        self.planted = true;
        self.fill_h();
        let mut e = Vector::new(self.n);
        let mut placed = 0usize;
        while placed < self.w {
            let c = self.rng.below(self.n);
            if !e.get_bit(c) {
                e.set_bit(c);
                placed += 1;
            }
        }
        self.s = compute_syndrome(&self.h.view(), &e.view());
        self.e = Some(e);
        Ok(())
    }

    /// Draw a fresh instance with the same parameters and mode.
    pub fn regenerate(&mut self) -> Result<(), DecodingError> {
        let (n, k, w) = (self.n, self.k, self.w);
        if self.planted {
            self.generate_planted(n, Some(k), Some(w))
        } else {
            self.generate(n, Some(k), Some(w))
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn w(&self) -> usize {
        self.w
    }

    pub fn h(&self) -> &Matrix {
        &self.h
    }

    pub fn s(&self) -> &Vector {
        &self.s
    }

    /// The hidden error of a planted instance.
    pub fn planted_error(&self) -> Option<&Vector> {
        self.e.as_ref()
    }
}

impl Default for SdpGenerator {
    fn default() -> Self {
        SdpGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::decoding::check_sd_solution;

    #[test]
    fn test_defaults_and_shape() {
        let mut g = SdpGenerator::with_seed(1);
        g.generate(100, None, None).unwrap();
        assert_eq!(g.k(), 50);
        assert!(g.w() > 0 && g.w() <= 50);
        assert_eq!(g.h().rows(), 50);
        assert_eq!(g.h().columns(), 100);
        assert_eq!(g.s().columns(), 50);
        for r in 0..50 {
            for c in 0..50 {
                assert_eq!(g.h().get_bit(r, c), r == c);
            }
        }
    }

    #[test]
    fn test_planted_instance_has_solution() {
        let mut g = SdpGenerator::with_seed(7);
        g.generate_planted(80, Some(40), Some(9)).unwrap();
        let e = g.planted_error().unwrap();
        assert_eq!(e.hammingweight(), 9);
        assert!(check_sd_solution(&g.h().view(), &g.s().view(), 9, &e.view()));
    }

    #[test]
    fn test_reproducible() {
        let mut a = SdpGenerator::with_seed(3);
        let mut b = SdpGenerator::with_seed(3);
        a.generate_planted(60, Some(30), Some(5)).unwrap();
        b.generate_planted(60, Some(30), Some(5)).unwrap();
        assert_eq!(a.h(), b.h());
        assert_eq!(a.s(), b.s());
    }

    #[test]
    fn test_regenerate_differs() {
        let mut g = SdpGenerator::with_seed(5);
        g.generate_planted(60, Some(30), Some(5)).unwrap();
        let h1 = g.h().clone();
        g.regenerate().unwrap();
        assert_ne!(&h1, g.h());
    }

    #[test]
    fn test_bad_parameters() {
        let mut g = SdpGenerator::with_seed(1);
        assert!(g.generate(0, None, None).is_err());
        assert!(g.generate(10, Some(10), None).is_err());
        assert!(g.generate(10, Some(5), Some(6)).is_err());
    }
}

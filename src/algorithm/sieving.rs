//! Experimental sieving sub-ISD (GJN shape)
//!
//! Maintains a list of weight-p index sets over the H12^T rows and sieves
//! it constraint bit by constraint bit: elements already matching S2 on the
//! processed bits survive, and near-collision pairs inside random buckets
//! combine into new candidates. This module is experimental: it honors the
//! SubIsd contract and terminates, but its success probability is not
//! competitive and it is excluded from correctness testing.

use std::collections::HashSet;

use crate::core::ops::lastwordmask;
use crate::core::{MatView, SolverRng, VecView};
use crate::error::DecodingError;
use crate::tools::config::{self, ConfigMap};
use crate::tools::stats::DecodingStats;

use super::decoding::{SubIsd, collect_firstwords};

#[derive(Debug, Clone)]
pub struct SievingConfig {
    /// Sample weight; 1 <= p <= 4.
    pub p: usize,
    /// Intersection weight for pair combination.
    pub alpha: usize,
    /// List size.
    pub n: usize,
}

impl Default for SievingConfig {
    fn default() -> Self {
        SievingConfig { p: 3, alpha: 1, n: 100 }
    }
}

/// An index set of weight <= 4 with the XOR of its rows' first words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Element {
    idx: [u32; 4],
    len: u8,
}

impl Element {
    fn value(&self, firstwords: &[u64]) -> u64 {
        self.idx[..self.len as usize]
            .iter()
            .fold(0u64, |a, &i| a ^ firstwords[i as usize])
    }

    /// Symmetric difference of the supports; None when it exceeds 4.
    fn combine(&self, other: &Element) -> Option<Element> {
        let mut idx = [0u32; 4];
        let mut len = 0usize;
        for &i in &self.idx[..self.len as usize] {
            if !other.idx[..other.len as usize].contains(&i) {
                if len == 4 {
                    return None;
                }
                idx[len] = i;
                len += 1;
            }
        }
        for &i in &other.idx[..other.len as usize] {
            if !self.idx[..self.len as usize].contains(&i) {
                if len == 4 {
                    return None;
                }
                idx[len] = i;
                len += 1;
            }
        }
        if len == 0 {
            return None;
        }
        idx[..len].sort_unstable();
        Some(Element { idx, len: len as u8 })
    }

    fn intersection(&self, other: &Element) -> usize {
        self.idx[..self.len as usize]
            .iter()
            .filter(|i| other.idx[..other.len as usize].contains(i))
            .count()
    }
}

pub struct SubIsdSieving {
    config: SievingConfig,
    p: usize,
    alpha: usize,
    n_list: usize,
    rows: usize,
    columns: usize,
    firstwordmask: u64,
    firstwords: Vec<u64>,
    rng: SolverRng,
    stats: DecodingStats,
}

impl SubIsdSieving {
    pub fn new() -> Self {
        SubIsdSieving::with_config(SievingConfig::default())
    }

    pub fn with_config(config: SievingConfig) -> Self {
        SubIsdSieving {
            config,
            p: 0,
            alpha: 0,
            n_list: 0,
            rows: 0,
            columns: 0,
            firstwordmask: 0,
            firstwords: Vec::new(),
            rng: SolverRng::new(),
            stats: DecodingStats::new("sieving"),
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Sample up to `n_list` distinct weight-p index sets; attempts are
    /// bounded so tiny instances cannot stall the loop.
    fn sample_list(&mut self) -> Vec<Element> {
        let mut seen: HashSet<Element> = HashSet::new();
        let mut attempts = 0usize;
        let attempt_limit = self.n_list * 64;
        while seen.len() < self.n_list && attempts < attempt_limit {
            attempts += 1;
            let mut idx = [0u32; 4];
            let mut len = 0usize;
            while len < self.p {
                let c = self.rng.below(self.rows) as u32;
                if !idx[..len].contains(&c) {
                    idx[len] = c;
                    len += 1;
                }
            }
            idx[..len].sort_unstable();
            seen.insert(Element { idx, len: len as u8 });
        }
        seen.into_iter().collect()
    }

    fn sample_centers(&mut self) -> Vec<Element> {
        let weight = (self.p / 2).max(1).min(self.rows);
        let count = 32.min(self.rows);
        (0..count)
            .map(|_| {
                let mut idx = [0u32; 4];
                let mut len = 0usize;
                while len < weight {
                    let c = self.rng.below(self.rows) as u32;
                    if !idx[..len].contains(&c) {
                        idx[len] = c;
                        len += 1;
                    }
                }
                idx[..len].sort_unstable();
                Element { idx, len: len as u8 }
            })
            .collect()
    }
}

impl Default for SubIsdSieving {
    fn default() -> Self {
        SubIsdSieving::new()
    }
}

impl SubIsd for SubIsdSieving {
    const NAME: &'static str = "sieving";

    fn load_config(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError> {
        if let Some(p) = config::parse_option(cfg, "sieving", "p")? {
            self.config.p = p;
        }
        if let Some(a) = config::parse_option(cfg, "sieving", "alpha")? {
            self.config.alpha = a;
        }
        if let Some(n) = config::parse_option(cfg, "sieving", "N")? {
            self.config.n = n;
        }
        Ok(())
    }

    fn save_config(&self, cfg: &mut ConfigMap) {
        config::save_option(cfg, "p", self.config.p);
        config::save_option(cfg, "alpha", self.config.alpha);
        config::save_option(cfg, "N", self.config.n);
    }

    fn initialize(&mut self, rows: usize, l: usize, _w: usize) -> Result<(), DecodingError> {
        self.stats.cnt_initialize += 1;
        self.p = self.config.p;
        self.alpha = self.config.alpha;
        self.n_list = self.config.n;
        self.rows = rows;
        self.columns = l;
        if self.p == 0 || self.p > 4 {
            return Err(DecodingError::config("sieving", "sieving requires 1 <= p <= 4"));
        }
        if l == 0 || l > 64 {
            return Err(DecodingError::config("sieving", "sieving requires 1 <= l <= 64"));
        }
        if self.alpha == 0 || self.alpha > self.p {
            return Err(DecodingError::config("sieving", "sieving requires 1 <= alpha <= p"));
        }
        if self.n_list == 0 {
            return Err(DecodingError::config("sieving", "sieving requires a positive list size"));
        }
        if rows < self.p || rows >= 65535 {
            return Err(DecodingError::config("sieving", "sieving requires p <= rows < 65535"));
        }
        self.firstwordmask = lastwordmask(l);
        Ok(())
    }

    fn solve<F: FnMut(&[u32], u32) -> bool>(
        &mut self,
        h12t: &MatView<'_>,
        s2: &VecView<'_>,
        mut cb: F,
    ) -> Result<(), DecodingError> {
        self.stats.cnt_solve += 1;
        self.stats.cnt_prepare_loop += 1;
        collect_firstwords(h12t, self.firstwordmask, &mut self.firstwords);
        let sval = s2.words()[0] & self.firstwordmask;
        self.stats.cnt_loop_next += 1;

        let mut list = self.sample_list();
        for bit in 0..self.columns {
            let mask = lastwordmask(bit + 1);
            let target = sval & mask;
            let mut next: HashSet<Element> = HashSet::new();

            // survivors already matching the processed constraint bits
            for e in &list {
                if e.value(&self.firstwords) & mask == target {
                    next.insert(*e);
                }
            }

            // near-collision pairs inside random buckets
            let centers = self.sample_centers();
            for center in &centers {
                let min_overlap = self.alpha.min(center.len as usize);
                let bucket: Vec<&Element> =
                    list.iter().filter(|e| e.intersection(center) >= min_overlap).collect();
                for i in 0..bucket.len() {
                    let x = bucket[i];
                    for &y in &bucket[i + 1..] {
                        if next.len() >= self.n_list {
                            break;
                        }
                        if x.intersection(y) + self.alpha < self.p {
                            continue;
                        }
                        if let Some(z) = x.combine(y) {
                            if z.value(&self.firstwords) & mask == target {
                                next.insert(z);
                            }
                        }
                    }
                }
            }
            list = next.into_iter().collect();
            if list.is_empty() {
                return Ok(());
            }
        }

        let mut callbacks = 0u64;
        for e in &list {
            if e.value(&self.firstwords) == sval {
                callbacks += 1;
                if !cb(&e.idx[..e.len as usize], 0) {
                    break;
                }
            }
        }
        self.stats.cnt_callback += callbacks;
        Ok(())
    }

    fn stats(&self) -> &DecodingStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_symmetric_difference() {
        let a = Element { idx: [1, 2, 3, 0], len: 3 };
        let b = Element { idx: [3, 4, 0, 0], len: 2 };
        let c = a.combine(&b).unwrap();
        assert_eq!(&c.idx[..c.len as usize], &[1, 2, 4]);
        assert_eq!(a.intersection(&b), 1);
    }

    #[test]
    fn test_combine_identical_is_none() {
        let a = Element { idx: [1, 2, 0, 0], len: 2 };
        assert!(a.combine(&a).is_none());
    }

    #[test]
    fn test_config_checks() {
        let mut sv = SubIsdSieving::new();
        sv.config.p = 0;
        assert!(sv.initialize(50, 10, 5).is_err());
        sv.config.p = 3;
        assert!(sv.initialize(50, 0, 5).is_err());
        sv.config.alpha = 5;
        assert!(sv.initialize(50, 10, 5).is_err());
        sv.config.alpha = 1;
        assert!(sv.initialize(50, 10, 5).is_ok());
    }
}

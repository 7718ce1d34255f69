//! MMT: four-way meet-in-the-middle with an intermediate target split
//!
//! A random l1-bit mask iTl (with iTr = S2 ^ iTl) splits the target across
//! the two levels. Level one collides p/4-subsets on the bottom l1 bits in
//! a fixed-capacity bucket map; level two collides the combined pairs on
//! the remaining bits [l1, l) in the crate multimap; surviving 4-tuples go
//! to the driver.

use crate::core::ops::lastwordmask;
use crate::core::{MatView, SolverRng, VecView};
use crate::error::DecodingError;
use crate::tools::config::{self, ConfigMap};
use crate::tools::enumerate;
use crate::tools::multimap::CachelineMultimap;
use crate::tools::stats::DecodingStats;
use crate::tools::utils::binomial;

use super::decoding::{SubIsd, collect_firstwords};
use super::stern_dumer::{pack_indices, unpack_indices};

#[derive(Debug, Clone)]
pub struct MmtConfig {
    /// Total subset size; must be a multiple of 4.
    pub p: usize,
    /// First-level key bits; l1 < l.
    pub l1: usize,
    /// Entries per first-level bucket.
    pub bucketsize: usize,
}

impl Default for MmtConfig {
    fn default() -> Self {
        MmtConfig { p: 4, l1: 6, bucketsize: 10 }
    }
}

/// Fixed-capacity map with 2^l1 direct-indexed buckets; overflowing
/// entries are dropped, which only costs candidate coverage.
struct FixedBucketMap {
    bucketsize: usize,
    entries: Vec<(u64, u64)>,
    loads: Vec<u16>,
}

impl FixedBucketMap {
    fn new(bucketsize: usize, nrbuckets: usize) -> Self {
        FixedBucketMap {
            bucketsize,
            entries: vec![(0, 0); bucketsize * nrbuckets],
            loads: vec![0; nrbuckets],
        }
    }

    fn clear(&mut self) {
        self.loads.fill(0);
    }

    #[inline]
    fn insert(&mut self, bucket: u64, value: (u64, u64)) {
        let b = bucket as usize;
        let load = self.loads[b] as usize;
        if load == self.bucketsize {
            return;
        }
        self.entries[b * self.bucketsize + load] = value;
        self.loads[b] += 1;
    }

    #[inline]
    fn bucket(&self, bucket: u64) -> &[(u64, u64)] {
        let b = bucket as usize;
        &self.entries[b * self.bucketsize..b * self.bucketsize + self.loads[b] as usize]
    }
}

pub struct SubIsdMmt {
    config: MmtConfig,
    p1: usize,
    l1: usize,
    rows2: usize,
    firstwordmask: u64,
    l1mask: u64,
    helpermask: u64,
    firstwords: Vec<u64>,
    level1: Option<FixedBucketMap>,
    intermediate: CachelineMultimap,
    rng: SolverRng,
    stats: DecodingStats,
}

impl SubIsdMmt {
    pub fn new() -> Self {
        SubIsdMmt::with_config(MmtConfig::default())
    }

    pub fn with_config(config: MmtConfig) -> Self {
        let mut intermediate = CachelineMultimap::new();
        intermediate.set_auto_grow(true);
        SubIsdMmt {
            config,
            p1: 0,
            l1: 0,
            rows2: 0,
            firstwordmask: 0,
            l1mask: 0,
            helpermask: 0,
            firstwords: Vec::new(),
            level1: None,
            intermediate,
            rng: SolverRng::new(),
            stats: DecodingStats::new("mmt"),
        }
    }

    /// Seed the intermediate-target randomness for reproducible runs.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }
}

impl Default for SubIsdMmt {
    fn default() -> Self {
        SubIsdMmt::new()
    }
}

impl SubIsd for SubIsdMmt {
    const NAME: &'static str = "mmt";

    fn load_config(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError> {
        if let Some(p) = config::parse_option(cfg, "mmt", "p")? {
            self.config.p = p;
        }
        if let Some(l1) = config::parse_option(cfg, "mmt", "l1")? {
            self.config.l1 = l1;
        }
        if let Some(b) = config::parse_option(cfg, "mmt", "bucketsize")? {
            self.config.bucketsize = b;
        }
        Ok(())
    }

    fn save_config(&self, cfg: &mut ConfigMap) {
        config::save_option(cfg, "p", self.config.p);
        config::save_option(cfg, "l1", self.config.l1);
        config::save_option(cfg, "bucketsize", self.config.bucketsize);
    }

    fn initialize(&mut self, rows: usize, l: usize, _w: usize) -> Result<(), DecodingError> {
        self.stats.cnt_initialize += 1;
        let p = self.config.p;
        if p == 0 || p % 4 != 0 {
            return Err(DecodingError::config("mmt", "MMT requires p to be a positive multiple of 4"));
        }
        self.p1 = p / 4;
        self.l1 = self.config.l1;
        let rows1 = rows / 2;
        self.rows2 = rows - rows1;

        if l < 6 {
            return Err(DecodingError::config("mmt", "MMT does not support l < 6"));
        }
        if l > 64 {
            return Err(DecodingError::config("mmt", "MMT does not support l > 64"));
        }
        if self.p1 > 2 {
            // the 4 x 16-bit packed index words cannot carry 2*p/4 > 4
            // indices per combined pair
            return Err(DecodingError::config("mmt", "MMT does not support p > 8"));
        }
        if rows1 >= 65535 || self.rows2 >= 65535 {
            return Err(DecodingError::config("mmt", "MMT does not support half sizes >= 65535"));
        }
        if self.l1 >= l {
            return Err(DecodingError::config("mmt", "MMT requires l1 < l"));
        }
        if self.l1 > 24 {
            return Err(DecodingError::config(
                "mmt",
                "MMT does not support l1 > 24 (the first-level map is direct-indexed)",
            ));
        }
        if self.config.bucketsize == 0 {
            return Err(DecodingError::config("mmt", "MMT requires a positive bucketsize"));
        }

        self.firstwordmask = lastwordmask(l);
        self.firstwords.clear();
        self.firstwords.reserve(rows);
        self.l1mask = lastwordmask(self.l1);
        self.helpermask = lastwordmask(16 * self.p1);
        self.level1 = Some(FixedBucketMap::new(self.config.bucketsize, 1usize << self.l1));

        let n_first: u128 = (1..=self.p1).map(|i| binomial(self.rows2, i)).sum();
        let n_second: u128 = (1..=self.p1).map(|i| binomial(rows - self.rows2, i)).sum();
        let expected = (((n_second as f64) * (n_first as f64) / 2f64.powi(self.l1 as i32))
            .ceil()
            .max(1024.0) as usize)
            .min(1 << 24);
        self.intermediate.clear();
        self.intermediate.reserve(expected, 2.0);
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
        let itl = self.rng.next_u64() & self.l1mask;
        let itr = sval ^ itl;

        let level1 = self.level1.as_mut().expect("initialized");
        level1.clear();
        self.intermediate.clear();
        self.stats.cnt_loop_next += 1;

        let (first_half, second_half) = self.firstwords.split_at(self.rows2);
        let rows2 = self.rows2 as u32;
        let p1 = self.p1;
        let l1 = self.l1;
        let l1mask = self.l1mask;
        let helpermask = self.helpermask;

        // level 1: index p/4-subsets of the first half by their bottom l1 bits
        enumerate::enumerate_exact(first_half, p1, |idx: &[u32], val: u64| {
            level1.insert(val & l1mask, (val, pack_indices(idx)));
        });

        // level 2 build: pair second-half subsets with colliding level-1
        // entries, keyed on the remaining bits of the combined value
        let intermediate = &mut self.intermediate;
        enumerate::enumerate_exact(second_half, p1, |idx: &[u32], val: u64| {
            let val = val ^ itl;
            let mut abs = [0u32; 4];
            for (j, &i) in idx.iter().enumerate() {
                abs[j] = i + rows2;
            }
            let tmp = pack_indices(&abs[..idx.len()]) << (16 * p1);
            for &(k_val, k_packed) in level1.bucket(val & l1mask) {
                let val3 = val ^ k_val;
                let tmp2 = tmp ^ (k_packed & helpermask);
                intermediate.insert(val3 >> l1, tmp2);
            }
        });

        // level 2 probe: second-half subsets against iTr, then the
        // intermediate map on the upper bits; report combined 4-tuples
        let mut callbacks = 0u64;
        let mut stop = false;
        enumerate::enumerate_exact(second_half, p1, |idx: &[u32], val: u64| -> bool {
            let val = val ^ itr;
            let mut buf = [0u32; 8];
            let mut fill = 0usize;
            for &i in idx {
                buf[fill] = i + rows2;
                fill += 1;
            }
            for &(k_val, k_packed) in level1.bucket(val & l1mask) {
                let val3 = (val ^ k_val) >> l1;
                let fill2 = unpack_indices(k_packed, 0, &mut buf, fill);
                intermediate.match_key(val3, |packed: u64| {
                    if stop {
                        return;
                    }
                    let mut tuple = buf;
                    let fill3 = unpack_indices(packed, 0, &mut tuple, fill2);
                    // a repeated row cancels out of the sum; such tuples are
                    // not p-subsets and must not reach the driver
                    let t = &tuple[..fill3];
                    if t.iter().enumerate().any(|(a, x)| t[..a].contains(x)) {
                        return;
                    }
                    callbacks += 1;
                    if !cb(t, 0) {
                        stop = true;
                    }
                });
                if stop {
                    break;
                }
            }
            !stop
        });
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
    fn test_config_checks() {
        let mut mmt = SubIsdMmt::new();
        mmt.config.p = 3;
        assert!(mmt.initialize(100, 14, 10).is_err());
        mmt.config.p = 12;
        assert!(mmt.initialize(100, 14, 10).is_err());
        mmt.config.p = 4;
        mmt.config.l1 = 14;
        assert!(mmt.initialize(100, 14, 10).is_err());
        mmt.config.l1 = 6;
        assert!(mmt.initialize(100, 14, 10).is_ok());
        assert!(mmt.initialize(100, 5, 10).is_err());
    }

    #[test]
    fn test_fixed_bucket_map() {
        let mut map = FixedBucketMap::new(2, 4);
        map.insert(1, (10, 100));
        map.insert(1, (11, 101));
        map.insert(1, (12, 102)); // dropped, bucket full
        assert_eq!(map.bucket(1), &[(10, 100), (11, 101)]);
        assert!(map.bucket(0).is_empty());
        map.clear();
        assert!(map.bucket(1).is_empty());
    }
}

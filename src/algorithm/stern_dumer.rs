//! Stern/Dumer: two-sided meet-in-the-middle over the l-bit key
//!
//! The k+l rows split into two halves. Left p/2-subsets mark the staged
//! bitfield; right subsets, XORed against S2, probe it and park their
//! packed indices in the multimap on a hit; a second left pass retrieves
//! the colliding pairs and reports them. Index tuples travel packed as
//! four 16-bit fields in a u64, 0xFFFF marking unused slots.

use crate::core::ops::lastwordmask;
use crate::core::{MatView, VecView};
use crate::error::DecodingError;
use crate::tools::bitfield::StagedBitfield;
use crate::tools::config::{self, ConfigMap};
use crate::tools::enumerate;
use crate::tools::multimap::BatchMultimap;
use crate::tools::stats::DecodingStats;
use crate::tools::utils::binomial;

use super::decoding::{SubIsd, collect_firstwords};

#[derive(Debug, Clone)]
pub struct SternDumerConfig {
    /// Total subset size; split as floor(p/2) left, ceil(p/2) right.
    pub p: usize,
}

impl Default for SternDumerConfig {
    fn default() -> Self {
        SternDumerConfig { p: 4 }
    }
}

pub struct SubIsdSternDumer {
    config: SternDumerConfig,
    p: usize,
    p1: usize,
    p2: usize,
    rows1: usize,
    firstwordmask: u64,
    firstwords: Vec<u64>,
    bitfield: StagedBitfield,
    hashmap: BatchMultimap,
    stats: DecodingStats,
}

pub(crate) fn pack_indices(idx: &[u32]) -> u64 {
    debug_assert!(idx.len() <= 4);
    let mut x = !0u64;
    for &i in idx {
        x = (x << 16) | i as u64;
    }
    x
}

pub(crate) fn unpack_indices(mut x: u64, offset: u32, out: &mut [u32; 8], fill: usize) -> usize {
    let mut fill = fill;
    for _ in 0..4 {
        let y = (x & 0xFFFF) as u32;
        if y == 0xFFFF {
            break;
        }
        out[fill] = y + offset;
        fill += 1;
        x >>= 16;
    }
    fill
}

impl SubIsdSternDumer {
    pub fn new() -> Self {
        SubIsdSternDumer::with_config(SternDumerConfig::default())
    }

    pub fn with_config(config: SternDumerConfig) -> Self {
        SubIsdSternDumer {
            config,
            p: 0,
            p1: 0,
            p2: 0,
            rows1: 0,
            firstwordmask: 0,
            firstwords: Vec::new(),
            bitfield: StagedBitfield::new(),
            hashmap: BatchMultimap::new(),
            stats: DecodingStats::new("stern_dumer"),
        }
    }

    /// Expected number of right-side values surviving the stage-2 filter.
    fn expected_matches(n_left: u128, n_right: u128, l: usize) -> usize {
        let key_space = 2f64.powi(l as i32);
        let hit_rate = (n_left as f64 / key_space).min(1.0);
        (((n_right as f64 * hit_rate).ceil() as usize).max(1024)).min(1 << 24)
    }
}

impl Default for SubIsdSternDumer {
    fn default() -> Self {
        SubIsdSternDumer::new()
    }
}

impl SubIsd for SubIsdSternDumer {
    const NAME: &'static str = "stern_dumer";

    fn load_config(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError> {
        if let Some(p) = config::parse_option(cfg, "stern_dumer", "p")? {
            self.config.p = p;
        }
        Ok(())
    }

    fn save_config(&self, cfg: &mut ConfigMap) {
        config::save_option(cfg, "p", self.config.p);
    }

    fn initialize(&mut self, rows: usize, l: usize, _w: usize) -> Result<(), DecodingError> {
        self.stats.cnt_initialize += 1;
        self.p = self.config.p;
        self.p1 = self.p / 2;
        self.p2 = self.p - self.p1;
        self.rows1 = rows / 2;
        let rows2 = rows - self.rows1;

        if self.p < 2 {
            return Err(DecodingError::config(
                "stern_dumer",
                "Stern/Dumer does not support p < 2",
            ));
        }
        if self.p > 8 {
            return Err(DecodingError::config(
                "stern_dumer",
                "Stern/Dumer does not support p > 8",
            ));
        }
        if l < 6 {
            return Err(DecodingError::config(
                "stern_dumer",
                "Stern/Dumer does not support l < 6 (the bitfield needs the address space)",
            ));
        }
        if l > 64 {
            return Err(DecodingError::config(
                "stern_dumer",
                "Stern/Dumer does not support l > 64",
            ));
        }
        if self.rows1 >= 65535 || rows2 >= 65535 {
            return Err(DecodingError::config(
                "stern_dumer",
                "Stern/Dumer does not support half sizes >= 65535",
            ));
        }

        self.firstwordmask = lastwordmask(l);
        self.firstwords.clear();
        self.firstwords.reserve(rows);
        // the bitfield address space may be narrower than l: aliasing only
        // adds false positives, which the multimap lookup then drops
        self.bitfield.resize(l.min(26), 0, 0)?;

        let n_left: u128 = (1..=self.p1).map(|i| binomial(self.rows1, i)).sum();
        let n_right: u128 = (1..=self.p2).map(|i| binomial(rows2, i)).sum();
        self.hashmap.clear();
        self.hashmap.reserve(Self::expected_matches(n_left, n_right, l), 2.0);
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
        self.bitfield.clear();
        self.hashmap.clear();
        self.stats.cnt_loop_next += 1;

        let (left, right) = self.firstwords.split_at(self.rows1);
        let rows1 = self.rows1 as u32;
        let (p1, p2) = (self.p1, self.p2);

        // stage 1: mark every left value
        let bitfield = &mut self.bitfield;
        enumerate::enumerate_val(left, p1, |val: u64| {
            bitfield.stage1(val);
        });

        // stage 2: probe with right values; store packed indices on a hit
        let hashmap = &mut self.hashmap;
        enumerate::enumerate(right, p2, |idx: &[u32], val: u64| {
            let val = val ^ sval;
            if bitfield.stage2(val) {
                hashmap.queue_insert(val, pack_indices(idx));
            }
        });
        hashmap.finalize_insert();

        // stage 3: retrieve collisions for every left value and report;
        // stopping is best-effort since matches drain in batches
        let callbacks = std::cell::Cell::new(0u64);
        let stop = std::cell::Cell::new(false);
        {
            let mut handler = |aux: u64, _key: u64, packed: u64| {
                if stop.get() {
                    return;
                }
                let mut idx = [0u32; 8];
                let fill = unpack_indices(aux, 0, &mut idx, 0);
                let fill = unpack_indices(packed, rows1, &mut idx, fill);
                callbacks.set(callbacks.get() + 1);
                if !cb(&idx[..fill], 0) {
                    stop.set(true);
                }
            };
            enumerate::enumerate(left, p1, |idx: &[u32], val: u64| -> bool {
                if bitfield.stage3(val) {
                    hashmap.queue_match(val, pack_indices(idx), &mut handler);
                }
                !stop.get()
            });
            hashmap.finalize_match(&mut handler);
        }
        self.stats.cnt_callback += callbacks.get();
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
    fn test_pack_unpack_roundtrip() {
        let packed = pack_indices(&[3, 7]);
        let mut out = [0u32; 8];
        let fill = unpack_indices(packed, 0, &mut out, 0);
        assert_eq!(&out[..fill], &[7, 3]);
        let fill2 = unpack_indices(packed, 10, &mut out, 0);
        assert_eq!(&out[..fill2], &[17, 13]);
    }

    #[test]
    fn test_pack_empty_and_full() {
        assert_eq!(pack_indices(&[]), !0u64);
        let packed = pack_indices(&[1, 2, 3, 4]);
        let mut out = [0u32; 8];
        let fill = unpack_indices(packed, 0, &mut out, 0);
        assert_eq!(fill, 4);
        let mut got = out[..4].to_vec();
        got.sort_unstable();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_config_bounds() {
        let mut sd = SubIsdSternDumer::new();
        sd.config.p = 1;
        assert!(sd.initialize(100, 14, 10).is_err());
        sd.config.p = 9;
        assert!(sd.initialize(100, 14, 10).is_err());
        sd.config.p = 4;
        assert!(sd.initialize(100, 5, 10).is_err());
        assert!(sd.initialize(100, 65, 10).is_err());
        assert!(sd.initialize(100, 14, 10).is_ok());
    }
}

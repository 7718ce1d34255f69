//! Lee-Brickell: enumerate all <=p-subsets of H12^T rows
//!
//! Works on the first word of each row: a subset whose XOR matches S2 on
//! the low l bits is a candidate, and the weight its XOR carries on the
//! remaining padding bits of that word is handed to the driver as the
//! partial weight.

use crate::core::ops::{hammingweight, lastwordmask};
use crate::core::{MatView, VecView};
use crate::error::DecodingError;
use crate::tools::config::{self, ConfigMap};
use crate::tools::enumerate;
use crate::tools::stats::DecodingStats;

use super::decoding::{SubIsd, collect_firstwords};

#[derive(Debug, Clone)]
pub struct LeeBrickellConfig {
    /// Subset size bound; 1 <= p <= 4.
    pub p: usize,
}

impl Default for LeeBrickellConfig {
    fn default() -> Self {
        LeeBrickellConfig { p: 3 }
    }
}

pub struct SubIsdLeeBrickell {
    config: LeeBrickellConfig,
    p: usize,
    columns: usize,
    firstwordmask: u64,
    padmask: u64,
    firstwords: Vec<u64>,
    stats: DecodingStats,
}

impl SubIsdLeeBrickell {
    pub fn new() -> Self {
        SubIsdLeeBrickell::with_config(LeeBrickellConfig::default())
    }

    pub fn with_config(config: LeeBrickellConfig) -> Self {
        SubIsdLeeBrickell {
            config,
            p: 0,
            columns: 0,
            firstwordmask: 0,
            padmask: 0,
            firstwords: Vec::new(),
            stats: DecodingStats::new("lee_brickell"),
        }
    }
}

impl Default for SubIsdLeeBrickell {
    fn default() -> Self {
        SubIsdLeeBrickell::new()
    }
}

impl SubIsd for SubIsdLeeBrickell {
    const NAME: &'static str = "lee_brickell";

    fn load_config(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError> {
        if let Some(p) = config::parse_option(cfg, "lee_brickell", "p")? {
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
        if self.p == 0 {
            return Err(DecodingError::config(
                "lee_brickell",
                "Lee-Brickell does not support p = 0",
            ));
        }
        if self.p > 4 {
            return Err(DecodingError::config(
                "lee_brickell",
                "Lee-Brickell enumeration supports p <= 4",
            ));
        }
        if l > 64 {
            return Err(DecodingError::config(
                "lee_brickell",
                "Lee-Brickell does not support l > 64",
            ));
        }
        self.columns = l;
        self.firstwordmask = if l == 0 { 0 } else { lastwordmask(l) };
        self.padmask = !self.firstwordmask;
        self.firstwords.clear();
        self.firstwords.reserve(rows);
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
        // unmasked: the padding bits of the first word contribute the
        // partial weight
        collect_firstwords(h12t, !0u64, &mut self.firstwords);
        self.stats.cnt_loop_next += 1;

        let mut callbacks = 0u64;
        if self.columns == 0 {
            enumerate::enumerate(&self.firstwords, self.p, |idx: &[u32], _val: u64| -> bool {
                callbacks += 1;
                cb(idx, 0)
            });
        } else {
            let sval = s2.words()[0] & self.firstwordmask;
            let fwm = self.firstwordmask;
            let padmask = self.padmask;
            enumerate::enumerate(&self.firstwords, self.p, |idx: &[u32], val: u64| -> bool {
                if val & fwm == sval {
                    callbacks += 1;
                    return cb(idx, hammingweight(val & padmask) as u32);
                }
                true
            });
        }
        self.stats.cnt_callback += callbacks;
        Ok(())
    }

    fn stats(&self) -> &DecodingStats {
        &self.stats
    }
}

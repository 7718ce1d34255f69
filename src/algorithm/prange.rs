//! Prange's algorithm: the trivial sub-ISD
//!
//! With l = 0 there is nothing to match; the permuted syndrome itself is
//! the candidate. A single callback with an empty index set succeeds iff
//! S1 already has weight <= w.

use crate::core::{MatView, VecView};
use crate::error::DecodingError;
use crate::tools::config::ConfigMap;
use crate::tools::stats::DecodingStats;

use super::decoding::SubIsd;

pub struct SubIsdPrange {
    stats: DecodingStats,
}

impl SubIsdPrange {
    pub fn new() -> Self {
        SubIsdPrange { stats: DecodingStats::new("prange") }
    }
}

impl Default for SubIsdPrange {
    fn default() -> Self {
        SubIsdPrange::new()
    }
}

impl SubIsd for SubIsdPrange {
    const NAME: &'static str = "prange";

    fn load_config(&mut self, _cfg: &ConfigMap) -> Result<(), DecodingError> {
        Ok(())
    }

    fn save_config(&self, _cfg: &mut ConfigMap) {}

    fn initialize(&mut self, _rows: usize, l: usize, _w: usize) -> Result<(), DecodingError> {
        self.stats.cnt_initialize += 1;
        if l != 0 {
            return Err(DecodingError::config("prange", "Prange does not support l > 0"));
        }
        Ok(())
    }

    fn solve<F: FnMut(&[u32], u32) -> bool>(
        &mut self,
        _h12t: &MatView<'_>,
        _s2: &VecView<'_>,
        mut cb: F,
    ) -> Result<(), DecodingError> {
        self.stats.cnt_solve += 1;
        self.stats.cnt_callback += 1;
        cb(&[], 0);
        Ok(())
    }

    fn stats(&self) -> &DecodingStats {
        &self.stats
    }
}

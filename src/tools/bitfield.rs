//! Three-stage collision bitfield for meet-in-the-middle matching
//!
//! Each address maps to a 2-bit slot spread over the two 32-bit halves of a
//! u64 word: the bottom half holds the L1 mark, the top half the L2 mark.
//!
//! - stage 1: mark every left-table value in L1
//! - stage 2: probe a right-table value; on an L1 hit, mark L2 and report
//!   whether the hit is fresh
//! - stage 3: probe a left-table value again; true iff some right value
//!   collided with it in stage 2
//!
//! The optional filters are plain 1-bit-per-address bloom filters with a
//! shorter address space, intended to fit a cache level the bitfield
//! outgrows; filter1 short-circuits stage 2, filter2 stage 3.

use crate::error::DecodingError;

pub struct StagedBitfield<const USE_FILTER1: bool = false, const USE_FILTER2: bool = false> {
    bitfield: Vec<u64>,
    filter1: Vec<u64>,
    filter2: Vec<u64>,
    addressmask_bitfield: u64,
    addressmask_filter1: u64,
    addressmask_filter2: u64,
}

impl<const USE_FILTER1: bool, const USE_FILTER2: bool> StagedBitfield<USE_FILTER1, USE_FILTER2> {
    pub fn new() -> Self {
        StagedBitfield {
            bitfield: Vec::new(),
            filter1: Vec::new(),
            filter2: Vec::new(),
            addressmask_bitfield: 0,
            addressmask_filter1: 0,
            addressmask_filter2: 0,
        }
    }

    /// Allocate for the given address-bit widths. The bitfield needs at
    /// least 2^5 addresses, each filter at least 2^6.
    pub fn resize(
        &mut self,
        bitfield_address_bits: usize,
        filter1_address_bits: usize,
        filter2_address_bits: usize,
    ) -> Result<(), DecodingError> {
        if bitfield_address_bits < 5 {
            return Err(DecodingError::config(
                "staged_bitfield",
                "bitfield address bits must be at least 5",
            ));
        }
        if USE_FILTER1 && filter1_address_bits < 6 {
            return Err(DecodingError::config(
                "staged_bitfield",
                "filter1 is enabled, so filter1 address bits must be at least 6",
            ));
        }
        if USE_FILTER2 && filter2_address_bits < 6 {
            return Err(DecodingError::config(
                "staged_bitfield",
                "filter2 is enabled, so filter2 address bits must be at least 6",
            ));
        }
        if !USE_FILTER1 && filter1_address_bits != 0 {
            return Err(DecodingError::config(
                "staged_bitfield",
                "filter1 is disabled, so filter1 address bits must be 0",
            ));
        }
        if !USE_FILTER2 && filter2_address_bits != 0 {
            return Err(DecodingError::config(
                "staged_bitfield",
                "filter2 is disabled, so filter2 address bits must be 0",
            ));
        }

        self.bitfield = vec![0u64; 1usize << (bitfield_address_bits - 5)];
        self.addressmask_bitfield = self.bitfield.len() as u64 - 1;
        if USE_FILTER1 {
            self.filter1 = vec![0u64; 1usize << (filter1_address_bits - 6)];
            self.addressmask_filter1 = self.filter1.len() as u64 - 1;
        }
        if USE_FILTER2 {
            self.filter2 = vec![0u64; 1usize << (filter2_address_bits - 6)];
            self.addressmask_filter2 = self.filter2.len() as u64 - 1;
        }
        self.clear();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.bitfield.fill(0);
        self.filter1.fill(0);
        self.filter2.fill(0);
    }

    #[inline]
    fn filter1_set(&mut self, l1val: u64) {
        if USE_FILTER1 {
            self.filter1[((l1val / 64) & self.addressmask_filter1) as usize] |= 1u64 << (l1val % 64);
        }
    }

    #[inline]
    fn filter2_set(&mut self, l2val: u64) {
        if USE_FILTER2 {
            self.filter2[((l2val / 64) & self.addressmask_filter2) as usize] |= 1u64 << (l2val % 64);
        }
    }

    #[inline]
    fn filter1_get(&self, l2val: u64) -> bool {
        if !USE_FILTER1 {
            return true;
        }
        self.filter1[((l2val / 64) & self.addressmask_filter1) as usize] & (1u64 << (l2val % 64))
            != 0
    }

    #[inline]
    fn filter2_get(&self, l1val: u64) -> bool {
        if !USE_FILTER2 {
            return true;
        }
        self.filter2[((l1val / 64) & self.addressmask_filter2) as usize] & (1u64 << (l1val % 64))
            != 0
    }

    #[inline]
    pub fn stage1(&mut self, l1val: u64) {
        self.bitfield[((l1val / 32) & self.addressmask_bitfield) as usize] |= 1u64 << (l1val % 32);
        self.filter1_set(l1val);
    }

    /// Probe with a right-table value; on a stage-1 hit, mark L2. Returns
    /// true iff the L1 bit was set.
    #[inline]
    pub fn stage2(&mut self, l2val: u64) -> bool {
        if !self.filter1_get(l2val) {
            return false;
        }
        let slot = ((l2val / 32) & self.addressmask_bitfield) as usize;
        let l1bit = 1u64 << (l2val % 32);
        let x = self.bitfield[slot];
        if x & l1bit == 0 {
            return false;
        }
        self.bitfield[slot] = x | (l1bit << 32);
        self.filter2_set(l2val);
        true
    }

    /// Probe with a left-table value; true iff stage 2 marked this address.
    #[inline]
    pub fn stage3(&self, l1val: u64) -> bool {
        if !self.filter2_get(l1val) {
            return false;
        }
        self.bitfield[((l1val / 32) & self.addressmask_bitfield) as usize]
            & ((1u64 << 32) << (l1val % 32))
            != 0
    }
}

impl<const F1: bool, const F2: bool> Default for StagedBitfield<F1, F2> {
    fn default() -> Self {
        StagedBitfield::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_progression() {
        let mut bf: StagedBitfield = StagedBitfield::new();
        bf.resize(10, 0, 0).unwrap();
        bf.stage1(12345);
        assert!(bf.stage2(12345), "stage 2 must see the stage 1 mark");
        assert!(bf.stage3(12345), "stage 3 must see the stage 2 mark");
        // untouched address
        assert!(!bf.stage2(54321 ^ 1));
        assert!(!bf.stage3(777));
    }

    #[test]
    fn test_stage3_requires_stage2() {
        let mut bf: StagedBitfield = StagedBitfield::new();
        bf.resize(8, 0, 0).unwrap();
        bf.stage1(99);
        assert!(!bf.stage3(99), "no stage-2 probe yet");
        assert!(bf.stage2(99));
        assert!(bf.stage3(99));
    }

    #[test]
    fn test_clear_resets() {
        let mut bf: StagedBitfield = StagedBitfield::new();
        bf.resize(8, 0, 0).unwrap();
        bf.stage1(7);
        bf.stage2(7);
        bf.clear();
        assert!(!bf.stage2(7));
        assert!(!bf.stage3(7));
    }

    #[test]
    fn test_filters_enabled() {
        let mut bf: StagedBitfield<true, true> = StagedBitfield::new();
        bf.resize(10, 8, 8).unwrap();
        bf.stage1(1000);
        assert!(bf.stage2(1000));
        assert!(bf.stage3(1000));
        // values never marked in stage 1 are rejected (possibly by filter)
        assert!(!bf.stage3(1234567));
    }

    #[test]
    fn test_config_checks() {
        let mut bf: StagedBitfield = StagedBitfield::new();
        assert!(bf.resize(4, 0, 0).is_err());
        assert!(bf.resize(8, 1, 0).is_err());
        let mut bff: StagedBitfield<true, false> = StagedBitfield::new();
        assert!(bff.resize(8, 5, 0).is_err());
        assert!(bff.resize(8, 6, 0).is_ok());
    }
}

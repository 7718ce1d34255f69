//! Maintains (H|S)^T in the performance-oriented ISD form
//!
//! After a column permutation of H, (H|S) is kept as
//!
//! ```text
//!   HS = ( 0  | H2 | s2 ) = U x ((H x P) | S)
//!        ( AI | H1 | s1 )
//! ```
//!
//! with AI the anti-diagonal identity (reverse row reduction, bottom to
//! top). Stored transposed, so HST is (n+1) x (n-k):
//!
//! ```text
//!   HST = ( 0    | AI   )     rows 0 .. n-k-l      (echelon rows)
//!         ( H2^T | H1^T )     rows n-k-l .. n      (ISD rows)
//!         ( s2^T | s1^T )     row  n
//! ```
//!
//! H2^T columns come before H1^T columns, so the H2^T block can be padded
//! with additional H1^T columns up to the SIMD block width. Column-pair
//! swaps of H become row swaps of HST followed by a cheap re-reduction.

use crate::error::DecodingError;

use super::block::{BlockTag, DefaultTag, pad_columns};
use super::matrix::{MatView, Matrix, VecView};
use super::ops;
use super::random::SolverRng;
use super::transpose::transpose;

pub struct HstIsdForm {
    hst: Matrix,

    ht_rows: usize,    // n
    ht_columns: usize, // n - k
    h2t_columns: usize,
    ht_columns_padded: usize,
    echelon_rows: usize,
    isd_rows: usize,
    max_update_rows: usize,
    echelon_start: usize,
    cur_echelon_row: usize,
    cur_isd_row: usize,
    rnd_isd_row: usize,

    // HST row index -> original H column index
    perm: Vec<u32>,
    echelon_perm: Vec<u32>,
    isd_perm: Vec<u32>,

    rng: SolverRng,
}

impl HstIsdForm {
    pub fn new<T: BlockTag>(
        h: &MatView<'_, T>,
        s: &VecView<'_, T>,
        l: usize,
        rng: SolverRng,
    ) -> Result<Self, DecodingError> {
        let mut form = HstIsdForm {
            hst: Matrix::default(),
            ht_rows: 0,
            ht_columns: 0,
            h2t_columns: 0,
            ht_columns_padded: 0,
            echelon_rows: 0,
            isd_rows: 0,
            max_update_rows: 0,
            echelon_start: 0,
            cur_echelon_row: 0,
            cur_isd_row: 0,
            rnd_isd_row: 0,
            perm: Vec::new(),
            echelon_perm: Vec::new(),
            isd_perm: Vec::new(),
            rng,
        };
        form.reset(h, s, l)?;
        Ok(form)
    }

    /// Rebuild the form for a new instance; randomizes the permutation and
    /// brings HST into ISD form.
    pub fn reset<T: BlockTag>(
        &mut self,
        h: &MatView<'_, T>,
        s: &VecView<'_, T>,
        l: usize,
    ) -> Result<(), DecodingError> {
        if l >= h.rows() {
            return Err(DecodingError::input(format!(
                "l ({}) must be smaller than the syndrome length ({})",
                l,
                h.rows()
            )));
        }
        if s.columns() != h.rows() {
            return Err(DecodingError::input(format!(
                "syndrome length {} does not match H row count {}",
                s.columns(),
                h.rows()
            )));
        }

        self.ht_rows = h.columns();
        self.ht_columns = h.rows();
        self.ht_columns_padded = pad_columns::<DefaultTag>(self.ht_columns);
        self.h2t_columns = l;
        self.echelon_rows = self.ht_columns - l;
        self.isd_rows = self.ht_rows - self.echelon_rows;
        self.max_update_rows =
            1.max(self.echelon_rows * self.isd_rows / (self.echelon_rows + self.isd_rows));

        self.hst = Matrix::new(self.ht_rows + 1, self.ht_columns_padded);
        {
            let mut hst_view = self.hst.as_view_mut::<DefaultTag>();
            let mut ht = hst_view.submatrix_mut(0, self.ht_rows, 0, self.ht_columns);
            transpose(&mut ht, h);
        }
        {
            let live = self.ht_columns.div_ceil(64);
            let cols = self.ht_columns;
            let srow = self.hst.row_words_mut(self.ht_rows);
            srow[..live].copy_from_slice(&s.words()[..live]);
            srow[live - 1] &= ops::lastwordmask(cols);
        }

        self.perm = (0..self.ht_rows as u32).collect();
        self.echelon_perm = (0..self.echelon_rows as u32).collect();
        self.isd_perm = (0..self.isd_rows as u32).collect();
        self.cur_echelon_row = 0;
        self.cur_isd_row = 0;
        self.rnd_isd_row = 0;

        // randomize & bring into ISD form
        self.echelon_start = 0;
        while self.echelon_start < self.echelon_rows {
            let pivotcol = self.ht_columns - self.echelon_start - 1;
            // start at a random remaining row, scan for a 1 at pivotcol,
            // wrap around once
            let mut r = self.echelon_start + self.rng.below(self.ht_rows - self.echelon_start);
            while r < self.ht_rows && !self.hst.get_bit(r, pivotcol) {
                r += 1;
            }
            if r == self.ht_rows {
                r = self.echelon_start;
                while r < self.ht_rows && !self.hst.get_bit(r, pivotcol) {
                    r += 1;
                }
            }
            if r == self.ht_rows {
                return Err(DecodingError::degenerate("cannot bring H into ISD form"));
            }
            self.swap_echelon_row(self.echelon_start, r);
            self.echelon_start += 1;
        }
        Ok(())
    }

    pub fn permutation(&self) -> &[u32] {
        &self.perm
    }

    #[inline]
    pub fn permute(&self, hst_row: usize) -> usize {
        self.perm[hst_row] as usize
    }

    pub fn echelon_rows(&self) -> usize {
        self.echelon_rows
    }

    pub fn isd_rows(&self) -> usize {
        self.isd_rows
    }

    pub fn max_update_rows(&self) -> usize {
        self.max_update_rows
    }

    pub fn ht_columns(&self) -> usize {
        self.ht_columns
    }

    pub fn ht_columns_padded(&self) -> usize {
        self.ht_columns_padded
    }

    pub fn h2t_columns(&self) -> usize {
        self.h2t_columns
    }

    /// The (k+l) x (n-k) block holding (H2^T | H1^T).
    pub fn h12t(&self) -> MatView<'_, DefaultTag> {
        self.hst.as_view().submatrix(self.echelon_rows, self.isd_rows, 0, self.ht_columns)
    }

    /// Same block with columns padded to the block width; padding bits are
    /// kept zero.
    pub fn h12t_padded(&self) -> MatView<'_, DefaultTag> {
        self.hst.as_view().submatrix(self.echelon_rows, self.isd_rows, 0, self.ht_columns_padded)
    }

    pub fn h2t(&self) -> MatView<'_, DefaultTag> {
        self.hst.as_view().submatrix(self.echelon_rows, self.isd_rows, 0, self.h2t_columns)
    }

    pub fn s(&self) -> VecView<'_, DefaultTag> {
        self.hst.as_view().subvector(self.ht_rows, 0, self.ht_columns)
    }

    pub fn s_padded(&self) -> VecView<'_, DefaultTag> {
        self.hst.as_view().subvector(self.ht_rows, 0, self.ht_columns_padded)
    }

    pub fn s2(&self) -> VecView<'_, DefaultTag> {
        self.hst.as_view().subvector(self.ht_rows, 0, self.h2t_columns)
    }

    /// Word slice of HST row `r` (full padded stride).
    #[inline]
    pub fn row_words(&self, r: usize) -> &[u64] {
        self.hst.row_words(r)
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.hst.stride()
    }

    fn swap_echelon_row(&mut self, echelon_idx: usize, row2: usize) {
        debug_assert!(echelon_idx < self.echelon_rows && row2 < self.perm.len());
        self.perm.swap(echelon_idx, row2);
        if echelon_idx != row2 {
            self.hst.swap_rows(echelon_idx, row2);
        }

        // bring HST back into echelon form: the promoted row v must become
        // the unit vector at pivotcol; apply x -> x ^ (v ^ e_pivotcol) to
        // every row with a 1 at pivotcol (an involution fixing the other
        // echelon rows)
        let pivotcol = self.ht_columns - echelon_idx - 1;
        self.hst.clear_bit(echelon_idx, pivotcol);
        let stride = self.hst.stride();
        for r2 in self.echelon_start..self.hst.rows() {
            if r2 != echelon_idx && self.hst.get_bit(r2, pivotcol) {
                let (pivot, row) = self.hst.row_pair_mut(echelon_idx, r2);
                ops::xor_words(row, pivot, stride);
            }
        }
        let pivot = self.hst.row_words_mut(echelon_idx);
        pivot.fill(0);
        ops::set_bit(pivot, pivotcol);
    }

    /// Swap echelon slot `echelon_idx` with ISD row `isd_idx` and restore
    /// the echelon form.
    pub fn swap_echelon(&mut self, echelon_idx: usize, isd_idx: usize) {
        assert!(
            echelon_idx < self.echelon_rows && self.echelon_rows + isd_idx < self.perm.len(),
            "swap_echelon: bad input index"
        );
        self.swap_echelon_row(echelon_idx, self.echelon_rows + isd_idx);
    }

    /// Update one echelon row with a uniformly random ISD row that has the
    /// required pivot bit: random start, forward scan, wrap once.
    pub fn update1(&mut self, echelon_idx: usize) -> Result<(), DecodingError> {
        assert!(echelon_idx < self.echelon_rows, "update1: bad input index");
        let pivotcol = self.ht_columns - echelon_idx - 1;
        let mut isd_idx = self.rng.below(self.isd_rows);
        while isd_idx < self.isd_rows
            && !self.hst.get_bit(self.echelon_rows + isd_idx, pivotcol)
        {
            isd_idx += 1;
        }
        if isd_idx >= self.isd_rows {
            isd_idx = 0;
            while isd_idx < self.isd_rows
                && !self.hst.get_bit(self.echelon_rows + isd_idx, pivotcol)
            {
                isd_idx += 1;
            }
        }
        if isd_idx >= self.isd_rows {
            return Err(DecodingError::degenerate("update1: cannot find pivot"));
        }
        self.swap_echelon(echelon_idx, isd_idx);
        Ok(())
    }

    /// Round-robin variant of `update1`: advance the ISD cursor until a row
    /// with the pivot bit appears.
    pub fn update1_isd_seq(&mut self, echelon_idx: usize) -> Result<(), DecodingError> {
        assert!(echelon_idx < self.echelon_rows, "update1_isd_seq: bad input index");
        let pivotcol = self.ht_columns - echelon_idx - 1;
        for _ in 0..=self.isd_rows {
            self.cur_isd_row = (self.cur_isd_row + 1) % self.isd_rows;
            if self.hst.get_bit(self.echelon_rows + self.cur_isd_row, pivotcol) {
                self.swap_echelon(echelon_idx, self.cur_isd_row);
                return Ok(());
            }
        }
        Err(DecodingError::degenerate("update1_isd_seq: cannot find pivot"))
    }

    /// Pick the ISD row from a lazily-shuffled permutation: consume up to
    /// `max_update_rows` entries per batch, partial Fisher-Yates just in
    /// time, reshuffle on a miss.
    pub fn update1_isd_perm(&mut self, echelon_idx: usize) -> Result<(), DecodingError> {
        assert!(echelon_idx < self.echelon_rows, "update1_isd_perm: bad input index");
        let pivotcol = self.ht_columns - echelon_idx - 1;
        let mut forced_refresh = false;
        loop {
            // refresh the permutation lazily once the batch is consumed
            if self.cur_isd_row >= self.max_update_rows {
                self.cur_isd_row = 0;
                self.rnd_isd_row = 0;
            }
            let mut idx = self.cur_isd_row;
            let mut found = usize::MAX;
            while idx < self.isd_perm.len() {
                // create the random permutation just in time
                if idx == self.rnd_isd_row {
                    let j = idx + self.rng.below(self.isd_rows - idx);
                    self.isd_perm.swap(idx, j);
                    self.rnd_isd_row += 1;
                }
                if self
                    .hst
                    .get_bit(self.echelon_rows + self.isd_perm[idx] as usize, pivotcol)
                {
                    found = idx;
                    break;
                }
                idx += 1;
            }
            if found != usize::MAX {
                self.isd_perm.swap(self.cur_isd_row, found);
                let isd_idx = self.isd_perm[self.cur_isd_row] as usize;
                self.cur_isd_row += 1;
                self.swap_echelon(echelon_idx, isd_idx);
                return Ok(());
            }
            // a full rescan from the start saw every row, so a second miss
            // means no ISD row carries the pivot bit
            if forced_refresh && self.cur_isd_row == 0 {
                return Err(DecodingError::degenerate("update1_isd_perm: cannot find pivot"));
            }
            forced_refresh = true;
            self.cur_isd_row = self.isd_rows;
        }
    }

    // Type 1: u times: pick a random echelon row & random ISD row to swap
    fn update_type1(&mut self, rows: usize) -> Result<(), DecodingError> {
        for _ in 0..rows {
            let e = self.rng.below(self.echelon_rows);
            self.update1(e)?;
        }
        Ok(())
    }

    // Type 2: u random distinct echelon rows & u random (non-distinct) ISD rows
    fn update_type2(&mut self, rows: usize) -> Result<(), DecodingError> {
        for i in 0..rows {
            let j = self.rng.below(self.echelon_rows);
            self.echelon_perm.swap(i, j);
        }
        for i in 0..rows {
            self.update1(self.echelon_perm[i] as usize)?;
        }
        Ok(())
    }

    // Type 3: u random distinct echelon rows & distinct ISD rows
    fn update_type3(&mut self, rows: usize) -> Result<(), DecodingError> {
        self.cur_isd_row = self.isd_rows; // trigger refresh of isd_perm
        for i in 0..rows {
            let j = self.rng.below(self.echelon_rows);
            self.echelon_perm.swap(i, j);
        }
        for i in 0..rows {
            self.update1_isd_perm(self.echelon_perm[i] as usize)?;
        }
        Ok(())
    }

    // Type 4: like 3, distinct per batch of max_update_rows choices carried
    // across rounds
    fn update_type4(&mut self, rows: usize) -> Result<(), DecodingError> {
        for _ in 0..rows {
            if self.cur_echelon_row >= self.max_update_rows {
                for i in 0..self.max_update_rows {
                    let j = self.rng.below(self.echelon_rows);
                    self.echelon_perm.swap(i, j);
                }
                self.cur_echelon_row = 0;
            }
            self.update1_isd_perm(self.echelon_perm[self.cur_echelon_row] as usize)?;
            self.cur_echelon_row += 1;
        }
        Ok(())
    }

    // Type 10: round-robin echelon rows & round-robin ISD scan
    fn update_type10(&mut self, rows: usize) -> Result<(), DecodingError> {
        for _ in 0..rows {
            self.update1_isd_seq(self.cur_echelon_row)?;
            self.cur_echelon_row = (self.cur_echelon_row + 1) % self.echelon_rows;
        }
        Ok(())
    }

    // Type 12: round-robin echelon rows & random ISD rows
    fn update_type12(&mut self, rows: usize) -> Result<(), DecodingError> {
        for _ in 0..rows {
            self.update1(self.cur_echelon_row)?;
            self.cur_echelon_row = (self.cur_echelon_row + 1) % self.echelon_rows;
        }
        Ok(())
    }

    // Type 13: round-robin echelon rows & distinct ISD rows
    fn update_type13(&mut self, rows: usize) -> Result<(), DecodingError> {
        self.cur_isd_row = self.isd_rows; // trigger refresh of isd_perm
        for _ in 0..rows {
            self.update1_isd_perm(self.cur_echelon_row)?;
            self.cur_echelon_row = (self.cur_echelon_row + 1) % self.echelon_rows;
        }
        Ok(())
    }

    // Type 14 (default): round-robin echelon rows & batched distinct ISD rows
    fn update_type14(&mut self, rows: usize) -> Result<(), DecodingError> {
        for _ in 0..rows {
            self.update1_isd_perm(self.cur_echelon_row)?;
            self.cur_echelon_row = (self.cur_echelon_row + 1) % self.echelon_rows;
        }
        Ok(())
    }

    /// Consume `min(u, max_update_rows)` echelon rows under the selected
    /// strategy; `u <= 0` means the automatic batch size.
    pub fn update(&mut self, u: i32, update_type: u32) -> Result<(), DecodingError> {
        let rows = if u > 0 { (u as usize).min(self.max_update_rows) } else { self.max_update_rows };
        match update_type {
            1 => self.update_type1(rows),
            2 => self.update_type2(rows),
            3 => self.update_type3(rows),
            4 => self.update_type4(rows),
            10 => self.update_type10(rows),
            12 => self.update_type12(rows),
            13 => self.update_type13(rows),
            14 => self.update_type14(rows),
            t => Err(DecodingError::config(
                "isd_generic",
                format!("unknown update type {}", t),
            )),
        }
    }

    /// Check the structural invariant: rows 0..echelon_rows form the
    /// anti-diagonal identity over columns [l, n-k).
    #[cfg(test)]
    pub fn echelon_form_ok(&self) -> bool {
        for i in 0..self.echelon_rows {
            let pivotcol = self.ht_columns - 1 - i;
            for c in 0..self.ht_columns {
                if self.hst.get_bit(i, c) != (c == pivotcol) {
                    return false;
                }
            }
        }
        true
    }
}

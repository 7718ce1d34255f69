//! Generic ISD outer loop
//!
//! Works on the transposed form maintained by `HstIsdForm`: reverse column
//! reduction on H^T instead of row reduction on H, so additional H1^T
//! columns can ride along with H2^T into the sub-ISD at no cost. Each
//! iteration swaps a bounded set of columns, restores the echelon form,
//! and lets the sub-ISD enumerate; candidate index sets come back through
//! a callback that completes the weight check and, on success,
//! reconstructs the error vector in original coordinates.

use crate::core::block::{BlockTag, DefaultTag, row_words};
use crate::core::{HstIsdForm, MatView, Matrix, SolverRng, VecView, Vector};
use crate::error::DecodingError;
use crate::tools::config::{self, ConfigMap};
use crate::tools::stats::DecodingStats;

use super::decoding::{SubIsd, check_sd_solution};

/// Driver options; see the module table in the crate docs.
#[derive(Debug, Clone)]
pub struct IsdGenericConfig {
    /// Sub-ISD key width in bits (rows of H2).
    pub l: usize,
    /// Column swaps per iteration; negative selects the automatic batch.
    pub u: i32,
    /// Update strategy: one of 1, 2, 3, 4, 10, 12, 13, 14.
    pub update_type: u32,
    /// Verify every candidate against the original instance.
    pub verify_solution: bool,
}

impl Default for IsdGenericConfig {
    fn default() -> Self {
        IsdGenericConfig { l: 0, u: -1, update_type: 14, verify_solution: true }
    }
}

impl IsdGenericConfig {
    pub fn load(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError> {
        if let Some(l) = config::parse_option(cfg, "isd_generic", "l")? {
            self.l = l;
        }
        if let Some(u) = config::parse_option(cfg, "isd_generic", "u")? {
            self.u = u;
        }
        if let Some(t) = config::parse_option(cfg, "isd_generic", "updatetype")? {
            self.update_type = t;
        }
        if let Some(v) = config::parse_bool_option(cfg, "isd_generic", "verifysolution")? {
            self.verify_solution = v;
        }
        Ok(())
    }

    pub fn save(&self, cfg: &mut ConfigMap) {
        config::save_option(cfg, "l", self.l);
        config::save_option(cfg, "u", self.u);
        config::save_option(cfg, "updatetype", self.update_type);
        config::save_option(cfg, "verifysolution", self.verify_solution);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SolverState {
    Fresh,
    Initialized,
    Looping,
    Solved,
}

impl SolverState {
    fn name(self) -> &'static str {
        match self {
            SolverState::Fresh => "FRESH",
            SolverState::Initialized => "INITIALIZED",
            SolverState::Looping => "LOOPING",
            SolverState::Solved => "SOLVED",
        }
    }
}

pub struct IsdGeneric<S: SubIsd> {
    sub: S,
    config: IsdGenericConfig,

    horg: Matrix,
    sorg: Vector,
    hst: Option<HstIsdForm>,

    // working combination buffer C = S ^ sum of selected H12^T rows
    c: Vector,
    sol_indices: Vec<u32>,
    solution: Option<Vector>,
    benchmark_found: bool,

    n: usize,
    k: usize,
    w: usize,
    l: usize,
    u: i32,
    update_type: u32,
    benchmark: bool,
    seed: Option<u64>,

    state: SolverState,
    stats: DecodingStats,
}

impl<S: SubIsd> IsdGeneric<S> {
    pub fn new(sub: S) -> Self {
        IsdGeneric {
            sub,
            config: IsdGenericConfig::default(),
            horg: Matrix::default(),
            sorg: Vector::default(),
            hst: None,
            c: Vector::default(),
            sol_indices: Vec::new(),
            solution: None,
            benchmark_found: false,
            n: 0,
            k: 0,
            w: 0,
            l: 0,
            u: -1,
            update_type: 14,
            benchmark: false,
            seed: None,
            state: SolverState::Fresh,
            stats: DecodingStats::new("isd_generic"),
        }
    }

    /// Load driver options and forward the map to the sub-ISD.
    pub fn load_config(&mut self, cfg: &ConfigMap) -> Result<(), DecodingError> {
        self.config.load(cfg)?;
        self.sub.load_config(cfg)
    }

    pub fn save_config(&self, cfg: &mut ConfigMap) {
        self.config.save(cfg);
        self.sub.save_config(cfg);
    }

    /// Seed the column-permutation randomness for reproducible runs.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Benchmark mode: a passing candidate declares success without
    /// reconstruction, to time raw sub-ISD throughput.
    pub fn set_benchmark(&mut self, benchmark: bool) {
        self.benchmark = benchmark;
    }

    pub fn config(&self) -> &IsdGenericConfig {
        &self.config
    }

    pub fn stats(&self) -> &DecodingStats {
        &self.stats
    }

    pub fn sub_stats(&self) -> &DecodingStats {
        self.sub.stats()
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

    /// Deterministic initialization for a parity-check matrix and target
    /// syndrome; copies the inputs and builds the ISD form.
    pub fn initialize(
        &mut self,
        h: &MatView<'_>,
        s: &VecView<'_>,
        w: usize,
    ) -> Result<(), DecodingError> {
        self.stats.cnt_initialize += 1;
        if h.rows() == 0 || h.columns() == 0 {
            return Err(DecodingError::input("H must be nonempty"));
        }
        if h.rows() >= h.columns() {
            return Err(DecodingError::input(format!(
                "H must be wider than tall (rows {} >= columns {})",
                h.rows(),
                h.columns()
            )));
        }
        if s.columns() != h.rows() {
            return Err(DecodingError::input(format!(
                "syndrome length {} does not match H row count {}",
                s.columns(),
                h.rows()
            )));
        }
        self.l = self.config.l;
        self.u = self.config.u;
        self.update_type = self.config.update_type;

        self.n = h.columns();
        self.k = self.n - h.rows();
        self.w = w;
        self.horg = Matrix::from_view(h);
        self.sorg = Vector::from_view(s);

        let rng = match self.seed {
            Some(seed) => SolverRng::from_seed(seed),
            None => SolverRng::new(),
        };
        let hst = HstIsdForm::new(h, s, self.l, rng)?;
        self.c = Vector::new(hst.ht_columns());
        self.hst = Some(hst);

        self.sol_indices.clear();
        self.solution = None;
        self.benchmark_found = false;
        self.state = SolverState::Initialized;
        Ok(())
    }

    /// Hand the sub-ISD its shape parameters; must precede `loop_next`.
    pub fn prepare_loop(&mut self) -> Result<(), DecodingError> {
        if self.state != SolverState::Initialized {
            return Err(DecodingError::State {
                expected: SolverState::Initialized.name(),
                actual: self.state.name(),
            });
        }
        self.stats.cnt_prepare_loop += 1;
        let hst = self.hst.as_ref().expect("initialized");
        self.sub.initialize(hst.isd_rows(), self.l, self.w)?;
        self.state = SolverState::Looping;
        Ok(())
    }

    /// One iteration: update the column permutation, restore the echelon
    /// form, run the sub-ISD. True iff a solution was recorded.
    pub fn loop_next(&mut self) -> Result<bool, DecodingError> {
        if self.state != SolverState::Looping {
            return Err(DecodingError::State {
                expected: SolverState::Looping.name(),
                actual: self.state.name(),
            });
        }
        self.stats.cnt_loop_next += 1;

        let hst = self.hst.as_mut().expect("initialized");
        hst.update(self.u, self.update_type)?;

        // split borrows: the sub-ISD runs against read-only HST views while
        // the callback owns the scratch buffers
        let IsdGeneric {
            sub,
            hst,
            c,
            sol_indices,
            solution,
            benchmark_found,
            horg,
            sorg,
            config,
            w,
            n,
            benchmark,
            stats,
            ..
        } = self;
        let hst = hst.as_ref().expect("initialized");
        let h12t = hst.h12t_padded();
        let s2 = hst.s2();

        let w = *w;
        let n = *n;
        let benchmark = *benchmark;
        let nk = hst.ht_columns();
        let l = hst.h2t_columns();
        let echelon_rows = hst.echelon_rows();
        let words = row_words::<DefaultTag>(nk);
        let s_words = hst.row_words(n);
        let block = DefaultTag::WORDS;

        let mut cb_error: Option<DecodingError> = None;
        sub.solve(&h12t, &s2, |idx: &[u32], w1partial: u32| {
            stats.cnt_callback += 1;
            let p = idx.len();
            if p + w1partial as usize > w {
                return true;
            }

            // C := S ^ H12T[idx[0]] ^ ... block by block, abort once the
            // running weight exceeds w
            let mut wsol = p;
            let c_words = c.words_mut();
            let mut i = 0;
            while i < words {
                let hi = (i + block).min(words);
                match p {
                    0 => {
                        for j in i..hi {
                            c_words[j] = s_words[j];
                        }
                    }
                    1 => {
                        let row = hst.row_words(echelon_rows + idx[0] as usize);
                        for j in i..hi {
                            c_words[j] = s_words[j] ^ row[j];
                        }
                    }
                    _ => {
                        let row0 = hst.row_words(echelon_rows + idx[0] as usize);
                        for j in i..hi {
                            c_words[j] = s_words[j] ^ row0[j];
                        }
                        for &ix in &idx[1..] {
                            let row = hst.row_words(echelon_rows + ix as usize);
                            for j in i..hi {
                                c_words[j] ^= row[j];
                            }
                        }
                    }
                }
                for j in i..hi {
                    wsol += c_words[j].count_ones() as usize;
                }
                if wsol > w {
                    return true;
                }
                i = hi;
            }

            // a correct solution at this point
            if benchmark {
                *benchmark_found = true;
                return false;
            }

            // construct the full solution over echelon and ISD parts
            sol_indices.clear();
            for &ix in idx {
                sol_indices.push(hst.permute(echelon_rows + ix as usize) as u32);
            }
            for col in 0..nk {
                if !crate::core::ops::get_bit(c_words, col) {
                    continue;
                }
                if col < l {
                    cb_error = Some(DecodingError::invariant(
                        "isd_generic",
                        "H2T combination is non-zero below l",
                    ));
                    return false;
                }
                sol_indices.push(hst.permute(nk - 1 - col) as u32);
            }
            let mut e = Vector::new(n);
            for &bit in sol_indices.iter() {
                e.set_bit(bit as usize);
            }
            if config.verify_solution
                && !check_sd_solution(&horg.view(), &sorg.view(), w, &e.view())
            {
                cb_error = Some(DecodingError::invariant(
                    "isd_generic",
                    "reconstructed solution fails verification",
                ));
                return false;
            }
            *solution = Some(e);
            false
        })?;

        if let Some(e) = cb_error {
            return Err(e);
        }
        if self.solution.is_some() || self.benchmark_found {
            self.state = SolverState::Solved;
            return Ok(true);
        }
        Ok(false)
    }

    /// Run the loop until a solution is found. Beware: an unsolvable
    /// instance never terminates; drive `loop_next` directly to bound the
    /// search.
    pub fn solve(&mut self) -> Result<(), DecodingError> {
        self.stats.cnt_solve += 1;
        self.prepare_loop()?;
        while !self.loop_next()? {}
        Ok(())
    }

    /// The found error vector in original coordinates; valid only in the
    /// SOLVED state.
    pub fn get_solution(&self) -> Result<&Vector, DecodingError> {
        if self.state != SolverState::Solved {
            return Err(DecodingError::State {
                expected: SolverState::Solved.name(),
                actual: self.state.name(),
            });
        }
        self.solution.as_ref().ok_or_else(|| {
            DecodingError::invariant("isd_generic", "benchmark run holds no solution vector")
        })
    }

    /// Verify the stored solution against the original instance.
    pub fn check_solution(&mut self) -> Result<bool, DecodingError> {
        self.stats.cnt_check_solution += 1;
        let e = self.get_solution()?;
        Ok(check_sd_solution(&self.horg.view(), &self.sorg.view(), self.w, &e.view()))
    }

    /// Number of loop iterations performed so far.
    pub fn iterations(&self) -> u64 {
        self.stats.cnt_loop_next
    }
}

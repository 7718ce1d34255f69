//! Information-set decoding for the syndrome decoding problem over GF(2)
//!
//! Given a parity-check matrix H of size (n-k) x n, a syndrome vector S of
//! length n-k and a weight bound w, the solvers here search for an error
//! vector e with Hamming weight <= w such that H e^T = S. The crate pairs
//! a generic ISD outer loop ([`IsdGeneric`]) with pluggable sub-ISD
//! enumerators: [`SubIsdPrange`], [`SubIsdLeeBrickell`],
//! [`SubIsdSternDumer`] and [`SubIsdMmt`] (plus the experimental
//! [`SubIsdSieving`]), all built on a bit-packed GF(2) linear-algebra
//! kernel in [`core`].
//!
//! ```no_run
//! use isd_solver::{solve_sd_prange, tools::SdpGenerator};
//!
//! let mut generator = SdpGenerator::with_seed(1);
//! generator.generate_planted(100, Some(50), Some(10)).unwrap();
//! let e = solve_sd_prange(&generator.h().view(), &generator.s().view(), 10).unwrap();
//! assert!(e.hammingweight() <= 10);
//! ```

pub mod algorithm;
pub mod core;
pub mod error;
pub mod tools;

pub use algorithm::{
    IsdGeneric, IsdGenericConfig, SubIsd, SubIsdLeeBrickell, SubIsdMmt, SubIsdPrange,
    SubIsdSieving, SubIsdSternDumer, SyndromeDecodingProblem, check_sd_solution,
    compute_syndrome,
};
pub use crate::core::{MatView, Matrix, VecView, Vector};
pub use error::DecodingError;
pub use tools::{ConfigMap, SdpGenerator};

macro_rules! define_solver_fn {
    ($name:ident, $cfg_name:ident, $sub:ty, $doc:literal) => {
        #[doc = $doc]
        pub fn $name(
            h: &MatView<'_>,
            s: &VecView<'_>,
            w: usize,
        ) -> Result<Vector, DecodingError> {
            $cfg_name(h, s, w, &ConfigMap::new())
        }

        /// Same, with module options from a string->string configuration map.
        pub fn $cfg_name(
            h: &MatView<'_>,
            s: &VecView<'_>,
            w: usize,
            cfg: &ConfigMap,
        ) -> Result<Vector, DecodingError> {
            let mut solver = IsdGeneric::new(<$sub>::default());
            solver.load_config(cfg)?;
            solver.initialize(h, s, w)?;
            solver.solve()?;
            Ok(solver.get_solution()?.clone())
        }
    };
}

define_solver_fn!(
    solve_sd_prange,
    solve_sd_prange_with_config,
    SubIsdPrange,
    "Solve an SD instance with Prange's algorithm (requires l = 0)."
);
define_solver_fn!(
    solve_sd_lee_brickell,
    solve_sd_lee_brickell_with_config,
    SubIsdLeeBrickell,
    "Solve an SD instance with Lee-Brickell enumeration."
);
define_solver_fn!(
    solve_sd_stern_dumer,
    solve_sd_stern_dumer_with_config,
    SubIsdSternDumer,
    "Solve an SD instance with Stern/Dumer meet-in-the-middle (set l via the config map)."
);
define_solver_fn!(
    solve_sd_mmt,
    solve_sd_mmt_with_config,
    SubIsdMmt,
    "Solve an SD instance with MMT (set l and l1 via the config map)."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_sd_prange_planted() {
        let mut generator = SdpGenerator::with_seed(123);
        generator.generate_planted(40, Some(20), Some(4)).unwrap();
        let e = solve_sd_prange(&generator.h().view(), &generator.s().view(), 4).unwrap();
        assert!(check_sd_solution(&generator.h().view(), &generator.s().view(), 4, &e.view()));
    }

    #[test]
    fn test_solve_with_config_rejects_bad_option() {
        let mut cfg = ConfigMap::new();
        cfg.insert("l".into(), "not-a-number".into());
        let generator = {
            let mut g = SdpGenerator::with_seed(5);
            g.generate_planted(30, Some(15), Some(3)).unwrap();
            g
        };
        assert!(
            solve_sd_prange_with_config(&generator.h().view(), &generator.s().view(), 3, &cfg)
                .is_err()
        );
    }
}

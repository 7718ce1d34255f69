//! Decoding algorithms: the generic ISD driver and its sub-ISD enumerators.

pub mod decoding;
pub mod isd_generic;
pub mod lee_brickell;
pub mod mmt;
pub mod prange;
pub mod sieving;
pub mod stern_dumer;

pub use decoding::{SubIsd, SyndromeDecodingProblem, check_sd_solution, compute_syndrome};
pub use isd_generic::{IsdGeneric, IsdGenericConfig};
pub use lee_brickell::{LeeBrickellConfig, SubIsdLeeBrickell};
pub use mmt::{MmtConfig, SubIsdMmt};
pub use prange::SubIsdPrange;
pub use sieving::{SievingConfig, SubIsdSieving};
pub use stern_dumer::{SternDumerConfig, SubIsdSternDumer};

//! Support tooling: enumeration, collision filters, hash tables,
//! configuration, parsing and instance generation.

pub mod bitfield;
pub mod config;
pub mod enumerate;
pub mod generator;
pub mod hash_primes;
pub mod multimap;
pub mod parser;
pub mod stats;
pub mod utils;

pub use bitfield::StagedBitfield;
pub use config::ConfigMap;
pub use generator::SdpGenerator;
pub use multimap::{BatchMultimap, CachelineMultimap};
pub use parser::{ParsedInstance, parse_file, parse_str};
pub use stats::DecodingStats;

//! Operation counters for the decoding modules

use std::fmt;

/// Per-module call counters, retrievable through `get_stats()`.
#[derive(Debug, Clone, Default)]
pub struct DecodingStats {
    pub name: &'static str,
    pub cnt_initialize: u64,
    pub cnt_prepare_loop: u64,
    pub cnt_loop_next: u64,
    pub cnt_solve: u64,
    pub cnt_callback: u64,
    pub cnt_check_solution: u64,
}

impl DecodingStats {
    pub fn new(name: &'static str) -> Self {
        DecodingStats { name, ..Default::default() }
    }

    pub fn reset(&mut self) {
        *self = DecodingStats::new(self.name);
    }
}

impl fmt::Display for DecodingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: initialize={} prepare_loop={} loop_next={} solve={} callback={} check_solution={}",
            self.name,
            self.cnt_initialize,
            self.cnt_prepare_loop,
            self.cnt_loop_next,
            self.cnt_solve,
            self.cnt_callback,
            self.cnt_check_solution
        )
    }
}

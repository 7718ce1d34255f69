//! Bit-packed GF(2) linear-algebra substrate
//!
//! Dense bit matrices and vectors with block-aligned storage, copy-free
//! sub-views, in-place bitwise operations, block transposition and column
//! swaps. The inner loops here run billions of times per solve.

pub mod block;
pub mod echelon;
pub mod isdform;
pub mod matrix;
pub mod ops;
pub mod random;
pub mod transpose;

pub use block::{BlockTag, DefaultTag};
pub use echelon::{echelonize, echelonize_col_rev, echelonize_range};
pub use isdform::HstIsdForm;
pub use matrix::{MatView, MatViewMut, Matrix, VecView, VecViewMut, Vector};
pub use random::SolverRng;
pub use transpose::transpose;

//! Block tags: compile-time (width, masked-last-block) pairs
//!
//! A block tag declares the SIMD register width the bit kernels may assume
//! and whether the last block of a vector is guaranteed to be masked (i.e.
//! whether bits past `cols` are live scratch that operations must ignore).
//! Tag selection happens at compile time so the inner loops specialize per
//! width; there is no runtime polymorphism across block widths.

use std::fmt;

/// Compile-time description of the block layout a view promises.
///
/// `BITS` is one of 64, 128, 256, 512. `MASKED` set means consumers must
/// mask the last live word themselves; unset means the producer keeps the
/// trailing bits of every block in a consistent state, so whole blocks can
/// be processed without masking.
pub trait BlockTag: Copy + Clone + Default + fmt::Debug + 'static {
    const BITS: usize;
    const WORDS: usize;
    const MASKED: bool;
}

macro_rules! define_block_tag {
    ($name:ident, $bits:expr, $masked:expr) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl BlockTag for $name {
            const BITS: usize = $bits;
            const WORDS: usize = $bits / 64;
            const MASKED: bool = $masked;
        }
    };
}

define_block_tag!(Full64, 64, false);
define_block_tag!(Full128, 128, false);
define_block_tag!(Full256, 256, false);
define_block_tag!(Full512, 512, false);
define_block_tag!(Masked64, 64, true);
define_block_tag!(Masked128, 128, true);
define_block_tag!(Masked256, 256, true);
define_block_tag!(Masked512, 512, true);

/// Default tag: 256-bit blocks, what typical vector registers natively
/// provide while remaining widely portable.
pub type DefaultTag = Full256;

/// A tag conversion is permitted only towards a strictly weaker contract:
/// a smaller block width, or `MASKED = true` when the source was unmasked.
pub const fn tag_convertible(
    src_bits: usize,
    src_masked: bool,
    dst_bits: usize,
    dst_masked: bool,
) -> bool {
    dst_bits <= src_bits && (dst_masked || !src_masked)
}

/// Number of words a row occupies under tag `T` for `cols` bit columns.
///
/// Masked tags touch exactly the live words; unmasked tags round up to a
/// whole number of blocks.
#[inline]
pub const fn row_words<T: BlockTag>(cols: usize) -> usize {
    let live = cols.div_ceil(64);
    if T::MASKED { live } else { live.div_ceil(T::WORDS) * T::WORDS }
}

/// Round a column count up to the tag's block width in bits.
#[inline]
pub const fn pad_columns<T: BlockTag>(cols: usize) -> usize {
    cols.div_ceil(T::BITS) * T::BITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_words_rounding() {
        assert_eq!(row_words::<Full64>(1), 1);
        assert_eq!(row_words::<Full64>(64), 1);
        assert_eq!(row_words::<Full64>(65), 2);
        assert_eq!(row_words::<Full256>(65), 4);
        assert_eq!(row_words::<Full512>(1), 8);
        assert_eq!(row_words::<Masked256>(65), 2);
    }

    #[test]
    fn test_convertible_rules() {
        // shrinking width is fine
        assert!(tag_convertible(256, false, 64, false));
        // adding the mask obligation is fine
        assert!(tag_convertible(256, false, 256, true));
        // dropping the mask obligation is not
        assert!(!tag_convertible(256, true, 256, false));
        // growing width is not
        assert!(!tag_convertible(64, false, 256, false));
    }

    #[test]
    fn test_pad_columns() {
        assert_eq!(pad_columns::<Full256>(1), 256);
        assert_eq!(pad_columns::<Full256>(256), 256);
        assert_eq!(pad_columns::<Full64>(70), 128);
    }
}

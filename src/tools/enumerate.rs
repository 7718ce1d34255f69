//! Enumeration of XOR-sums over small subsets
//!
//! Walks all subsets of size 1..=4 of a value sequence, handing the callback
//! either the XOR of the selected elements (`*_val`) or the XOR together
//! with the index tuple. For p = 3 and p = 4 the loops are split so the
//! innermost loop is the longest one, which minimizes per-combination
//! overhead.
//!
//! Callbacks may return `()` to always continue, or `bool` where `false`
//! stops the enumeration.

use std::ops::BitXor;

/// Return type of enumeration callbacks: `()` continues, `bool` decides.
pub trait EnumerateControl {
    fn proceed(self) -> bool;
}

impl EnumerateControl for () {
    #[inline]
    fn proceed(self) -> bool {
        true
    }
}

impl EnumerateControl for bool {
    #[inline]
    fn proceed(self) -> bool {
        self
    }
}

pub trait EnumValue: Copy + BitXor<Output = Self> {}
impl<T: Copy + BitXor<Output = T>> EnumValue for T {}

fn enumerate1_val<T: EnumValue, R: EnumerateControl>(vals: &[T], f: &mut impl FnMut(T) -> R) -> bool {
    for &v in vals {
        if !f(v).proceed() {
            return false;
        }
    }
    true
}

/// Sizes 1 and 2 interleaved: each element is visited alone right before
/// its pairings.
fn enumerate12_val<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    f: &mut impl FnMut(T) -> R,
) -> bool {
    for i in 0..vals.len() {
        let v = vals[i];
        if !f(v).proceed() {
            return false;
        }
        for &w in &vals[i + 1..] {
            if !f(v ^ w).proceed() {
                return false;
            }
        }
    }
    true
}

fn enumerate2_val<T: EnumValue, R: EnumerateControl>(vals: &[T], f: &mut impl FnMut(T) -> R) -> bool {
    for i in 0..vals.len() {
        let v = vals[i];
        for &w in &vals[i + 1..] {
            if !f(v ^ w).proceed() {
                return false;
            }
        }
    }
    true
}

fn enumerate3_val<T: EnumValue, R: EnumerateControl>(vals: &[T], f: &mut impl FnMut(T) -> R) -> bool {
    let count = vals.len();
    if count < 3 {
        return true;
    }
    let mid = count / 2;
    // first half on the middle element: 3rd value in the inner loop
    for i2 in 1..mid {
        for i1 in 0..i2 {
            let val = vals[i2] ^ vals[i1];
            for &v3 in &vals[i2 + 1..] {
                if !f(val ^ v3).proceed() {
                    return false;
                }
            }
        }
    }
    // second half on the middle element: 1st value in the inner loop
    for i2 in mid..count - 1 {
        for i3 in i2 + 1..count {
            let val = vals[i2] ^ vals[i3];
            for &v1 in &vals[..i2] {
                if !f(val ^ v1).proceed() {
                    return false;
                }
            }
        }
    }
    true
}

fn enumerate4_val<T: EnumValue, R: EnumerateControl>(vals: &[T], f: &mut impl FnMut(T) -> R) -> bool {
    let count = vals.len();
    if count < 4 {
        return true;
    }
    let mid = 32.min(count / 3).max(1);
    // first half: 2nd element below mid, 4th value in the inner loop
    for i2 in 1..mid {
        for i1 in 0..i2 {
            for i3 in i2 + 1..count - 1 {
                let val = vals[i1] ^ vals[i2] ^ vals[i3];
                for &v4 in &vals[i3 + 1..] {
                    if !f(val ^ v4).proceed() {
                        return false;
                    }
                }
            }
        }
    }
    // second half: 2nd element from mid on, 1st value in the inner loop
    for i2 in mid..count.saturating_sub(2) {
        for i3 in i2 + 1..count - 1 {
            for i4 in i3 + 1..count {
                let val = vals[i2] ^ vals[i3] ^ vals[i4];
                for &v1 in &vals[..i2] {
                    if !f(val ^ v1).proceed() {
                        return false;
                    }
                }
            }
        }
    }
    true
}

/// Invoke `f(xor)` for every subset of size 1..=p. Panics for p outside
/// 1..=4; sub-ISD configuration checks keep that unreachable.
pub fn enumerate_val<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    p: usize,
    mut f: impl FnMut(T) -> R,
) {
    match p {
        4 => {
            let _ = enumerate4_val(vals, &mut f)
                && enumerate3_val(vals, &mut f)
                && enumerate12_val(vals, &mut f);
        }
        3 => {
            let _ = enumerate3_val(vals, &mut f) && enumerate12_val(vals, &mut f);
        }
        2 => {
            let _ = enumerate12_val(vals, &mut f);
        }
        1 => {
            let _ = enumerate1_val(vals, &mut f);
        }
        _ => panic!("enumerate_val: only 1 <= p <= 4 supported"),
    }
}

fn enumerate1<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    f: &mut impl FnMut(&[u32], T) -> R,
) -> bool {
    let mut idx = [0u32; 1];
    for (i, &v) in vals.iter().enumerate() {
        idx[0] = i as u32;
        if !f(&idx, v).proceed() {
            return false;
        }
    }
    true
}

fn enumerate12<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    f: &mut impl FnMut(&[u32], T) -> R,
) -> bool {
    let mut idx = [0u32; 2];
    for i in 0..vals.len() {
        idx[0] = i as u32;
        let v = vals[i];
        if !f(&idx[..1], v).proceed() {
            return false;
        }
        for j in i + 1..vals.len() {
            idx[1] = j as u32;
            if !f(&idx, v ^ vals[j]).proceed() {
                return false;
            }
        }
    }
    true
}

fn enumerate2<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    f: &mut impl FnMut(&[u32], T) -> R,
) -> bool {
    let mut idx = [0u32; 2];
    for i in 0..vals.len() {
        idx[0] = i as u32;
        let v = vals[i];
        for j in i + 1..vals.len() {
            idx[1] = j as u32;
            if !f(&idx, v ^ vals[j]).proceed() {
                return false;
            }
        }
    }
    true
}

fn enumerate3<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    f: &mut impl FnMut(&[u32], T) -> R,
) -> bool {
    let count = vals.len();
    if count < 3 {
        return true;
    }
    let mid = count / 2;
    let mut idx = [0u32; 3];
    for i2 in 1..mid {
        idx[1] = i2 as u32;
        for i1 in 0..i2 {
            idx[0] = i1 as u32;
            let val = vals[i2] ^ vals[i1];
            for i3 in i2 + 1..count {
                idx[2] = i3 as u32;
                if !f(&idx, val ^ vals[i3]).proceed() {
                    return false;
                }
            }
        }
    }
    for i2 in mid..count - 1 {
        idx[1] = i2 as u32;
        for i3 in i2 + 1..count {
            idx[2] = i3 as u32;
            let val = vals[i2] ^ vals[i3];
            for i1 in 0..i2 {
                idx[0] = i1 as u32;
                if !f(&idx, val ^ vals[i1]).proceed() {
                    return false;
                }
            }
        }
    }
    true
}

fn enumerate4<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    f: &mut impl FnMut(&[u32], T) -> R,
) -> bool {
    let count = vals.len();
    if count < 4 {
        return true;
    }
    let mid = 32.min(count / 3).max(1);
    let mut idx = [0u32; 4];
    for i2 in 1..mid {
        idx[1] = i2 as u32;
        for i1 in 0..i2 {
            idx[0] = i1 as u32;
            for i3 in i2 + 1..count - 1 {
                idx[2] = i3 as u32;
                let val = vals[i1] ^ vals[i2] ^ vals[i3];
                for i4 in i3 + 1..count {
                    idx[3] = i4 as u32;
                    if !f(&idx, val ^ vals[i4]).proceed() {
                        return false;
                    }
                }
            }
        }
    }
    for i2 in mid..count.saturating_sub(2) {
        idx[1] = i2 as u32;
        for i3 in i2 + 1..count - 1 {
            idx[2] = i3 as u32;
            for i4 in i3 + 1..count {
                idx[3] = i4 as u32;
                let val = vals[i2] ^ vals[i3] ^ vals[i4];
                for i1 in 0..i2 {
                    idx[0] = i1 as u32;
                    if !f(&idx, val ^ vals[i1]).proceed() {
                        return false;
                    }
                }
            }
        }
    }
    true
}

/// Invoke `f(indices, xor)` for every subset of size 1..=p; indices are
/// ascending positions into `vals`. Panics for p outside 1..=4.
pub fn enumerate<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    p: usize,
    mut f: impl FnMut(&[u32], T) -> R,
) {
    match p {
        4 => {
            let _ = enumerate4(vals, &mut f)
                && enumerate3(vals, &mut f)
                && enumerate12(vals, &mut f);
        }
        3 => {
            let _ = enumerate3(vals, &mut f) && enumerate12(vals, &mut f);
        }
        2 => {
            let _ = enumerate12(vals, &mut f);
        }
        1 => {
            let _ = enumerate1(vals, &mut f);
        }
        _ => panic!("enumerate: only 1 <= p <= 4 supported"),
    }
}

/// Invoke `f(indices, xor)` for subsets of size exactly p.
pub fn enumerate_exact<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    p: usize,
    mut f: impl FnMut(&[u32], T) -> R,
) {
    match p {
        4 => {
            enumerate4(vals, &mut f);
        }
        3 => {
            enumerate3(vals, &mut f);
        }
        2 => {
            enumerate2(vals, &mut f);
        }
        1 => {
            enumerate1(vals, &mut f);
        }
        _ => panic!("enumerate_exact: only 1 <= p <= 4 supported"),
    }
}

/// Value-only enumeration of subsets of size exactly p.
pub fn enumerate_exact_val<T: EnumValue, R: EnumerateControl>(
    vals: &[T],
    p: usize,
    mut f: impl FnMut(T) -> R,
) {
    match p {
        4 => {
            enumerate4_val(vals, &mut f);
        }
        3 => {
            enumerate3_val(vals, &mut f);
        }
        2 => {
            enumerate2_val(vals, &mut f);
        }
        1 => {
            enumerate1_val(vals, &mut f);
        }
        _ => panic!("enumerate_exact_val: only 1 <= p <= 4 supported"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        let mut r = 1usize;
        for i in 0..k.min(n - k) {
            r = r * (n - i) / (i + 1);
        }
        r
    }

    #[test]
    fn test_exact_counts_and_distinctness() {
        // distinct powers of two make the XOR identify the subset
        let vals: Vec<u64> = (0..12).map(|i| 1u64 << i).collect();
        for p in 1..=4 {
            let mut seen = HashSet::new();
            enumerate_exact_val(&vals, p, |v| {
                assert_eq!(v.count_ones() as usize, p);
                assert!(seen.insert(v), "duplicate subset {:#x} at p={}", v, p);
            });
            assert_eq!(seen.len(), binomial(12, p), "p = {}", p);
        }
    }

    #[test]
    fn test_dispatch_visits_all_sizes_up_to_p() {
        let vals: Vec<u64> = (0..9).map(|i| 1u64 << i).collect();
        for p in 1..=4 {
            let mut seen = HashSet::new();
            enumerate_val(&vals, p, |v| {
                assert!(seen.insert(v));
            });
            let expect: usize = (1..=p).map(|i| binomial(9, i)).sum();
            assert_eq!(seen.len(), expect, "p = {}", p);
        }
    }

    #[test]
    fn test_indices_match_value() {
        let vals: Vec<u64> = vec![3, 9, 17, 33, 65, 129, 257];
        for p in 1..=4 {
            enumerate(&vals, p, |idx, v| {
                let expect = idx.iter().fold(0u64, |a, &i| a ^ vals[i as usize]);
                assert_eq!(v, expect, "idx {:?}", idx);
                // indices ascend
                assert!(idx.windows(2).all(|w| w[0] < w[1]));
            });
        }
    }

    #[test]
    fn test_early_stop() {
        let vals: Vec<u64> = (0..20).map(|i| 1u64 << i).collect();
        let mut count = 0;
        enumerate_val(&vals, 2, |_| {
            count += 1;
            count < 5
        });
        assert_eq!(count, 5);
    }

    #[test]
    fn test_small_inputs() {
        let vals: Vec<u64> = vec![1, 2];
        let mut n = 0;
        enumerate_exact_val(&vals, 3, |_| {
            n += 1;
        });
        assert_eq!(n, 0);
        enumerate_exact_val(&vals, 4, |_| {
            n += 1;
        });
        assert_eq!(n, 0);
    }

    #[test]
    fn test_xor_order_independent() {
        // enumerate_val yields the same multiset of XORs as a naive recompute
        let vals: Vec<u64> = vec![0xabc, 0xdef, 0x123, 0x456, 0x789, 0xfed, 0xcba, 0x321];
        let mut got: Vec<u64> = Vec::new();
        enumerate_exact_val(&vals, 3, |v| got.push(v));
        let mut expect = Vec::new();
        for i in 0..vals.len() {
            for j in i + 1..vals.len() {
                for k in j + 1..vals.len() {
                    expect.push(vals[i] ^ vals[j] ^ vals[k]);
                }
            }
        }
        got.sort_unstable();
        expect.sort_unstable();
        assert_eq!(got, expect);
    }
}

//! Parser for decodingchallenge.org problem files
//!
//! UTF-8 text with `#`-introduced section markers: `n`, `k`, `w`, `seed`,
//! `g`, `g^t`, `h`, `h^t`, `s`, `s^t`. Integer sections hold one decimal
//! integer; matrix sections hold one row per line as 0/1 characters with
//! whitespace and brackets ignored and `#` starting an inline comment.
//! A marker may carry the suffix "identity part is omitted", in which case
//! the identity block is prepended. A quasi-cyclic instance supplies a
//! single vector `h` of length n/2 that is rotated into the circulant
//! block. An unlabelled matrix is assumed to be (H^T | S^T) with the
//! syndrome as its last row.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::core::{Matrix, Vector, echelonize, transpose};
use crate::error::DecodingError;

/// A fully parsed syndrome-decoding instance.
#[derive(Debug, Clone)]
pub struct ParsedInstance {
    pub n: usize,
    pub k: usize,
    pub w: Option<usize>,
    pub seed: Option<u64>,
    pub h: Matrix,
    pub s: Option<Vector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    None,
    N,
    K,
    W,
    Seed,
    G,
    Gt,
    H,
    Ht,
    S,
    St,
}

/// One parsed 0/1 row: packed words plus bit count.
type BitRow = (Vec<u64>, usize);

#[derive(Default)]
struct RawSections {
    n: Option<i64>,
    k: Option<i64>,
    w: Option<i64>,
    seed: Option<i64>,
    g: Vec<BitRow>,
    gt: Vec<BitRow>,
    h: Vec<BitRow>,
    ht: Vec<BitRow>,
    s: Vec<BitRow>,
    st: Vec<BitRow>,
    unknown: Vec<BitRow>,
    omitted_identity_g: bool,
    omitted_identity_gt: bool,
    omitted_identity_h: bool,
    omitted_identity_ht: bool,
    quasi_cyclic_h: bool,
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedInstance, DecodingError> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| {
        DecodingError::parse(format!("could not open file {}: {}", path.as_ref().display(), e))
    })?;
    parse_str(&text)
}

pub fn parse_str(text: &str) -> Result<ParsedInstance, DecodingError> {
    let marker_re = Regex::new(r"^#\s*(.*)$").expect("static regex");
    let quasi_cyclic_re = Regex::new(
        r"^a vector h of length \(0\.5 n\) which describes the parity-check matrix",
    )
    .expect("static regex");

    let mut raw = RawSections::default();
    let mut marker = Marker::None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = marker_re.captures(line) {
            let header = caps[1].trim().to_lowercase();
            let omitted = header.contains("identity part is omitted");
            marker = if header == "n" {
                Marker::N
            } else if header == "k" {
                Marker::K
            } else if header == "w" {
                Marker::W
            } else if header == "seed" {
                Marker::Seed
            } else if header.starts_with("g^t") {
                raw.omitted_identity_gt |= omitted;
                Marker::Gt
            } else if header == "g" || header.starts_with("g ") {
                raw.omitted_identity_g |= omitted;
                Marker::G
            } else if quasi_cyclic_re.is_match(&header) {
                raw.quasi_cyclic_h = true;
                Marker::H
            } else if header.starts_with("h^t") {
                raw.omitted_identity_ht |= omitted;
                Marker::Ht
            } else if header == "h" || header.starts_with("h ") {
                raw.omitted_identity_h |= omitted;
                Marker::H
            } else if header.starts_with("s^t") {
                Marker::St
            } else if header == "s" || header.starts_with("s ") {
                Marker::S
            } else {
                Marker::None
            };
            continue;
        }
        match marker {
            Marker::N => parse_integer(line, &mut raw.n)?,
            Marker::K => parse_integer(line, &mut raw.k)?,
            Marker::W => parse_integer(line, &mut raw.w)?,
            Marker::Seed => parse_integer(line, &mut raw.seed)?,
            Marker::G => push_row(&mut raw.g, parse_bit_row(line)?),
            Marker::Gt => push_row(&mut raw.gt, parse_bit_row(line)?),
            Marker::H => push_row(&mut raw.h, parse_bit_row(line)?),
            Marker::Ht => push_row(&mut raw.ht, parse_bit_row(line)?),
            Marker::S => push_row(&mut raw.s, parse_bit_row(line)?),
            Marker::St => push_row(&mut raw.st, parse_bit_row(line)?),
            Marker::None => push_row(&mut raw.unknown, parse_bit_row(line)?),
        }
    }

    let matrix_count = [!raw.g.is_empty(), !raw.gt.is_empty(), !raw.h.is_empty(), !raw.ht.is_empty(), !raw.unknown.is_empty()]
        .iter()
        .filter(|&&b| b)
        .count();
    if matrix_count == 0 {
        return Err(DecodingError::parse("no generator or parity-check matrix found"));
    }
    if matrix_count > 1 {
        return Err(DecodingError::parse(
            "multiple generator or parity-check matrices found",
        ));
    }

    // an unlabelled matrix is (H^T | S^T): its last row is the syndrome
    if !raw.unknown.is_empty() {
        std::mem::swap(&mut raw.ht, &mut raw.unknown);
        let last = raw.ht.pop().expect("nonempty");
        raw.st.push(last);
    }

    let h = build_parity_check(&raw)?;
    if h.rows() == 0 || h.columns() == 0 {
        return Err(DecodingError::parse("parity-check matrix is empty"));
    }

    // syndrome, accepted in either orientation
    if !raw.s.is_empty() && !raw.st.is_empty() {
        return Err(DecodingError::parse("multiple syndrome formats found"));
    }
    let s_rows = if raw.st.is_empty() { &raw.s } else { &raw.st };
    let s = match s_rows.len() {
        0 => None,
        _ => {
            let mut sm = rows_to_matrix(s_rows)?;
            if sm.columns() == 1 && sm.rows() != 1 {
                let mut st = Matrix::new(1, sm.rows());
                transpose(&mut st.view_mut(), &sm.view());
                sm = st;
            }
            if sm.rows() > 1 {
                return Err(DecodingError::parse("multiple syndromes found"));
            }
            let mut v = Vector::new(sm.columns());
            for c in 0..sm.columns() {
                if sm.get_bit(0, c) {
                    v.set_bit(c);
                }
            }
            Some(v)
        }
    };

    // sanity checks against the declared parameters
    let n = match raw.n {
        Some(n) if n >= 0 => {
            if n as usize != h.columns() {
                return Err(DecodingError::parse(format!(
                    "H has {} columns but the file declares n = {}",
                    h.columns(),
                    n
                )));
            }
            n as usize
        }
        _ => h.columns(),
    };
    if h.rows() > n {
        return Err(DecodingError::parse(format!(
            "H has more rows ({}) than columns ({})",
            h.rows(),
            n
        )));
    }
    let k = match raw.k {
        Some(k) if k >= 0 => {
            if k as usize > n || n - k as usize != h.rows() {
                return Err(DecodingError::parse(format!(
                    "H has {} rows, inconsistent with n = {} and k = {}",
                    h.rows(),
                    n,
                    k
                )));
            }
            k as usize
        }
        _ => n - h.rows(),
    };
    if let Some(ref sv) = s {
        if sv.columns() != h.rows() {
            return Err(DecodingError::parse(format!(
                "syndrome length {} does not match n - k = {}",
                sv.columns(),
                h.rows()
            )));
        }
    }

    Ok(ParsedInstance {
        n,
        k,
        w: raw.w.filter(|&w| w >= 0).map(|w| w as usize),
        seed: raw.seed.filter(|&s| s >= 0).map(|s| s as u64),
        h,
        s,
    })
}

fn parse_integer(line: &str, slot: &mut Option<i64>) -> Result<(), DecodingError> {
    if slot.is_some() {
        return Err(DecodingError::parse("integer parameter occurred twice"));
    }
    let value = line
        .parse::<i64>()
        .map_err(|_| DecodingError::parse(format!("could not parse integer: {:?}", line)))?;
    *slot = Some(value);
    Ok(())
}

fn parse_bit_row(line: &str) -> Result<BitRow, DecodingError> {
    let mut words = Vec::new();
    let mut lastword = 0u64;
    let mut nextbit = 0usize;
    let mut count = 0usize;
    for ch in line.chars() {
        match ch {
            ' ' | '\t' | '(' | ')' | '[' | ']' | ',' => continue,
            '0' | '1' => {
                if ch == '1' {
                    lastword |= 1u64 << nextbit;
                }
                count += 1;
                nextbit += 1;
                if nextbit == 64 {
                    words.push(lastword);
                    lastword = 0;
                    nextbit = 0;
                }
            }
            '#' => break,
            other => {
                return Err(DecodingError::parse(format!(
                    "unexpected character {:?} in matrix row",
                    other
                )));
            }
        }
    }
    if nextbit > 0 {
        words.push(lastword);
    }
    Ok((words, count))
}

fn push_row(rows: &mut Vec<BitRow>, row: BitRow) {
    if row.1 > 0 {
        rows.push(row);
    }
}

fn rows_to_matrix(rows: &[BitRow]) -> Result<Matrix, DecodingError> {
    if rows.is_empty() {
        return Ok(Matrix::default());
    }
    let columns = rows[0].1;
    if rows.iter().any(|r| r.1 != columns) {
        return Err(DecodingError::parse("matrix rows have unequal lengths"));
    }
    let mut m = Matrix::new(rows.len(), columns);
    for (r, (words, _)) in rows.iter().enumerate() {
        m.row_words_mut(r)[..words.len()].copy_from_slice(words);
    }
    Ok(m)
}

fn transposed(m: &Matrix) -> Matrix {
    let mut t = Matrix::new(m.columns(), m.rows());
    transpose(&mut t.view_mut(), &m.view());
    t
}

fn prepend_identity(m: &Matrix) -> Matrix {
    let mut out = Matrix::new(m.rows(), m.rows() + m.columns());
    for r in 0..m.rows() {
        out.set_bit(r, r);
        for c in 0..m.columns() {
            if m.get_bit(r, c) {
                out.set_bit(r, m.rows() + c);
            }
        }
    }
    out
}

/// Compute a parity-check matrix of the code generated by `g`: bring g to
/// the form (I | P) by column swaps after reduction, emit (P^T | I), then
/// undo the swaps.
fn dual_matrix(g: &Matrix) -> Result<Matrix, DecodingError> {
    let mut msf = g.clone();
    let rank = echelonize(&mut msf);
    msf.truncate_rows(rank);
    let mut msf_t = transposed(&msf);

    let rows = msf.rows();
    let columns = msf.columns();
    let mut columnswaps: Vec<(usize, usize)> = Vec::new();
    for p in 0..rows {
        // the pivot column for row p is the first column from p on with a
        // 1 in row p
        let mut c = p;
        while c < columns && !msf_t.get_bit(c, p) {
            c += 1;
        }
        if c == columns {
            return Err(DecodingError::invariant("parser", "dual matrix: pivot column missing"));
        }
        if c != p {
            columnswaps.push((p, c));
            msf_t.swap_rows(p, c);
        }
    }
    for r in 0..rows {
        for c in 0..rows {
            if msf_t.get_bit(c, r) != (r == c) {
                return Err(DecodingError::invariant(
                    "parser",
                    "dual matrix: reduction did not yield the identity",
                ));
            }
        }
    }

    // msf ~ (I | P) after the swaps, so the dual is (P^T | I)
    let mut dual = Matrix::new(columns - rows, columns);
    for r in 0..columns - rows {
        for c in 0..rows {
            if msf_t.get_bit(rows + r, c) {
                dual.set_bit(r, c);
            }
        }
        dual.set_bit(r, rows + r);
    }
    while let Some((a, b)) = columnswaps.pop() {
        dual.swap_columns(a, b);
    }
    Ok(dual)
}

fn build_parity_check(raw: &RawSections) -> Result<Matrix, DecodingError> {
    if !raw.g.is_empty() || !raw.gt.is_empty() {
        let mut g = if raw.gt.is_empty() {
            rows_to_matrix(&raw.g)?
        } else {
            transposed(&rows_to_matrix(&raw.gt)?)
        };
        if (!raw.g.is_empty() && raw.omitted_identity_g)
            || (!raw.gt.is_empty() && raw.omitted_identity_gt)
        {
            g = prepend_identity(&g);
        }
        let rank = echelonize(&mut g);
        g.truncate_rows(rank);
        return dual_matrix(&g);
    }

    let mut h = if raw.ht.is_empty() {
        rows_to_matrix(&raw.h)?
    } else {
        transposed(&rows_to_matrix(&raw.ht)?)
    };
    let mut omitted = (!raw.h.is_empty() && raw.omitted_identity_h)
        || (!raw.ht.is_empty() && raw.omitted_identity_ht);

    if !raw.h.is_empty() && raw.quasi_cyclic_h {
        // the single vector h describes the circulant block: row r is h
        // rotated left by r; the block is then transposed and the identity
        // prepended
        if h.rows() != 1 {
            return Err(DecodingError::parse("quasi-cyclic H requires a single vector"));
        }
        let len = h.columns();
        let mut block = Matrix::new(len, len);
        for r in 0..len {
            for c in 0..len {
                if h.get_bit(0, (c + r) % len) {
                    block.set_bit(r, c);
                }
            }
        }
        h = transposed(&block);
        omitted = true;
    }

    if omitted {
        h = prepend_identity(&h);
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sd_format() {
        let text = "\
# n
24
# seed
0
# w
3
# H^T (each line corresponds to a column of H, the identity part is omitted)
101010101010
010101010101
111100001111
000011110000
110011001100
001100110011
101010101010
011001100110
100110011001
111111000000
000000111111
100100100100
# s^T
110110110110
";
        let inst = parse_str(text).unwrap();
        assert_eq!(inst.n, 24);
        assert_eq!(inst.k, 12);
        assert_eq!(inst.w, Some(3));
        assert_eq!(inst.h.rows(), 12);
        assert_eq!(inst.h.columns(), 24);
        // left 12x12 block is the identity
        for r in 0..12 {
            for c in 0..12 {
                assert_eq!(inst.h.get_bit(r, c), r == c);
            }
        }
        // column 12 of H equals the first H^T line
        let col: Vec<bool> = (0..12).map(|r| inst.h.get_bit(r, 12)).collect();
        let expect: Vec<bool> = "101010101010".chars().map(|c| c == '1').collect();
        assert_eq!(col, expect);
        let s = inst.s.unwrap();
        assert_eq!(s.columns(), 12);
        assert!(s.get_bit(0) && s.get_bit(1) && !s.get_bit(2));
    }

    #[test]
    fn test_integer_twice_rejected() {
        let text = "# n\n10\n# n\n10\n# h^t\n11\n";
        assert!(parse_str(text).is_err());
    }

    #[test]
    fn test_no_matrix_rejected() {
        assert!(parse_str("# n\n10\n").is_err());
    }

    #[test]
    fn test_brackets_and_comments_ignored() {
        let text = "# h\n[1 0 1 1] # trailing comment\n(0 1 0 1)\n";
        let inst = parse_str(text).unwrap();
        assert_eq!(inst.h.rows(), 2);
        assert_eq!(inst.h.columns(), 4);
        assert!(inst.h.get_bit(0, 0));
        assert!(!inst.h.get_bit(1, 0));
        assert!(inst.s.is_none());
    }

    #[test]
    fn test_unknown_matrix_is_ht_with_syndrome() {
        // 3 columns of H (n=3, n-k=2) plus the syndrome as the last row
        let text = "10\n01\n11\n10\n";
        let inst = parse_str(text).unwrap();
        assert_eq!(inst.n, 3);
        assert_eq!(inst.h.rows(), 2);
        let s = inst.s.unwrap();
        assert!(s.get_bit(0));
        assert!(!s.get_bit(1));
    }

    #[test]
    fn test_generator_input_yields_orthogonal_h() {
        // G = (I | P) for a small code; H must satisfy G H^T = 0
        let text = "# g\n1000110\n0100101\n0010011\n0001111\n";
        let inst = parse_str(text).unwrap();
        assert_eq!(inst.n, 7);
        assert_eq!(inst.k, 4);
        assert_eq!(inst.h.rows(), 3);
        let g_rows = ["1000110", "0100101", "0010011", "0001111"];
        for gr in g_rows {
            let gbits: Vec<bool> = gr.chars().map(|c| c == '1').collect();
            for hr in 0..3 {
                let mut parity = false;
                for c in 0..7 {
                    parity ^= gbits[c] && inst.h.get_bit(hr, c);
                }
                assert!(!parity, "G row {} not orthogonal to H row {}", gr, hr);
            }
        }
    }

    #[test]
    fn test_quasi_cyclic_expansion() {
        let text = "\
# n
6
# a vector h of length (0.5 n) which describes the parity-check matrix
101
# s^T
110
";
        let inst = parse_str(text).unwrap();
        assert_eq!(inst.n, 6);
        assert_eq!(inst.k, 3);
        assert_eq!(inst.h.rows(), 3);
        // left identity
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(inst.h.get_bit(r, c), r == c);
            }
        }
        // right block is the transposed circulant of 101
        let rot = |r: usize, c: usize| ['1', '0', '1'][(r + c) % 3] == '1';
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(inst.h.get_bit(r, 3 + c), rot(c, r), "at {},{}", r, c);
            }
        }
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let text = "# n\n10\n# h\n1111\n";
        assert!(parse_str(text).is_err());
    }
}

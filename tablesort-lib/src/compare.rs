//! Cell comparison: numeric when both sides parse, locale-style otherwise.

use std::cmp::Ordering;

use crate::collate::locale_compare;
use crate::direction::Direction;

/// Trim leading and trailing whitespace, including the byte-order mark.
pub fn trim_cell(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Parse the longest numeric prefix of `s`.
///
/// Accepts optional leading whitespace, an optional sign, then either
/// `Infinity` or a decimal literal (`12`, `1.5`, `.5`, `5.`, `1e3`). Trailing
/// garbage is ignored, so `"10kΩ"` parses as `10`. Returns `None` when no
/// prefix is numeric.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if rest.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = rest.as_bytes();
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        end += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    let mut exponent = "";
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            exponent = &rest[end..exp_end + exp_digits];
        }
    }

    let int_part = if int_len == 0 { "0" } else { &rest[..int_len] };
    let frac_part = if frac_len == 0 {
        "0"
    } else {
        &rest[int_len + 1..int_len + 1 + frac_len]
    };
    let literal = format!(
        "{}{int_part}.{frac_part}{exponent}",
        if negative { "-" } else { "" }
    );
    literal.parse().ok()
}

/// Precomputed comparison key for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    /// Trimmed cell text.
    pub text: String,
    /// Numeric value of the text's leading prefix, if any.
    pub number: Option<f64>,
}

impl SortKey {
    pub fn new(raw: &str) -> Self {
        let text = trim_cell(raw).to_string();
        let number = parse_leading_float(&text);
        Self { text, number }
    }
}

/// Order two cells for the given direction.
///
/// Numbers are compared only when both cells parse; a numeric cell paired
/// with a non-numeric one is compared as text.
pub fn compare_keys(a: &SortKey, b: &SortKey, direction: Direction) -> Ordering {
    let ordering = match (a.number, b.number) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => locale_compare(&a.text, &b.text),
    };
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Stable ordering of `0..len` under `compare`.
///
/// A top-down merge sort over indices. Mixed numeric and text cells do not
/// form a strict total order, so this never assumes one: an inconsistent
/// comparator yields some permutation rather than a panic.
pub fn stable_order<F>(len: usize, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = order.clone();
    merge_sort(&mut order, &mut scratch, &mut compare);
    order
}

fn merge_sort<F>(v: &mut [usize], scratch: &mut [usize], compare: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let len = v.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort(&mut v[..mid], &mut scratch[..mid], compare);
    merge_sort(&mut v[mid..], &mut scratch[mid..], compare);

    scratch.copy_from_slice(v);
    let (left, right) = scratch.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in v.iter_mut() {
        // Ties take from the left run, which keeps the sort stable
        let take_right = j < right.len()
            && (i >= left.len() || compare(right[j], left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}

//! Locale-style string comparison.
//!
//! Approximates the root collation order used by default string comparison
//! in browsers: a multi-level comparison where character class and base
//! letter decide first (case and accents ignored), then accents, then case
//! with lowercase ahead of uppercase.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

/// Diacritic kinds in root collation's secondary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mark {
    None,
    Acute,
    Grave,
    Breve,
    Circumflex,
    Caron,
    Ring,
    Diaeresis,
    DoubleAcute,
    Tilde,
    DotAbove,
    Stroke,
    Cedilla,
    Ogonek,
    Macron,
    /// Second half of a ligature or sharp s expansion.
    Ligature,
}

/// Collation weights for one character.
#[derive(Debug, Clone, Copy)]
struct Weights {
    class: CharClass,
    base: char,
    mark: Mark,
    upper: bool,
}

const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%";

/// Accented lowercase letters by mark, with their base letters at the same
/// positions.
const FOLDS: &[(Mark, &str, &str)] = &[
    (Mark::Acute, "áéíóúýćńśźŕĺ", "aeiouycnszrl"),
    (Mark::Grave, "àèìòù", "aeiou"),
    (Mark::Breve, "ăĕğĭŏŭ", "aegiou"),
    (Mark::Circumflex, "âêîôûĉĝŝŷ", "aeioucgsy"),
    (Mark::Caron, "čďěňřšťž", "cdenrstz"),
    (Mark::Ring, "åů", "au"),
    (Mark::Diaeresis, "äëïöüÿ", "aeiouy"),
    (Mark::DoubleAcute, "őű", "ou"),
    (Mark::Tilde, "ãñõĩũ", "anoiu"),
    (Mark::DotAbove, "ċėġż", "cegz"),
    (Mark::Stroke, "øđł", "odl"),
    (Mark::Cedilla, "çşţņŗģ", "cstnrg"),
    (Mark::Ogonek, "ąęįų", "aeiu"),
    (Mark::Macron, "āēīōū", "aeiou"),
];

fn class_of(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else if PUNCTUATION.contains(c) {
        CharClass::Punctuation
    } else {
        CharClass::Symbol
    }
}

/// Append the weights of `c`. Ligatures and sharp s expand to two letters.
fn push_weights(c: char, out: &mut Vec<Weights>) {
    let class = class_of(c);
    let upper = c.is_uppercase();
    let lower = c.to_lowercase().next().unwrap_or(c);
    let letter = |base, mark| Weights {
        class,
        base,
        mark,
        upper,
    };

    match lower {
        'æ' => out.extend([letter('a', Mark::None), letter('e', Mark::Ligature)]),
        'œ' => out.extend([letter('o', Mark::None), letter('e', Mark::Ligature)]),
        'ß' => out.extend([letter('s', Mark::None), letter('s', Mark::Ligature)]),
        _ => {
            let (base, mark) = fold_accent(lower);
            out.push(letter(base, mark));
        }
    }
}

/// Split a lowercase Latin letter into its base letter and diacritic.
fn fold_accent(c: char) -> (char, Mark) {
    for (mark, accented, bases) in FOLDS {
        if let Some(pos) = accented.chars().position(|a| a == c) {
            return (bases.chars().nth(pos).unwrap_or(c), *mark);
        }
    }
    (c, Mark::None)
}

/// Compare two strings the way a default locale-aware comparison does.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let wa = weigh(a);
    let wb = weigh(b);

    let primary = compare_level(&wa, &wb, |w| (w.class, w.base));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = compare_level(&wa, &wb, |w| w.mark);
    if secondary != Ordering::Equal {
        return secondary;
    }

    let tertiary = compare_level(&wa, &wb, |w| w.upper);
    if tertiary != Ordering::Equal {
        return tertiary;
    }

    // Distinct strings with identical weights (e.g. characters outside the
    // fold table that lowercase the same way) fall back to code points.
    a.cmp(b)
}

fn weigh(s: &str) -> Vec<Weights> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        push_weights(c, &mut out);
    }
    out
}

fn compare_level<K: Ord>(a: &[Weights], b: &[Weights], key: impl Fn(&Weights) -> K) -> Ordering {
    a.iter().map(&key).cmp(b.iter().map(&key))
}

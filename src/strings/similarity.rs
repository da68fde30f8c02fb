/*!
 * Similarity ratios between two strings.
 *
 * Every comparison yields two metrics at once:
 * - a Jaccard ratio over whitespace-separated tokens
 * - an LCS ratio over characters (`2 * LCS / (|a| + |b|)`)
 *
 * Callers can restrict the comparison to the beginnings (`TextAlignment::Left`)
 * or endings (`TextAlignment::Right`) of both strings by truncating them to
 * the shorter length first. Case folding is the caller's job (see
 * `normalize::content_sim`).
 */

use serde::Serialize;
use std::collections::HashSet;

/// Which end of the strings a truncated comparison keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    /// Keep the beginnings
    Left,
    /// Keep the endings
    Right,
}

/// Dual similarity metric, both values in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Similarity {
    /// Jaccard ratio over whitespace tokens
    pub token_ratio: f64,
    /// Character LCS ratio
    pub lcs_ratio: f64,
}

impl Similarity {
    /// No similarity at all
    pub const NONE: Similarity = Similarity { token_ratio: 0.0, lcs_ratio: 0.0 };

    /// Identical strings
    pub const IDENTICAL: Similarity = Similarity { token_ratio: 1.0, lcs_ratio: 1.0 };

    /// Whether both metrics report a perfect match
    pub fn is_identical(&self) -> bool {
        *self == Self::IDENTICAL
    }
}

/// Compute the similarity between `a` and `b`.
///
/// With `truncate_to_shortest` set, both strings are first cut to
/// `min(len(a), len(b), cap)` characters taken from the side given by
/// `alignment`. Two empty strings are not similar.
pub fn similarity(
    a: &str,
    b: &str,
    truncate_to_shortest: Option<usize>,
    alignment: TextAlignment,
) -> Similarity {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (a_chars, b_chars) = match truncate_to_shortest {
        Some(cap) => {
            let len = a_chars.len().min(b_chars.len()).min(cap);
            (
                truncate(&a_chars, len, alignment),
                truncate(&b_chars, len, alignment),
            )
        }
        None => (&a_chars[..], &b_chars[..]),
    };

    if a_chars.is_empty() || b_chars.is_empty() {
        return Similarity::NONE;
    }
    if a_chars == b_chars {
        return Similarity::IDENTICAL;
    }

    let a_text: String = a_chars.iter().collect();
    let b_text: String = b_chars.iter().collect();

    Similarity {
        token_ratio: token_jaccard_ratio(&a_text, &b_text),
        lcs_ratio: lcs_ratio(a_chars, b_chars),
    }
}

fn truncate(chars: &[char], len: usize, alignment: TextAlignment) -> &[char] {
    match alignment {
        TextAlignment::Left => &chars[..len],
        TextAlignment::Right => &chars[chars.len() - len..],
    }
}

/// Jaccard ratio of the whitespace token sets of `a` and `b`.
pub fn token_jaccard_ratio(a: &str, b: &str) -> f64 {
    let a_tokens: HashSet<&str> = a.split_whitespace().collect();
    let b_tokens: HashSet<&str> = b.split_whitespace().collect();

    let union = a_tokens.union(&b_tokens).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a_tokens.intersection(&b_tokens).count();

    intersection as f64 / union as f64
}

/// `2 * LCS / (|a| + |b|)`, 0.0 when both are empty.
pub fn lcs_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    2.0 * lcs_length(a, b) as f64 / total as f64
}

/// Length of the longest common subsequence of two char slices.
pub fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Two-row table over the shorter slice
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev_row = vec![0usize; inner.len() + 1];
    let mut curr_row = vec![0usize; inner.len() + 1];

    for outer_char in outer {
        for (j, inner_char) in inner.iter().enumerate() {
            curr_row[j + 1] = if outer_char == inner_char {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[inner.len()]
}

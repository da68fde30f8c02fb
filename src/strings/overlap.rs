/*!
 * Suffix/prefix overlap detection between two strings.
 *
 * Used to find text that moved from the end of one subtitle to the start of
 * another (or anywhere else in the transcript). Short overlaps must match
 * exactly to count; longer overlaps are trusted at lower similarity. Repeated
 * tokens inside a candidate overlap raise the minimum length it needs, so
 * that common short phrases like "in in" or "the the" do not produce
 * spurious matches.
 */

use log::trace;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::app_config::OverlapConfig;
use crate::strings::similarity::lcs_ratio;

/// Overlaps shorter than this are never accepted
const MIN_ACCEPTED_OVERLAP: usize = 2;

/// Overlap length at which the acceptance curve reaches its lowest sloped value
const CURVE_END_OVERLAP: usize = 20;

/// Required similarity at `CURVE_END_OVERLAP`
const CURVE_END_SIMILARITY: f64 = 0.71;

/// Tolerance for floating point comparisons of similarity ratios
const SIMILARITY_EPSILON: f64 = 1e-9;

/// The similarity an overlap of `overlap_len` chars needs to be accepted.
///
/// Returns `None` for overlaps too short to ever be accepted. The result
/// never drops below `min_ratio`.
pub fn required_overlap_similarity(overlap_len: usize, min_ratio: f64) -> Option<f64> {
    if overlap_len < MIN_ACCEPTED_OVERLAP {
        return None;
    }
    if overlap_len > CURVE_END_OVERLAP {
        return Some(min_ratio);
    }

    let steps = (CURVE_END_OVERLAP - MIN_ACCEPTED_OVERLAP) as f64;
    let step = (1.0 - CURVE_END_SIMILARITY) / steps;
    let required = 1.0 - (overlap_len - MIN_ACCEPTED_OVERLAP) as f64 * step;

    Some(required.max(min_ratio))
}

/// Whether `sim` is enough to trust an overlap of `overlap_len` chars.
///
/// Monotone: the required similarity never increases with the overlap length.
pub fn sufficient_overlap_similarity(sim: f64, overlap_len: usize, min_ratio: f64) -> bool {
    match required_overlap_similarity(overlap_len, min_ratio) {
        Some(required) => sim + SIMILARITY_EPSILON >= required,
        None => false,
    }
}

/// Find repeated substrings in `text`.
///
/// Candidates are runs of whole whitespace-separated tokens at least
/// `min_length` chars long that occur two or more times. Only maximal
/// repetitions are kept: a run contained in a longer run with the same
/// number of occurrences is dropped. Offsets are char offsets into `text`.
pub fn repetitions(text: &str, min_length: usize) -> BTreeMap<String, Vec<usize>> {
    // (char start, char end, byte start, byte end) per token
    let mut tokens: Vec<(usize, usize, usize, usize)> = Vec::new();
    let mut token_start: Option<(usize, usize)> = None;
    let mut char_pos = 0;
    for (byte_pos, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some((char_start, byte_start)) = token_start.take() {
                tokens.push((char_start, char_pos, byte_start, byte_pos));
            }
        } else if token_start.is_none() {
            token_start = Some((char_pos, byte_pos));
        }
        char_pos += 1;
    }
    if let Some((char_start, byte_start)) = token_start {
        tokens.push((char_start, char_pos, byte_start, text.len()));
    }

    let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();
    for first in 0..tokens.len() {
        for last in first..tokens.len() {
            let (char_start, _, byte_start, _) = tokens[first];
            let (_, char_end, _, byte_end) = tokens[last];
            if char_end - char_start < min_length {
                continue;
            }
            occurrences
                .entry(&text[byte_start..byte_end])
                .or_default()
                .push(char_start);
        }
    }

    let repeated: Vec<(&str, Vec<usize>)> = occurrences
        .into_iter()
        .filter(|(_, offsets)| offsets.len() >= 2)
        .collect();

    repeated
        .iter()
        .filter(|(candidate, offsets)| {
            !repeated.iter().any(|(other, other_offsets)| {
                other.len() > candidate.len()
                    && other.contains(candidate)
                    && other_offsets.len() == offsets.len()
            })
        })
        .map(|(candidate, offsets)| {
            let mut offsets = offsets.clone();
            offsets.sort_unstable();
            (candidate.to_string(), offsets)
        })
        .collect()
}

/// Overlap matcher with configurable acceptance thresholds
#[derive(Debug, Clone)]
pub struct OverlapMatcher {
    config: OverlapConfig,
}

impl Default for OverlapMatcher {
    fn default() -> Self {
        Self {
            config: OverlapConfig::default(),
        }
    }
}

impl OverlapMatcher {
    /// Create a matcher with custom configuration
    pub fn new(config: OverlapConfig) -> Self {
        Self { config }
    }

    /// Minimum overlap length for a candidate window, grown by repeated tokens.
    pub fn min_overlap_length(&self, window: &str) -> usize {
        let mut seen = HashSet::new();
        let repeated_tokens = window
            .split_whitespace()
            .filter(|token| !seen.insert(*token))
            .count();

        self.config.base_min_overlap + repeated_tokens * self.config.repetition_penalty
    }

    /// Length in chars of the longest suffix of `a` that matches a prefix of `b`.
    ///
    /// Returns 0 if no overlap is accepted.
    pub fn overlap(&self, a: &str, b: &str) -> usize {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let max_len = a_chars
            .len()
            .min(b_chars.len())
            .min(self.config.max_overlap_window);

        for len in (MIN_ACCEPTED_OVERLAP..=max_len).rev() {
            let suffix = &a_chars[a_chars.len() - len..];
            let prefix = &b_chars[..len];

            let window: String = prefix.iter().collect();
            if len < self.min_overlap_length(&window) {
                continue;
            }

            let sim = lcs_ratio(suffix, prefix);
            if sufficient_overlap_similarity(sim, len, self.config.min_similarity_ratio) {
                trace!("Accepted overlap of {} chars at similarity {:.3}: {:?}", len, sim, window);
                return len;
            }
        }

        0
    }
}

/// Overlap between `a` and `b` using default thresholds and the given minimum ratio.
pub fn overlap(a: &str, b: &str, min_similarity_ratio: f64) -> usize {
    let config = OverlapConfig {
        min_similarity_ratio,
        ..OverlapConfig::default()
    };
    OverlapMatcher::new(config).overlap(a, b)
}

/*!
 * Overlap based relocation detection.
 *
 * The banded aligner only connects records near the diagonal, so text that
 * moved far away shows up as a removed subtitle plus an unrelated added one.
 * This pass compares every removed subtitle with every non-adjacent added
 * subtitle and reports the pairs whose texts overlap.
 */

use log::{debug, trace};
use serde::Serialize;
use std::collections::HashSet;

use crate::alignment::enricher::{EnrichedPair, SubtitlePairType};
use crate::strings::overlap::OverlapMatcher;
use crate::subtitle::record::StId;

/// A removed subtitle whose text reappears in an added subtitle elsewhere
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relocation {
    /// Identity of the removed subtitle
    pub from_stid: StId,
    /// Index of the removed subtitle in the old version
    pub from_index: usize,
    /// Index of the added subtitle in the new version
    pub to_index: usize,
    /// Length of the accepted overlap in chars
    pub overlap_length: usize,
}

/// Candidate pairing before assignment
#[derive(Debug)]
struct Candidate {
    removed: usize,
    added: usize,
    overlap_length: usize,
}

/// Finds relocated text between removed and added subtitles
#[derive(Debug, Clone, Default)]
pub struct OperationsExtractor {
    matcher: OverlapMatcher,
}

impl OperationsExtractor {
    /// Create an extractor with a configured overlap matcher
    pub fn new(matcher: OverlapMatcher) -> Self {
        Self { matcher }
    }

    /// Detect relocations among enriched pairs.
    ///
    /// Candidates are assigned greedily by overlap length; each added
    /// subtitle is claimed at most once.
    pub fn extract_relocations(&self, pairs: &[EnrichedPair]) -> Vec<Relocation> {
        let positions_of = |pair_type| {
            pairs
                .iter()
                .enumerate()
                .filter(move |(_, p)| p.pair_type == pair_type)
                .map(|(position, _)| position)
        };
        let removed: Vec<usize> = positions_of(SubtitlePairType::StRemoved).collect();
        let added: Vec<usize> = positions_of(SubtitlePairType::StAdded).collect();

        let mut candidates = Vec::new();
        for &r in &removed {
            for &a in &added {
                if r.abs_diff(a) <= 1 {
                    continue;
                }
                let overlap_length = self.relocation_overlap(&pairs[r], &pairs[a]);
                if overlap_length > 0 {
                    candidates.push(Candidate { removed: r, added: a, overlap_length });
                }
            }
        }
        candidates.sort_by(|x, y| {
            y.overlap_length
                .cmp(&x.overlap_length)
                .then(x.removed.cmp(&y.removed))
                .then(x.added.cmp(&y.added))
        });

        let mut used_removed = HashSet::new();
        let mut used_added = HashSet::new();
        let mut relocations = Vec::new();
        for candidate in candidates {
            if used_removed.contains(&candidate.removed) || used_added.contains(&candidate.added) {
                continue;
            }
            used_removed.insert(candidate.removed);
            used_added.insert(candidate.added);

            let removed_pair = &pairs[candidate.removed];
            relocations.push(Relocation {
                from_stid: removed_pair.subtitle_object.clone(),
                from_index: removed_pair.from.index,
                to_index: pairs[candidate.added].to.index,
                overlap_length: candidate.overlap_length,
            });
        }
        relocations.sort_by_key(|r| r.from_index);

        debug!(
            "Found {} relocations among {} removed and {} added subtitles",
            relocations.len(),
            removed.len(),
            added.len()
        );
        relocations
    }

    /// Overlap in either direction, zero when it only covers a repeated phrase
    fn relocation_overlap(&self, removed: &EnrichedPair, added: &EnrichedPair) -> usize {
        let a = removed.from.content.trim().to_lowercase();
        let b = added.to.content.trim().to_lowercase();

        let forward = self.matcher.overlap(&a, &b);
        let backward = self.matcher.overlap(&b, &a);
        let (length, overlap_text) = if forward >= backward {
            (forward, b.chars().take(forward).collect::<String>())
        } else {
            (backward, a.chars().take(backward).collect::<String>())
        };
        if length == 0 {
            return 0;
        }

        let repeated = added
            .to
            .repetitions
            .keys()
            .any(|phrase| phrase.to_lowercase().contains(&overlap_text));
        if repeated {
            trace!("Ignoring overlap {:?} inside a repeated phrase", overlap_text);
            return 0;
        }

        length
    }
}

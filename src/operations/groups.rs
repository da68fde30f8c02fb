/*!
 * Grouping of enriched pairs into operation groups.
 *
 * A group is a run of consecutive non-identical pairs. Identical pairs and
 * aligned subtitle boundaries separate groups: a group ends after a
 * right-aligned pair, and a left-aligned pair starts a new group.
 *
 * Two neighbouring one-to-one pairs share a fixed boundary, so they only stay
 * in one group as a left-aligned pair followed by a right-aligned pair. An
 * unaligned pair opens a group like a left-aligned pair, and closes one like
 * a right-aligned pair when it follows added or removed subtitles.
 */

use log::debug;

use crate::alignment::enricher::{EnrichedPair, SubtitlePairType};

/// Consecutive non-identical pairs that become one operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationSubtitlePairGroup<'a> {
    pairs: &'a [EnrichedPair],
}

impl<'a> OperationSubtitlePairGroup<'a> {
    pub fn pairs(&self) -> &'a [EnrichedPair] {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pair type codes, e.g. `LDR`
    pub fn pattern(&self) -> String {
        self.pairs.iter().map(|p| p.pair_type.code()).collect()
    }

    /// Index of the first from record in the group that is not a gap
    pub fn first_from_index(&self) -> Option<usize> {
        self.pairs.iter().find(|p| !p.from.is_gap()).map(|p| p.from.index)
    }
}

/// Whether the pair keeps one subtitle on each side
fn is_one_to_one(pair: &EnrichedPair) -> bool {
    pair.subtitle_count_change == 0
}

/// Split enriched pairs into operation groups, in sequence order
pub fn extract_groups(pairs: &[EnrichedPair]) -> Vec<OperationSubtitlePairGroup<'_>> {
    let mut groups = Vec::new();
    let mut start: Option<usize> = None;

    for (position, pair) in pairs.iter().enumerate() {
        // Open group whose last pair is one-to-one
        let after_one_to_one = start.is_some() && position > 0 && is_one_to_one(&pairs[position - 1]);

        match pair.pair_type {
            SubtitlePairType::Identical => {
                if let Some(group_start) = start.take() {
                    groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..position] });
                }
            }
            SubtitlePairType::LeftAligned => {
                if let Some(group_start) = start.replace(position) {
                    groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..position] });
                }
            }
            SubtitlePairType::RightAligned => {
                let left_aligned_before =
                    position > 0 && pairs[position - 1].pair_type == SubtitlePairType::LeftAligned;
                if after_one_to_one && !left_aligned_before {
                    if let Some(group_start) = start.take() {
                        groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..position] });
                    }
                }
                let group_start = start.take().unwrap_or(position);
                groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..=position] });
            }
            SubtitlePairType::Unaligned => match start {
                Some(group_start) if after_one_to_one => {
                    groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..position] });
                    start = Some(position);
                }
                Some(group_start) => {
                    groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..=position] });
                    start = None;
                }
                None => start = Some(position),
            },
            SubtitlePairType::StAdded | SubtitlePairType::StRemoved => {
                start.get_or_insert(position);
            }
        }
    }
    if let Some(group_start) = start {
        groups.push(OperationSubtitlePairGroup { pairs: &pairs[group_start..] });
    }

    debug!("Grouped {} aligned pairs into {} operation groups", pairs.len(), groups.len());
    groups
}

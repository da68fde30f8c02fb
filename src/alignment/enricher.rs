/*!
 * Aligned pair enrichment and classification.
 *
 * Each aligned pair gets similarity metrics for its whole content, its
 * beginnings and its endings, the length and count deltas, a pair type and
 * the subtitle identity that flows into the operation built from it.
 */

use serde::Serialize;
use std::fmt;

use crate::errors::AlignmentError;
use crate::strings::similarity::{similarity, Similarity, TextAlignment};
use crate::subtitle::record::{StId, SubtitleRecord};

/// Classification of an aligned pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitlePairType {
    /// Only in the new version
    StAdded,
    /// Only in the old version
    StRemoved,
    /// Beginnings and endings both match
    Identical,
    /// Beginnings match, content changed at the end
    LeftAligned,
    /// Endings match, content changed at the start
    RightAligned,
    /// Neither end matches
    Unaligned,
}

impl SubtitlePairType {
    /// One-letter code used in group patterns
    pub fn code(&self) -> char {
        match self {
            Self::StAdded => 'A',
            Self::StRemoved => 'D',
            Self::Identical => 'I',
            Self::LeftAligned => 'L',
            Self::RightAligned => 'R',
            Self::Unaligned => 'U',
        }
    }
}

impl fmt::Display for SubtitlePairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StAdded => "st_added",
            Self::StRemoved => "st_removed",
            Self::Identical => "identical",
            Self::LeftAligned => "left_aligned",
            Self::RightAligned => "right_aligned",
            Self::Unaligned => "unaligned",
        };
        write!(f, "{}", name)
    }
}

/// A from record and a to record paired by the aligner; either may be a gap
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub from: SubtitleRecord,
    pub to: SubtitleRecord,
}

impl AlignedPair {
    pub fn new(from: SubtitleRecord, to: SubtitleRecord) -> Self {
        Self { from, to }
    }
}

/// Aligned pair with computed attributes
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPair {
    pub from: SubtitleRecord,
    pub to: SubtitleRecord,
    /// Similarity of the full contents
    pub sim_abs: Similarity,
    /// Similarity of the beginnings
    pub sim_left: Similarity,
    /// Similarity of the endings
    pub sim_right: Similarity,
    /// `to` content length minus `from` content length, in chars
    pub content_length_change: i64,
    /// `to` subtitle count minus `from` subtitle count
    pub subtitle_count_change: i8,
    pub pair_type: SubtitlePairType,
    /// Identity carried into operations
    pub subtitle_object: StId,
}

/// Classify a pair.
///
/// Gaps decide first, then equal comparison forms (empty subtitles included),
/// then the truncated similarities of both ends.
pub fn compute_subtitle_pair_type(
    from: &SubtitleRecord,
    to: &SubtitleRecord,
    sim_left: &Similarity,
    sim_right: &Similarity,
) -> SubtitlePairType {
    if from.is_gap() {
        SubtitlePairType::StAdded
    } else if to.is_gap() {
        SubtitlePairType::StRemoved
    } else if from.content_sim == to.content_sim
        || (sim_left.is_identical() && sim_right.is_identical())
    {
        SubtitlePairType::Identical
    } else if sim_left.is_identical() {
        SubtitlePairType::LeftAligned
    } else if sim_right.is_identical() {
        SubtitlePairType::RightAligned
    } else {
        SubtitlePairType::Unaligned
    }
}

/// Enrich aligned pairs in sequence order.
///
/// Records added in the new version get temporary ids based on the closest
/// preceding from-side persistent id, numbered from 1 after each id.
pub fn enrich_aligned_pairs(pairs: Vec<AlignedPair>) -> Result<Vec<EnrichedPair>, AlignmentError> {
    let mut last_persistent_id: Option<String> = None;
    let mut temporary_offset = 0;
    let mut enriched = Vec::with_capacity(pairs.len());

    for (position, AlignedPair { from, to }) in pairs.into_iter().enumerate() {
        if from.is_gap() && to.is_gap() {
            return Err(AlignmentError::DoubleGap(position));
        }

        let a = &from.content_sim;
        let b = &to.content_sim;
        let shortest = a.chars().count().min(b.chars().count());
        let sim_abs = similarity(a, b, None, TextAlignment::Left);
        let sim_left = similarity(a, b, Some(shortest), TextAlignment::Left);
        let sim_right = similarity(a, b, Some(shortest), TextAlignment::Right);

        let pair_type = compute_subtitle_pair_type(&from, &to, &sim_left, &sim_right);

        let subtitle_object = match &from.persistent_id {
            Some(id) => {
                last_persistent_id = Some(id.clone());
                temporary_offset = 0;
                StId::Stable(id.clone())
            }
            None => {
                temporary_offset += 1;
                StId::Temporary {
                    based_on: last_persistent_id.clone(),
                    offset: temporary_offset,
                }
            }
        };

        enriched.push(EnrichedPair {
            content_length_change: to.content_length() as i64 - from.content_length() as i64,
            subtitle_count_change: to.subtitle_count as i8 - from.subtitle_count as i8,
            from,
            to,
            sim_abs,
            sim_left,
            sim_right,
            pair_type,
            subtitle_object,
        });
    }

    Ok(enriched)
}

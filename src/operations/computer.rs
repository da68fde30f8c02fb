/*!
 * Operations computer.
 *
 * Maps every operation group to typed operations by matching the group's
 * pair type pattern against a fixed set of templates. A group becomes one
 * operation, except when added or removed subtitles sit next to one-to-one
 * pairs whose length change does not fit a merge or split: then the gap run
 * becomes an insert or delete and each one-to-one pair a content change.
 * Groups matching no template are errors, never guesses.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::alignment::enricher::{EnrichedPair, SubtitlePairType};
use crate::errors::OperationError;
use crate::operations::groups::OperationSubtitlePairGroup;
use crate::operations::model::{Operation, OperationType};
use crate::subtitle::record::StId;

static INSERT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^A+$").expect("Invalid insert regex"));

static DELETE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^D+$").expect("Invalid delete regex"));

static CONTENT_CHANGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[LRU]$").expect("Invalid content change regex"));

static MOVE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^LR$").expect("Invalid move regex"));

/// Removed subtitles next to surviving neighbours
static MERGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([LU]D+|D+[RU]|[LU]D+[RU])$").expect("Invalid merge regex"));

/// Added subtitles next to surviving neighbours
static SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([LU]A+|A+[RU]|[LU]A+[RU])$").expect("Invalid split regex"));

/// Turns operation groups into operations with sequential ids
#[derive(Debug, Clone)]
pub struct OperationsComputer {
    starting_id: u64,
}

impl OperationsComputer {
    /// Create a computer handing out ids from `starting_id` on
    pub fn new(starting_id: u64) -> Result<Self, OperationError> {
        if starting_id == 0 {
            return Err(OperationError::InvalidStartingId(starting_id));
        }
        Ok(Self { starting_id })
    }

    /// Compute the operations of all groups, in group order
    pub fn compute(&self, groups: &[OperationSubtitlePairGroup<'_>]) -> Result<Vec<Operation>, OperationError> {
        let mut operations = Vec::with_capacity(groups.len());
        for group in groups {
            let next_id = self.starting_id + operations.len() as u64;
            operations.extend(self.compute_group_operations(group, next_id)?);
        }

        debug!("Computed {} operations from {} groups", operations.len(), groups.len());
        Ok(operations)
    }

    /// Classify a single group, numbering its operations from `first_id`
    pub fn compute_group_operations(
        &self,
        group: &OperationSubtitlePairGroup<'_>,
        first_id: u64,
    ) -> Result<Vec<Operation>, OperationError> {
        let pairs = group.pairs();
        let pattern = group.pattern();

        let operation_type = if INSERT_REGEX.is_match(&pattern) {
            OperationType::Insert
        } else if DELETE_REGEX.is_match(&pattern) {
            OperationType::Delete
        } else if CONTENT_CHANGE_REGEX.is_match(&pattern) {
            OperationType::ContentChange
        } else if MOVE_REGEX.is_match(&pattern) {
            match pairs[0].content_length_change {
                change if change > 0 => OperationType::MoveRight,
                change if change < 0 => OperationType::MoveLeft,
                _ => OperationType::ContentChange,
            }
        } else if MERGE_REGEX.is_match(&pattern) {
            if surviving_length_change(pairs, SubtitlePairType::StRemoved) <= 0 {
                debug!("Survivors of [{}] did not grow, keeping delete and content changes apart", pattern);
                return Ok(decompose(pairs, first_id, OperationType::Delete));
            }
            OperationType::Merge
        } else if SPLIT_REGEX.is_match(&pattern) {
            if surviving_length_change(pairs, SubtitlePairType::StAdded) >= 0 {
                debug!("Survivors of [{}] did not shrink, keeping insert and content changes apart", pattern);
                return Ok(decompose(pairs, first_id, OperationType::Insert));
            }
            OperationType::Split
        } else {
            return Err(OperationError::UnhandledPattern {
                pattern,
                from_index: group.first_from_index(),
            });
        };

        Ok(vec![build_operation(first_id, operation_type, pairs)])
    }
}

fn build_operation(operation_id: u64, operation_type: OperationType, pairs: &[EnrichedPair]) -> Operation {
    let after_stid = match operation_type {
        OperationType::Insert => insert_position(pairs),
        _ => None,
    };

    Operation {
        operation_id,
        operation_type,
        affected_stids: pairs.iter().map(|p| p.subtitle_object.clone()).collect(),
        after_stid,
    }
}

/// One `gap_operation` for the added or removed run, one content change per one-to-one pair
fn decompose(pairs: &[EnrichedPair], first_id: u64, gap_operation: OperationType) -> Vec<Operation> {
    pairs
        .chunk_by(|a, b| a.subtitle_count_change != 0 && b.subtitle_count_change != 0)
        .zip(first_id..)
        .map(|(chunk, operation_id)| {
            let operation_type = if chunk[0].subtitle_count_change == 0 {
                OperationType::ContentChange
            } else {
                gap_operation
            };
            build_operation(operation_id, operation_type, chunk)
        })
        .collect()
}

/// Content length change of the pairs that are not of `excluded` type
fn surviving_length_change(pairs: &[EnrichedPair], excluded: SubtitlePairType) -> i64 {
    pairs
        .iter()
        .filter(|p| p.pair_type != excluded)
        .map(|p| p.content_length_change)
        .sum()
}

/// Persistent id the first inserted subtitle follows
fn insert_position(pairs: &[EnrichedPair]) -> Option<StId> {
    match pairs.first().map(|p| &p.subtitle_object) {
        Some(StId::Temporary {
            based_on: Some(id), ..
        }) => Some(StId::Stable(id.clone())),
        _ => None,
    }
}

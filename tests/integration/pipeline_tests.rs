/*!
 * End-to-end tests for operation extraction
 */

use std::collections::BTreeSet;

use stalign::alignment::{enrich_aligned_pairs, SubtitleAligner, SubtitlePairType};
use stalign::app_config::Config;
use stalign::errors::{AppError, ExtractionError};
use stalign::operations::OperationType;
use stalign::pipeline::SubtitleOperationsPipeline;
use stalign::subtitle::{AttributeExtractor, StId};
use crate::common::{self, FROM_TRANSCRIPT, TO_TRANSCRIPT};

/// Test the classification of the sample transcript pairs
#[test]
fn test_alignment_mergedAndAddedSubtitles_shouldClassifyPairs() {
    let extractor = AttributeExtractor::default();
    let from = extractor.extract_with_identities(FROM_TRANSCRIPT, &common::sample_identities()).unwrap();
    let to = extractor.extract(TO_TRANSCRIPT).unwrap();

    let alignment = SubtitleAligner::new(&from, &to, Config::default().alignment)
        .get_optimal_alignment()
        .unwrap();
    let pairs = enrich_aligned_pairs(alignment.pairs).unwrap();
    let types: Vec<SubtitlePairType> = pairs.iter().map(|p| p.pair_type).collect();

    assert_eq!(
        types,
        vec![
            SubtitlePairType::LeftAligned,
            SubtitlePairType::StRemoved,
            SubtitlePairType::RightAligned,
            SubtitlePairType::StAdded,
        ]
    );
    assert_eq!(pairs[0].content_length_change, 13);
    assert_eq!(pairs[1].subtitle_count_change, -1);
    assert_eq!(pairs[3].subtitle_count_change, 1);
    assert_eq!(pairs[3].subtitle_object.to_string(), "tmp-1000003+1");
    // Gaps never carry a persistent id
    for pair in &pairs {
        assert!(!(pair.from.is_gap() && pair.to.is_gap()));
        assert!(!pair.from.is_gap() || pair.from.persistent_id.is_none());
    }
}

/// Test the operations of the sample transcript
#[test]
fn test_compute_sampleTranscript_shouldMergeAndInsert() {
    common::init_test_logger();
    let pipeline = SubtitleOperationsPipeline::default();
    let report = pipeline.compute(FROM_TRANSCRIPT, &common::sample_identities(), TO_TRANSCRIPT).unwrap();

    assert_eq!(report.operations.len(), 2);

    let merge = &report.operations[0];
    assert_eq!(merge.operation_id, 1);
    assert_eq!(merge.operation_type, OperationType::Merge);
    assert_eq!(
        merge.affected_stids,
        vec![StId::stable("1000001"), StId::stable("1000002"), StId::stable("1000003")]
    );
    assert_eq!(merge.after_stid, None);

    let insert = &report.operations[1];
    assert_eq!(insert.operation_id, 2);
    assert_eq!(insert.operation_type, OperationType::Insert);
    assert_eq!(insert.after_stid, Some(StId::stable("1000003")));

    assert!(report.relocations.is_empty());
    assert_eq!(report.diagnostics.aligned_pairs, 4);
    assert_eq!(report.diagnostics.groups, 2);
    assert_eq!(report.diagnostics.band_edge_hits, 0);
}

/// Test that every changed subtitle is covered by exactly the emitted operations
#[test]
fn test_compute_sampleTranscript_shouldCoverEveryChangedSubtitle() {
    let pipeline = SubtitleOperationsPipeline::default();
    let report = pipeline.compute(FROM_TRANSCRIPT, &common::sample_identities(), TO_TRANSCRIPT).unwrap();

    let affected: BTreeSet<String> = report
        .operations
        .iter()
        .flat_map(|op| op.affected_stids.iter())
        .filter(|stid| !stid.is_temporary())
        .map(|stid| stid.to_string())
        .collect();
    let expected: BTreeSet<String> = ["1000001", "1000002", "1000003"].iter().map(|s| s.to_string()).collect();

    assert_eq!(affected, expected);
}

/// Test the starting id setting
#[test]
fn test_compute_customStartingId_shouldNumberFromIt() {
    let mut config = Config::default();
    config.extraction.starting_operation_id = 2;
    let pipeline = SubtitleOperationsPipeline::new(config);
    let report = pipeline.compute(FROM_TRANSCRIPT, &common::sample_identities(), TO_TRANSCRIPT).unwrap();

    let ids: Vec<u64> = report.operations.iter().map(|op| op.operation_id).collect();
    assert_eq!(ids, vec![2, 3]);
}

/// Test that an unchanged transcript yields no operations
#[test]
fn test_compute_identicalVersions_shouldYieldNoOperations() {
    let pipeline = SubtitleOperationsPipeline::default();
    let report = pipeline.compute(FROM_TRANSCRIPT, &common::sample_identities(), FROM_TRANSCRIPT).unwrap();

    assert!(report.operations.is_empty());
    assert!(report.relocations.is_empty());
    assert_eq!(report.diagnostics.groups, 0);
    assert_eq!(report.diagnostics.aligned_pairs, 3);
}

/// Test that missing identities fail instead of dropping subtitles
#[test]
fn test_compute_missingIdentity_shouldFail() {
    let pipeline = SubtitleOperationsPipeline::default();
    let mut identities = common::sample_identities();
    identities.pop();

    let result = pipeline.compute(FROM_TRANSCRIPT, &identities, TO_TRANSCRIPT);
    assert!(matches!(
        result,
        Err(AppError::Extraction(ExtractionError::MarkerCountMismatch { markers: 3, identities: 2 }))
    ));
}

/// Test the JSON form of the report
#[test]
fn test_report_serialize_shouldUseCamelCaseSchema() {
    let pipeline = SubtitleOperationsPipeline::default();
    let report = pipeline.compute(FROM_TRANSCRIPT, &common::sample_identities(), TO_TRANSCRIPT).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["operations"][0]["operationType"], "merge");
    assert_eq!(json["operations"][1]["affectedStids"][0], "tmp-1000003+1");
    assert_eq!(json["operations"][1]["afterStid"], "1000003");
    assert_eq!(json["diagnostics"]["alignedPairs"], 4);
    assert!(json["relocations"].as_array().unwrap().is_empty());
}

/// Operation types with their affected ids, in report order
fn summarize(from_text: &str, to_text: &str) -> Vec<(OperationType, Vec<String>)> {
    let subtitles = from_text.matches('@').count();
    let pipeline = SubtitleOperationsPipeline::default();
    let report = pipeline
        .compute(from_text, &common::numbered_identities(subtitles), to_text)
        .unwrap();

    report
        .operations
        .iter()
        .map(|op| (op.operation_type, op.affected_stids.iter().map(|s| s.to_string()).collect()))
        .collect()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Test that two neighbouring edited subtitles stay separate content changes
#[test]
fn test_compute_neighbouringEdits_shouldYieldContentChanges() {
    let operations = summarize(
        "@The quick brown fox jumps @over the lazy dog today @Keep this one",
        "@The quick red fox jumps @over the sleepy dog today @Keep this one",
    );

    assert_eq!(
        operations,
        vec![
            (OperationType::ContentChange, ids(&["1000001"])),
            (OperationType::ContentChange, ids(&["1000002"])),
        ]
    );
}

/// Test a left-aligned edit followed by an unaligned edit
#[test]
fn test_compute_leftAlignedThenUnaligned_shouldYieldContentChanges() {
    let operations = summarize(
        "@Start here @The quick brown fox jumps @over the lazy dog today @Keep this one",
        "@Start here @The quick brown fox jumps far @over the sleepy dog today @Keep this one",
    );

    assert_eq!(
        operations,
        vec![
            (OperationType::ContentChange, ids(&["1000002"])),
            (OperationType::ContentChange, ids(&["1000003"])),
        ]
    );
}

/// Test an edited subtitle that gave up text to an added one
#[test]
fn test_compute_shrunkEditBeforeAdded_shouldSplit() {
    let operations = summarize(
        "@The quick brown fox jumps over @the lazy dog @Keep this one",
        "@The quick red fox jumps @and then some new words arrive @the lazy dog @Keep this one",
    );

    assert_eq!(operations, vec![(OperationType::Split, ids(&["1000001", "tmp-1000001+1"]))]);
}

/// Test an added subtitle before an edited subtitle that grew
#[test]
fn test_compute_addedBeforeGrownEdit_shouldInsertAndChange() {
    let pipeline = SubtitleOperationsPipeline::default();
    let report = pipeline
        .compute(
            "@The quick fox @Keep this one",
            &common::numbered_identities(2),
            "@The very quick red fox @Brand new words here @Keep this one",
        )
        .unwrap();

    let insert = &report.operations[0];
    assert_eq!(insert.operation_type, OperationType::Insert);
    assert_eq!(insert.affected_stids, vec![StId::Temporary { based_on: None, offset: 1 }]);
    assert_eq!(insert.after_stid, None);
    assert_eq!(report.operations[1].operation_type, OperationType::ContentChange);
    assert_eq!(report.operations[1].affected_stids, vec![StId::stable("1000001")]);
    assert_eq!(report.operations[1].operation_id, 2);
}

/// Test a removed subtitle before an edited subtitle that did not absorb it
#[test]
fn test_compute_removedBeforeShrunkEdit_shouldDeleteAndChange() {
    let operations = summarize(
        "@Keep first @Removed line goes away @A completely fresh ending here @Keep this one",
        "@Keep first @A fully new ending there @Keep this one",
    );

    assert_eq!(
        operations,
        vec![
            (OperationType::Delete, ids(&["1000002"])),
            (OperationType::ContentChange, ids(&["1000003"])),
        ]
    );
}

/// Test a removed subtitle absorbed by an unaligned neighbour
#[test]
fn test_compute_removedBeforeGrownEdit_shouldMerge() {
    let operations = summarize(
        "@Keep first @Removed line goes away @A fresh ending @Keep this one",
        "@Keep first @A much longer and fully new ending there @Keep this one",
    );

    assert_eq!(operations, vec![(OperationType::Merge, ids(&["1000002", "1000003"]))]);
}

/// Test that an empty subtitle compared with itself is unchanged
#[test]
fn test_compute_identicalVersionsWithEmptySubtitle_shouldYieldNoOperations() {
    for text in ["@One two three @@Four five six", "@One two three @% @Four five six"] {
        assert!(summarize(text, text).is_empty(), "{:?}", text);
    }
}

/// Test that an edit of a non-ASCII digit is reported
#[test]
fn test_compute_changedArabicIndicDigit_shouldYieldContentChange() {
    let operations = summarize("@Verse \u{663} begins here @Keep", "@Verse \u{667} begins here @Keep");

    assert_eq!(operations, vec![(OperationType::ContentChange, ids(&["1000001"]))]);
}

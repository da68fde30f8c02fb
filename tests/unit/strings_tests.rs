/*!
 * Tests for similarity, overlap and normalization through the public API
 */

use stalign::app_config::OverlapConfig;
use stalign::strings::normalize::content_sim;
use stalign::strings::{overlap, similarity, sufficient_overlap_similarity, OverlapMatcher, TextAlignment};

/// Test that similarity ratios stay in range and are symmetric
#[test]
fn test_similarity_variousPairs_shouldBeSymmetricAndBounded() {
    let samples = [
        "the quick brown fox",
        "the lazy dog sleeping in the sun",
        "while birds sing",
        "quick brown",
        "",
    ];

    for a in samples {
        for b in samples {
            for alignment in [TextAlignment::Left, TextAlignment::Right] {
                let ab = similarity(a, b, Some(usize::MAX), alignment);
                let ba = similarity(b, a, Some(usize::MAX), alignment);
                assert_eq!(ab, ba, "{:?} vs {:?}", a, b);
                assert!((0.0..=1.0).contains(&ab.token_ratio));
                assert!((0.0..=1.0).contains(&ab.lcs_ratio));
                if a == b && !a.is_empty() {
                    assert!(ab.is_identical());
                }
            }
        }
    }
}

/// Test that the acceptance curve is monotone in the overlap length
#[test]
fn test_sufficientOverlapSimilarity_growingOverlap_shouldNeverRequireMore() {
    for len in 2..40 {
        for step in 0..=100 {
            let sim = step as f64 / 100.0;
            if sufficient_overlap_similarity(sim, len, 0.66) {
                assert!(sufficient_overlap_similarity(sim, len + 1, 0.66), "sim {} overlap {}", sim, len);
            }
        }
    }
}

/// Test a matcher with a stricter repetition penalty
#[test]
fn test_overlapMatcher_customConfig_shouldApplyThresholds() {
    let strict = OverlapMatcher::new(OverlapConfig {
        base_min_overlap: 20,
        ..OverlapConfig::default()
    });

    assert_eq!(overlap("we went home", "home was fine", 0.66), 4);
    assert_eq!(strict.overlap("we went home", "home was fine"), 0);
}

/// Test the comparison form of subtitle content
#[test]
fn test_contentSim_withParagraphNumber_shouldNormalize() {
    assert_eq!(content_sim("12 The  Quick\tFox ", true), "the quick fox");
    assert_eq!(content_sim("12 The Quick Fox", false), "twelve the quick fox");
    assert_eq!(content_sim("In 1965 we went", false), "in one thousand nine hundred sixty-five we went");
}

/*!
 * String computations used by the aligner and the operation extractors.
 *
 * - `normalize`: comparison form of subtitle content
 * - `similarity`: Jaccard and LCS similarity ratios
 * - `overlap`: suffix/prefix overlap and repeated phrase detection
 */

pub mod normalize;
pub mod overlap;
pub mod similarity;

pub use overlap::{overlap, repetitions, sufficient_overlap_similarity, OverlapMatcher};
pub use similarity::{similarity, Similarity, TextAlignment};

/*!
 * Sequence alignment of subtitle records.
 *
 * - `matrix`: flat storage for banded DP matrices
 * - `aligner`: banded Needleman-Wunsch over subtitle records
 * - `enricher`: similarity metrics and classification of aligned pairs
 */

pub mod aligner;
pub mod enricher;
pub mod matrix;

pub use aligner::{Alignment, MatrixKind, SubtitleAligner};
pub use enricher::{compute_subtitle_pair_type, enrich_aligned_pairs, AlignedPair, EnrichedPair, SubtitlePairType};
pub use matrix::{Arrow, BandedMatrix, Cell};

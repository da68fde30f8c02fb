/*!
 * # stalign - subtitle alignment and operation extraction
 *
 * Given two versions of a subtitled transcript, computes a minimum-cost
 * alignment between their subtitles and derives the typed edit operations
 * (insert, delete, merge, split, moves, content changes) that turn the old
 * subtitles into the new ones while keeping persistent ids stable.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `strings`: similarity ratios, suffix/prefix overlap and repetitions
 * - `subtitle`: subtitle records and transcript parsing
 * - `alignment`: banded sequence aligner and pair classification
 * - `operations`: grouping, operation templates and relocation detection
 * - `pipeline`: the full computation for one transcript pair
 * - `app_config`: Configuration management
 * - `app_controller`: Single file and folder processing
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod operations;
pub mod pipeline;
pub mod strings;
pub mod subtitle;

// Re-export main types for easier usage
pub use alignment::{AlignedPair, EnrichedPair, SubtitleAligner, SubtitlePairType};
pub use app_config::Config;
pub use errors::{AlignmentError, AppError, ExtractionError, OperationError};
pub use operations::{Operation, OperationType, OperationsComputer, OperationsExtractor, Relocation};
pub use pipeline::{OperationsReport, SubtitleOperationsPipeline};
pub use subtitle::{AttributeExtractor, StId, SubtitleIdentity, SubtitleRecord};

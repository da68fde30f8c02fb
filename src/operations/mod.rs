/*!
 * Edit operations derived from aligned subtitle pairs.
 *
 * - `model`: operation types and their serialized form
 * - `groups`: grouping of enriched pairs, one group per operation
 * - `computer`: template matching of groups into operations
 * - `extractor`: overlap based detection of relocated text
 */

pub mod computer;
pub mod extractor;
pub mod groups;
pub mod model;

pub use computer::OperationsComputer;
pub use extractor::{OperationsExtractor, Relocation};
pub use groups::{extract_groups, OperationSubtitlePairGroup};
pub use model::{Operation, OperationType};

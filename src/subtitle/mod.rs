/*!
 * Subtitle records and transcript parsing.
 *
 * - `record`: subtitle records and persistent identities
 * - `attributes`: extraction of records from annotated transcripts
 */

pub mod attributes;
pub mod record;

pub use attributes::AttributeExtractor;
pub use record::{records_from_texts, StId, SubtitleIdentity, SubtitleRecord};

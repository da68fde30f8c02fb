/*!
 * Per-file operation computation.
 *
 * Runs the whole chain for one pair of transcript versions:
 * extraction, alignment, enrichment, grouping, operations and relocations.
 */

use log::{debug, info};
use serde::Serialize;

use crate::alignment::aligner::SubtitleAligner;
use crate::alignment::enricher::enrich_aligned_pairs;
use crate::app_config::Config;
use crate::errors::AppError;
use crate::operations::computer::OperationsComputer;
use crate::operations::extractor::{OperationsExtractor, Relocation};
use crate::operations::groups::extract_groups;
use crate::operations::model::Operation;
use crate::strings::overlap::OverlapMatcher;
use crate::subtitle::attributes::AttributeExtractor;
use crate::subtitle::record::{SubtitleIdentity, SubtitleRecord};

/// Statistics about one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Traceback cells on the edge of a restricting band
    pub band_edge_hits: usize,
    pub aligned_pairs: usize,
    pub groups: usize,
}

/// Everything computed for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsReport {
    pub operations: Vec<Operation>,
    pub relocations: Vec<Relocation>,
    pub diagnostics: Diagnostics,
}

/// Computes operations between two versions of a transcript
#[derive(Debug, Clone)]
pub struct SubtitleOperationsPipeline {
    config: Config,
}

impl Default for SubtitleOperationsPipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SubtitleOperationsPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute operations from annotated transcripts.
    ///
    /// `from_ids` holds one identity per subtitle of the old version.
    pub fn compute(
        &self,
        from_text: &str,
        from_ids: &[SubtitleIdentity],
        to_text: &str,
    ) -> Result<OperationsReport, AppError> {
        let extractor = AttributeExtractor::new(self.config.extraction.clone());
        let from = extractor.extract_with_identities(from_text, from_ids)?;
        let to = extractor.extract(to_text)?;

        self.compute_records(&from, &to)
    }

    /// Compute operations from already extracted records
    pub fn compute_records(
        &self,
        from: &[SubtitleRecord],
        to: &[SubtitleRecord],
    ) -> Result<OperationsReport, AppError> {
        let aligner = SubtitleAligner::new(from, to, self.config.alignment.clone());
        let alignment = aligner.get_optimal_alignment()?;
        debug!("Alignment score {} over {} pairs", alignment.score, alignment.pairs.len());

        let pairs = enrich_aligned_pairs(alignment.pairs)?;
        let groups = extract_groups(&pairs);

        let computer = OperationsComputer::new(self.config.extraction.starting_operation_id)?;
        let operations = computer.compute(&groups)?;

        let relocations = OperationsExtractor::new(OverlapMatcher::new(self.config.overlap.clone()))
            .extract_relocations(&pairs);

        info!(
            "Computed {} operations and {} relocations for {} -> {} subtitles",
            operations.len(),
            relocations.len(),
            from.len(),
            to.len()
        );

        Ok(OperationsReport {
            diagnostics: Diagnostics {
                band_edge_hits: alignment.band_edge_hits,
                aligned_pairs: pairs.len(),
                groups: groups.len(),
            },
            operations,
            relocations,
        })
    }
}

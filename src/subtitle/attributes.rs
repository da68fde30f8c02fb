/*!
 * Subtitle attribute extraction.
 *
 * Turns an annotated transcript into an ordered sequence of subtitle records.
 * The transcript format:
 * - every subtitle starts with the subtitle mark (`@` by default)
 * - the gap mark (`%` by default) may appear anywhere and is removed
 * - paragraphs are separated by blank lines; line breaks inside a paragraph
 *   are plain whitespace
 * - record mark lines starting with `^^^` are structural and skipped
 * - text before the first mark of a paragraph continues the previous subtitle
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::ExtractionConfig;
use crate::errors::ExtractionError;
use crate::strings::normalize::collapse_whitespace;
use crate::strings::overlap::repetitions;
use crate::subtitle::record::{SubtitleIdentity, SubtitleRecord};

/// Blank line between paragraphs
static PARAGRAPH_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*\n").expect("Invalid paragraph separator regex")
});

/// Prefix of structural record mark lines
const RECORD_MARK_PREFIX: &str = "^^^";

/// Subtitle text collected before records are built
#[derive(Debug)]
struct SubtitleDraft {
    content: String,
    first_in_para: bool,
    last_in_para: bool,
}

/// Extracts subtitle records from annotated transcripts
#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    config: ExtractionConfig,
}

impl Default for AttributeExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl AttributeExtractor {
    /// Create an extractor with custom configuration
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Number of subtitle marks in `text`
    pub fn count_markers(&self, text: &str) -> usize {
        text.chars().filter(|c| *c == self.config.subtitle_mark).count()
    }

    /// Fail unless `text` holds exactly `expected` subtitle marks
    pub fn validate_marker_count(&self, text: &str, expected: usize) -> Result<(), ExtractionError> {
        let markers = self.count_markers(text);
        if markers != expected {
            return Err(ExtractionError::MarkerCountMismatch {
                markers,
                identities: expected,
            });
        }
        Ok(())
    }

    /// Extract records from the new ("to") transcript, which has no ids yet
    pub fn extract(&self, text: &str) -> Result<Vec<SubtitleRecord>, ExtractionError> {
        let drafts = self.split_subtitles(text)?;
        let records: Vec<SubtitleRecord> = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| self.build_record(index, draft))
            .collect();

        debug!("Extracted {} subtitles", records.len());
        Ok(records)
    }

    /// Extract records from the old ("from") transcript and attach its ids.
    ///
    /// Ids are matched to subtitles by position; the counts must agree.
    pub fn extract_with_identities(
        &self,
        text: &str,
        identities: &[SubtitleIdentity],
    ) -> Result<Vec<SubtitleRecord>, ExtractionError> {
        self.validate_marker_count(text, identities.len())?;

        let records = self.extract(text)?;
        if records.len() != identities.len() {
            return Err(ExtractionError::MarkerCountMismatch {
                markers: records.len(),
                identities: identities.len(),
            });
        }

        Ok(records
            .into_iter()
            .zip(identities)
            .map(|(record, identity)| record.with_identity(identity))
            .collect())
    }

    fn build_record(&self, index: usize, draft: SubtitleDraft) -> SubtitleRecord {
        let mut record = SubtitleRecord::new(index, draft.content)
            .with_paragraph_flags(draft.first_in_para, draft.last_in_para);
        record.repetitions = repetitions(&record.content, self.config.repetition_min_length);
        record
    }

    fn split_subtitles(&self, text: &str) -> Result<Vec<SubtitleDraft>, ExtractionError> {
        let gap_mark = self.config.gap_mark;
        let cleaned: String = text
            .replace("\r\n", "\n")
            .chars()
            .filter(|c| *c != gap_mark)
            .collect();

        let mut drafts: Vec<SubtitleDraft> = Vec::new();
        for paragraph in PARAGRAPH_SEPARATOR_REGEX.split(&cleaned) {
            let lines: Vec<&str> = paragraph
                .lines()
                .filter(|line| !line.trim_start().starts_with(RECORD_MARK_PREFIX))
                .collect();
            let paragraph_text = collapse_whitespace(&lines.join(" "));
            let paragraph_text = paragraph_text.trim();
            if paragraph_text.is_empty() {
                continue;
            }

            let mut pieces = paragraph_text.split(self.config.subtitle_mark);
            let prefix = pieces.next().unwrap_or_default();
            let continues_previous = !prefix.trim().is_empty();
            if continues_previous {
                let previous = drafts
                    .last_mut()
                    .ok_or_else(|| ExtractionError::ContentBeforeFirstMarker(prefix.to_string()))?;
                previous.content.push(' ');
                previous.content.push_str(prefix);
                previous.last_in_para = false;
            }

            let mut first_in_para = !continues_previous;
            for piece in pieces {
                drafts.push(SubtitleDraft {
                    content: piece.to_string(),
                    first_in_para,
                    last_in_para: false,
                });
                first_in_para = false;
            }

            if let Some(last) = drafts.last_mut() {
                last.last_in_para = true;
            }
        }

        Ok(drafts)
    }
}

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the configuration of the alignment and operation
/// extraction pipeline including loading, validating and saving settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Sequence alignment settings
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Transcript parsing settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Overlap matching settings
    #[serde(default)]
    pub overlap: OverlapConfig,

    /// Batch processing settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the banded subtitle aligner
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlignmentConfig {
    /// Maximum distance from the diagonal that gets computed.
    /// Wider bands find alignments across larger insertions or deletions
    /// at the cost of time proportional to the band.
    #[serde(default = "default_diagonal_band_range")]
    pub diagonal_band_range: usize,

    /// Score of leaving a record unmatched
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: i32,

    /// Score of pairing two records below `min_match_ratio`
    #[serde(default = "default_mismatch_penalty")]
    pub mismatch_penalty: i32,

    /// Similarity below which a pairing counts as a mismatch (0.0 to 1.0)
    #[serde(default = "default_min_match_ratio")]
    pub min_match_ratio: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            diagonal_band_range: default_diagonal_band_range(),
            gap_penalty: default_gap_penalty(),
            mismatch_penalty: default_mismatch_penalty(),
            min_match_ratio: default_min_match_ratio(),
        }
    }
}

/// Settings for turning transcripts into subtitle records
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Character that starts every subtitle
    #[serde(default = "default_subtitle_mark")]
    pub subtitle_mark: char,

    /// Character annotating gaps inside text, stripped before comparison
    #[serde(default = "default_gap_mark")]
    pub gap_mark: char,

    /// Minimum length in chars of a repeated phrase worth recording
    #[serde(default = "default_repetition_min_length")]
    pub repetition_min_length: usize,

    /// First operation id handed out for a file
    #[serde(default = "default_starting_operation_id")]
    pub starting_operation_id: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            subtitle_mark: default_subtitle_mark(),
            gap_mark: default_gap_mark(),
            repetition_min_length: default_repetition_min_length(),
            starting_operation_id: default_starting_operation_id(),
        }
    }
}

/// Settings for suffix/prefix overlap matching
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OverlapConfig {
    /// Lowest similarity ever accepted for long overlaps (0.0 to 1.0)
    #[serde(default = "default_min_similarity_ratio")]
    pub min_similarity_ratio: f64,

    /// Minimum overlap length in chars without repetitions
    #[serde(default = "default_base_min_overlap")]
    pub base_min_overlap: usize,

    /// Extra chars required per repeated token inside an overlap
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: usize,

    /// Longest overlap that gets examined, in chars
    #[serde(default = "default_max_overlap_window")]
    pub max_overlap_window: usize,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            min_similarity_ratio: default_min_similarity_ratio(),
            base_min_overlap: default_base_min_overlap(),
            repetition_penalty: default_repetition_penalty(),
            max_overlap_window: default_max_overlap_window(),
        }
    }
}

/// Settings for folder processing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum number of files processed at the same time
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Extension of transcript files to pick up
    #[serde(default = "default_transcript_extension")]
    pub transcript_extension: String,

    /// Extension of persistent id files next to each transcript
    #[serde(default = "default_ids_extension")]
    pub ids_extension: String,

    /// Extension of written operation reports
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrent_files: default_concurrent_files(),
            transcript_extension: default_transcript_extension(),
            ids_extension: default_ids_extension(),
            output_extension: default_output_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_diagonal_band_range() -> usize {
    10
}

fn default_gap_penalty() -> i32 {
    -10
}

fn default_mismatch_penalty() -> i32 {
    // Just below a gap
    -11
}

fn default_min_match_ratio() -> f64 {
    0.7
}

fn default_subtitle_mark() -> char {
    '@'
}

fn default_gap_mark() -> char {
    '%'
}

fn default_repetition_min_length() -> usize {
    8
}

fn default_starting_operation_id() -> u64 {
    1
}

fn default_min_similarity_ratio() -> f64 {
    0.66
}

fn default_base_min_overlap() -> usize {
    3
}

fn default_repetition_penalty() -> usize {
    6
}

fn default_max_overlap_window() -> usize {
    200
}

fn default_concurrent_files() -> usize {
    4
}

fn default_transcript_extension() -> String {
    "at".to_string()
}

fn default_ids_extension() -> String {
    "ids.json".to_string()
}

fn default_output_extension() -> String {
    "operations.json".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let alignment = &self.alignment;
        if alignment.diagonal_band_range == 0 {
            return Err(anyhow!("diagonal_band_range must be at least 1"));
        }
        if alignment.gap_penalty >= 0 {
            return Err(anyhow!("gap_penalty must be negative, got {}", alignment.gap_penalty));
        }
        if alignment.mismatch_penalty >= 0 {
            return Err(anyhow!(
                "mismatch_penalty must be negative, got {}",
                alignment.mismatch_penalty
            ));
        }
        if !(0.0..=1.0).contains(&alignment.min_match_ratio) {
            return Err(anyhow!(
                "min_match_ratio must be between 0.0 and 1.0, got {}",
                alignment.min_match_ratio
            ));
        }

        let extraction = &self.extraction;
        if extraction.subtitle_mark == extraction.gap_mark {
            return Err(anyhow!(
                "subtitle_mark and gap_mark must differ, both are {:?}",
                extraction.subtitle_mark
            ));
        }
        if extraction.starting_operation_id == 0 {
            return Err(anyhow!("starting_operation_id must be at least 1"));
        }

        if !(0.0..=1.0).contains(&self.overlap.min_similarity_ratio) {
            return Err(anyhow!(
                "min_similarity_ratio must be between 0.0 and 1.0, got {}",
                self.overlap.min_similarity_ratio
            ));
        }

        if self.batch.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            alignment: AlignmentConfig::default(),
            extraction: ExtractionConfig::default(),
            overlap: OverlapConfig::default(),
            batch: BatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

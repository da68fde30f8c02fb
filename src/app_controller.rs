use anyhow::{Result, Context, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::pipeline::{OperationsReport, SubtitleOperationsPipeline};

// @module: Application controller for operation extraction

/// Input and output files of one transcript
#[derive(Debug, Clone, PartialEq)]
pub struct FileJob {
    // @field: Old version of the transcript
    pub from_file: PathBuf,
    // @field: Persistent ids of the old version
    pub ids_file: PathBuf,
    // @field: New version of the transcript
    pub to_file: PathBuf,
    // @field: Where the operations report goes
    pub output_file: PathBuf,
}

/// Outcome counts of a folder run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    // @field: Failed transcripts with their error message
    pub failed: Vec<(PathBuf, String)>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute the operations report for one transcript pair
    pub fn compute_files(&self, from_file: &Path, ids_file: &Path, to_file: &Path) -> Result<OperationsReport> {
        compute_job_files(&SubtitleOperationsPipeline::new(self.config.clone()), from_file, ids_file, to_file)
    }

    /// Compute one transcript pair and write the report, to stdout without output path
    pub fn run(&self, from_file: &Path, ids_file: &Path, to_file: &Path, output: Option<&Path>) -> Result<OperationsReport> {
        let start_time = Instant::now();
        let report = self.compute_files(from_file, ids_file, to_file)?;

        match output {
            Some(path) => {
                Self::write_report(&report, path)?;
                info!("Wrote {} operations to {:?} in {}", report.operations.len(), path, Self::format_duration(start_time.elapsed()));
            }
            None => {
                let json = serde_json::to_string_pretty(&report).context("Failed to serialize operations report")?;
                println!("{}", json);
            }
        }

        Ok(report)
    }

    /// Serialize a report as pretty JSON into a file
    pub fn write_report(report: &OperationsReport, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize operations report")?;
        FileManager::write_to_file(path, &json)
    }

    /// Pair transcripts of the old version with their ids and new version by relative path
    pub fn collect_jobs(&self, from_dir: &Path, to_dir: &Path, ids_dir: &Path) -> Result<Vec<FileJob>> {
        let batch = &self.config.batch;
        let from_files = FileManager::find_files(from_dir, &batch.transcript_extension)?;

        from_files
            .into_iter()
            .map(|from_file| {
                let relative = from_file
                    .strip_prefix(from_dir)
                    .with_context(|| format!("File {:?} is outside of {:?}", from_file, from_dir))?
                    .to_path_buf();
                let to_file = to_dir.join(&relative);
                Ok(FileJob {
                    ids_file: FileManager::with_extension(ids_dir.join(&relative), &batch.ids_extension),
                    output_file: FileManager::with_extension(&to_file, &batch.output_extension),
                    from_file,
                    to_file,
                })
            })
            .collect()
    }

    /// Process all transcripts of a folder concurrently.
    ///
    /// A failing file is reported and counted, it does not stop the batch.
    pub async fn run_folder(&self, from_dir: &Path, to_dir: &Path, ids_dir: &Path, force_overwrite: bool) -> Result<BatchSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(from_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", from_dir));
        }

        let jobs = self.collect_jobs(from_dir, to_dir, ids_dir)?;
        if jobs.is_empty() {
            return Err(anyhow!(
                "No .{} files found in directory: {:?}",
                self.config.batch.transcript_extension,
                from_dir
            ));
        }

        let mut summary = BatchSummary::default();
        let (pending, existing): (Vec<FileJob>, Vec<FileJob>) = jobs
            .into_iter()
            .partition(|job| force_overwrite || !FileManager::file_exists(&job.output_file));
        for job in &existing {
            warn!("Skipping {:?}, report already exists (use -f to force overwrite)", job.from_file);
        }
        summary.skipped = existing.len();

        let progress_bar = ProgressBar::new(pending.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Computing operations");

        let pipeline = SubtitleOperationsPipeline::new(self.config.clone());
        let results = stream::iter(pending)
            .map(|job| {
                let pipeline = pipeline.clone();
                async move {
                    let from_file = job.from_file.clone();
                    let result = tokio::task::spawn_blocking(move || process_job(&pipeline, &job))
                        .await
                        .map_err(|e| anyhow!("Worker task failed: {}", e))
                        .and_then(|result| result);
                    (from_file, result)
                }
            })
            .buffer_unordered(self.config.batch.concurrent_files)
            .inspect(|_| progress_bar.inc(1))
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_with_message("Folder processing complete");

        for (from_file, result) in results {
            match result {
                Ok(report) => {
                    debug!("{:?}: {} operations", from_file, report.operations.len());
                    summary.processed += 1;
                }
                Err(e) => {
                    error!("Error processing file {:?}: {:#}", from_file, e);
                    summary.failed.push((from_file, format!("{:#}", e)));
                }
            }
        }
        summary.failed.sort();

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.skipped,
            summary.failed.len()
        );

        Ok(summary)
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

fn compute_job_files(pipeline: &SubtitleOperationsPipeline, from_file: &Path, ids_file: &Path, to_file: &Path) -> Result<OperationsReport> {
    let from_text = FileManager::read_to_string(from_file)?;
    let identities = FileManager::load_identities(ids_file)?;
    let to_text = FileManager::read_to_string(to_file)?;

    let report = pipeline
        .compute(&from_text, &identities, &to_text)
        .with_context(|| format!("Failed to compute operations for {:?}", from_file))?;
    if report.diagnostics.band_edge_hits > 0 {
        warn!("{:?}: alignment touched the band edge, results may be degraded", from_file);
    }
    Ok(report)
}

fn process_job(pipeline: &SubtitleOperationsPipeline, job: &FileJob) -> Result<OperationsReport> {
    let report = compute_job_files(pipeline, &job.from_file, &job.ids_file, &job.to_file)?;
    Controller::write_report(&report, &job.output_file)?;
    Ok(report)
}

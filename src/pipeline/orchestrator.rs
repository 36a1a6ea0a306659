use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::aggregator::Aggregator;
use crate::models::{FileLocation, FileState};
use crate::pipeline::{discover, relocate, FileReport, PipelineError, RunSummary};
use crate::processor::FileProcessor;
use crate::report::ReportWriter;

/// Filesystem locations used by one run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub input: PathBuf,
    pub processed_dir: PathBuf,
    pub error_dir: PathBuf,
    pub report_dir: PathBuf,
    pub extension: String
}

impl PipelineSettings {
    pub fn new(input: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>, error_dir: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            processed_dir: processed_dir.into(),
            error_dir: error_dir.into(),
            report_dir: report_dir.into(),
            extension: "csv".to_string()
        }
    }

    fn directory_for(&self, state: FileState) -> Option<&Path> {
        match state {
            FileState::Processed => Some(self.processed_dir.as_path()),
            FileState::Errored => Some(self.error_dir.as_path()),
            FileState::Pending => None
        }
    }
}

/// Drives discovery, per-file processing, relocation and reporting.
pub struct Pipeline {
    settings: PipelineSettings,
    processor: FileProcessor,
    reports: ReportWriter
}

impl Pipeline {
    pub fn new(settings: PipelineSettings, processor: FileProcessor, reports: ReportWriter) -> Self {
        Self {
            settings,
            processor,
            reports
        }
    }

    /// Runs the pipeline once over the files currently in the input location.
    ///
    /// Per-file problems never abort the run. Only an empty or unlistable input
    /// location ends it early, in which case no reports are written.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let files = discover(&self.settings.input, &self.settings.extension)?;

        if files.is_empty() {
            return Err(PipelineError::no_input_files(&self.settings.input));
        }

        info!("Processing {} file(s)...", files.len());

        let mut aggregator = Aggregator::new();
        let reports: Vec<FileReport> = files.into_iter()
            .map(|path| self.visit(path, &mut aggregator))
            .collect();

        let snapshot = aggregator.snapshot();

        if snapshot.is_empty() {
            warn!("No records were committed, reports will be empty");
        }

        let artifacts = self.reports.write(&snapshot, &self.settings.report_dir);

        let summary = RunSummary {
            files: reports,
            snapshot,
            artifacts
        };

        info!(
            "Run finished: {} records committed, {} rows rejected, {} processed, {} errored, {} left pending, {} report failures",
            summary.committed_records(),
            summary.rejected_rows(),
            summary.processed(),
            summary.errored(),
            summary.pending(),
            summary.failed_artifacts()
        );

        Ok(summary)
    }

    fn visit(&self, path: PathBuf, aggregator: &mut Aggregator) -> FileReport {
        let mut location = FileLocation::pending(path);
        let name = location.file_name();
        let outcome = self.processor.process(&location.path, aggregator);

        let Some(target) = location.state.next(&outcome) else {
            return FileReport { location, outcome, relocation_error: None };
        };

        let Some(directory) = self.settings.directory_for(target) else {
            return FileReport { location, outcome, relocation_error: None };
        };

        match relocate(&location.path, directory) {
            Ok(destination) => {
                if outcome.is_success() {
                    info!("File [{name}] moved to processed");
                } else {
                    warn!("File [{name}] moved to errors: {outcome}");
                }

                if !location.settle(target, &destination) {
                    error!("File [{name}] moved to {} but its state could not leave {:?}", destination.display(), location.state);
                }

                FileReport { location, outcome, relocation_error: None }
            }
            Err(relocation_error) => {
                error!("Relocation failed for [{name}], file left pending and will be picked up again next run: {relocation_error}");

                FileReport {
                    location,
                    outcome,
                    relocation_error: Some(relocation_error)
                }
            }
        }
    }
}

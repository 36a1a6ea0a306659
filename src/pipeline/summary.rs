use crate::aggregator::Snapshot;
use crate::models::{FileLocation, FileOutcome, FileState};
use crate::pipeline::RelocationError;
use crate::report::ArtifactResult;

/// What happened to a single input file during a run.
#[derive(Debug)]
pub struct FileReport {
    pub location: FileLocation,
    pub outcome: FileOutcome,
    /// Set when the file could not be moved and was left pending.
    pub relocation_error: Option<RelocationError>
}

#[derive(Debug)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub snapshot: Snapshot,
    pub artifacts: Vec<ArtifactResult>
}

impl RunSummary {
    fn count(&self, state: FileState) -> usize {
        self.files.iter().filter(|report| report.location.state == state).count()
    }

    pub fn processed(&self) -> usize {
        self.count(FileState::Processed)
    }

    pub fn errored(&self) -> usize {
        self.count(FileState::Errored)
    }

    pub fn pending(&self) -> usize {
        self.count(FileState::Pending)
    }

    pub fn committed_records(&self) -> usize {
        self.files.iter().map(|report| report.outcome.committed()).sum()
    }

    pub fn rejected_rows(&self) -> usize {
        self.files.iter().map(|report| report.outcome.row_errors()).sum()
    }

    pub fn relocation_failures(&self) -> usize {
        self.files.iter().filter(|report| report.relocation_error.is_some()).count()
    }

    pub fn failed_artifacts(&self) -> usize {
        self.artifacts.iter().filter(|artifact| artifact.result.is_err()).count()
    }
}

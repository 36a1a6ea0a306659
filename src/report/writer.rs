use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::aggregator::Snapshot;
use crate::report::{ConsoleSummary, PeriodReport, ProductReport, ReportError, SummaryReport};

/// One output artifact rendered from a snapshot.
pub trait ReportSink {
    fn name(&self) -> &'static str;

    /// Writes the artifact. Returns the file written, if the sink produces one.
    fn emit(&self, snapshot: &Snapshot, destination: &Path) -> Result<Option<PathBuf>, ReportError>;
}

#[derive(Debug)]
pub struct ArtifactResult {
    pub artifact: &'static str,
    pub result: Result<Option<PathBuf>, ReportError>
}

/// Renders a snapshot through every configured sink.
///
/// Sinks are attempted in order and independently, a failing artifact never
/// prevents the remaining ones from being written.
pub struct ReportWriter {
    sinks: Vec<Box<dyn ReportSink>>
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::standard(ConsoleSummary::DEFAULT_TOP)
    }
}

impl ReportWriter {
    pub fn new(sinks: Vec<Box<dyn ReportSink>>) -> Self {
        Self { sinks }
    }

    /// Product, period and summary CSV files plus the console table.
    pub fn standard(top: usize) -> Self {
        Self::new(vec![
            Box::new(ProductReport),
            Box::new(PeriodReport),
            Box::new(SummaryReport),
            Box::new(ConsoleSummary::new(top)),
        ])
    }

    pub fn artifacts(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|sink| sink.name()).collect()
    }

    pub fn write(&self, snapshot: &Snapshot, destination: &Path) -> Vec<ArtifactResult> {
        self.sinks.iter().map(|sink| {
            let result = sink.emit(snapshot, destination);

            match &result {
                Ok(Some(path)) => info!("Report [{}] written to [{}]", sink.name(), path.display()),
                Ok(None) => info!("Report [{}] emitted", sink.name()),
                Err(report_error) => error!("{report_error}")
            }

            ArtifactResult {
                artifact: sink.name(),
                result
            }
        }).collect()
    }
}

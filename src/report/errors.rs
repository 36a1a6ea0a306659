use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report [{artifact}] could not be written to [{}]: {source}", .path.display())]
    Csv {
        artifact: &'static str,
        path: PathBuf,
        source: csv::Error
    },
    #[error("Report [{artifact}] could not be written: {source}")]
    Io {
        artifact: &'static str,
        source: std::io::Error
    }
}

impl ReportError {
    pub fn csv(artifact: &'static str, path: PathBuf, source: csv::Error) -> Self {
        Self::Csv { artifact, path, source }
    }

    pub fn io(artifact: &'static str, source: std::io::Error) -> Self {
        Self::Io { artifact, source }
    }
}

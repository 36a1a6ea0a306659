use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No CSV files found at {}", .path.display())]
    NoInputFiles {
        path: PathBuf
    },
    #[error("Could not list input files at {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        source: std::io::Error
    }
}

impl PipelineError {
    pub fn no_input_files(path: &std::path::Path) -> Self {
        Self::NoInputFiles { path: path.to_path_buf() }
    }

    pub fn discovery(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Discovery { path: path.to_path_buf(), source }
    }
}

/// A file could not be moved to its terminal location and stays pending.
#[derive(Debug, Error)]
#[error("Could not move [{}] to [{}]: {source}", .source_path.display(), .destination.display())]
pub struct RelocationError {
    pub source_path: PathBuf,
    pub destination: PathBuf,
    pub source: std::io::Error
}

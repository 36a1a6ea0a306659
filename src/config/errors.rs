use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value [{value}] for [{field}]: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str
    },
    #[error("Could not create directory [{}]: {source}", .path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error
    }
}

impl ConfigError {
    pub fn invalid(field: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            reason
        }
    }

    pub fn directory(path: &Path, source: std::io::Error) -> Self {
        Self::Directory {
            path: path.to_path_buf(),
            source
        }
    }
}

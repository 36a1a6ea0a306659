use thiserror::Error;

/// Reasons a file cannot be read as a whole.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open file: {0}")]
    Open(#[from] std::io::Error),
    #[error("cannot read header: {0}")]
    Header(csv::Error),
    #[error("read failed at line {line}: {source}")]
    Read {
        line: u64,
        source: csv::Error
    }
}

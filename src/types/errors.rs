use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MonetaryError {
    #[error("Monetary error: {0}")]
    InvalidFormat(String),
    #[error("Monetary error: value [{0}] is negative")]
    Negative(String),
    #[error("Monetary error: Overflow")]
    Overflow
}

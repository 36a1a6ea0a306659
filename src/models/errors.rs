use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RowErrorKind {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("invalid price")]
    InvalidPrice,
    #[error("invalid date")]
    InvalidDate,
    #[error("malformed row: {0}")]
    Malformed(String)
}

/// A data row that could not be turned into a sales record.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Row at line [{line}] rejected: {kind} | raw: [{raw}]")]
pub struct RowError {
    /// 1-based line number of the row inside its file.
    pub line: u64,
    pub raw: String,
    pub kind: RowErrorKind
}

impl RowError {
    pub fn missing_field(line: u64, raw: &str, field: &'static str) -> Self {
        Self::new(line, raw, RowErrorKind::MissingField(field))
    }

    pub fn invalid_quantity(line: u64, raw: &str) -> Self {
        Self::new(line, raw, RowErrorKind::InvalidQuantity)
    }

    pub fn invalid_price(line: u64, raw: &str) -> Self {
        Self::new(line, raw, RowErrorKind::InvalidPrice)
    }

    pub fn invalid_date(line: u64, raw: &str) -> Self {
        Self::new(line, raw, RowErrorKind::InvalidDate)
    }

    pub fn malformed(line: u64, raw: &str, detail: impl Into<String>) -> Self {
        Self::new(line, raw, RowErrorKind::Malformed(detail.into()))
    }

    fn new(line: u64, raw: &str, kind: RowErrorKind) -> Self {
        Self {
            line,
            raw: raw.to_string(),
            kind
        }
    }
}

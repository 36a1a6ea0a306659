mod errors;
mod location;
mod outcome;
mod record;

pub use errors::{RowError, RowErrorKind};
pub use location::{FileLocation, FileState};
pub use outcome::{FailureReason, FileOutcome};
pub use record::SalesRecord;

/// Result of parsing a single data row.
pub type ParseOutcome = Result<SalesRecord, RowError>;

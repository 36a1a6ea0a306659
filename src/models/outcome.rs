use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FailureReason {
    #[error("unreadable: {0}")]
    Unreadable(String),
    #[error("no valid rows")]
    NoValidRows,
    #[error("rejected by aggregate: {0}")]
    Overflow(String)
}

/// Terminal classification of one input file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FileOutcome {
    Success {
        committed: usize,
        row_errors: usize
    },
    Failure {
        reason: FailureReason,
        row_errors: usize
    }
}

impl FileOutcome {
    pub fn unreadable(detail: impl Into<String>) -> Self {
        Self::Failure {
            reason: FailureReason::Unreadable(detail.into()),
            row_errors: 0
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn committed(&self) -> usize {
        match self {
            Self::Success { committed, .. } => *committed,
            Self::Failure { .. } => 0
        }
    }

    pub fn row_errors(&self) -> usize {
        match self {
            Self::Success { row_errors, .. } | Self::Failure { row_errors, .. } => *row_errors
        }
    }
}

impl Display for FileOutcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { committed, row_errors } => write!(formatter, "success, {committed} records committed, {row_errors} rows rejected"),
            Self::Failure { reason, row_errors } => write!(formatter, "failure, {reason}, {row_errors} rows rejected")
        }
    }
}

use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AggregateError {
    #[error("Aggregate error: {measure} total would overflow")]
    Overflow {
        measure: &'static str
    }
}

impl AggregateError {
    pub fn overflow(measure: &'static str) -> Self {
        Self::Overflow { measure }
    }
}

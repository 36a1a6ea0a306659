mod errors;
mod sales_aggregator;
mod snapshot;

pub use errors::AggregateError;
pub use sales_aggregator::Aggregator;
pub use snapshot::{Snapshot, Totals};

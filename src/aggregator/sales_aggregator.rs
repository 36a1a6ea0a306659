use tracing::debug;

use crate::aggregator::{AggregateError, Snapshot};
use crate::models::SalesRecord;

/// Accumulates sales records into product, period and grand totals.
///
/// Owned by a single run. Buckets are created on first use and never removed.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Snapshot
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record to its product, period and grand totals.
    ///
    /// Nothing is updated unless all three buckets accept the record.
    pub fn add(&mut self, record: &SalesRecord) -> Result<(), AggregateError> {
        let quantity = record.quantity();
        let revenue = record.line_total();

        let product = self.state.products.get(record.product())
            .cloned()
            .unwrap_or_default()
            .plus(quantity, revenue)?;
        let period = self.state.periods.get(&record.period())
            .cloned()
            .unwrap_or_default()
            .plus(quantity, revenue)?;
        let grand_total = self.state.grand_total.plus(quantity, revenue)?;

        self.state.products.insert(record.product().to_string(), product);
        self.state.periods.insert(record.period(), period);
        self.state.grand_total = grand_total;

        Ok(())
    }

    /// Adds a whole file's records in order and counts the file as committed.
    ///
    /// The batch is checked against the grand total first, so an overflowing
    /// file leaves the aggregate untouched.
    pub fn commit(&mut self, records: Vec<SalesRecord>) -> Result<usize, AggregateError> {
        let count = records.len();

        //NOTE: every bucket is bounded by the grand total, so a batch that fits there fits everywhere
        records.iter().try_fold(self.state.grand_total.clone(), |projected, record| {
            projected.plus(record.quantity(), record.line_total())
        })?;

        for record in &records {
            self.add(record)?;
        }

        self.state.files += 1;
        debug!("Committed {count} records, aggregate now holds {} transactions", self.state.grand_total.transactions);

        Ok(count)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }
}

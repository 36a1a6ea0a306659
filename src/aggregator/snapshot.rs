use std::collections::HashMap;

use crate::aggregator::AggregateError;
use crate::types::{Money, Period, ProductId, Quantity};

/// Running measures kept for a product, a period or the whole run.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Totals {
    pub quantity: Quantity,
    pub revenue: Money,
    pub transactions: u64
}

impl Totals {
    /// Totals after one more sale, or an error if any measure would overflow.
    pub fn plus(&self, quantity: Quantity, revenue: Money) -> Result<Totals, AggregateError> {
        Ok(Totals {
            quantity: self.quantity.checked_add(quantity).ok_or_else(|| AggregateError::overflow("quantity"))?,
            revenue: self.revenue.checked_add(revenue).ok_or_else(|| AggregateError::overflow("revenue"))?,
            transactions: self.transactions.checked_add(1).ok_or_else(|| AggregateError::overflow("transactions"))?
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProductSummary<'a> {
    pub product: &'a str,
    pub totals: &'a Totals
}

/// Owned, read-only copy of the aggregate at a point in time.
///
/// Bucket maps carry no ordering; use [`Snapshot::products_by_revenue`] and
/// [`Snapshot::periods`] for deterministic output.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub products: HashMap<ProductId, Totals>,
    pub periods: HashMap<Period, Totals>,
    pub grand_total: Totals,
    pub files: usize
}

impl Snapshot {
    /// Products ordered by revenue descending, ties broken by product id ascending.
    pub fn products_by_revenue(&self) -> Vec<ProductSummary<'_>> {
        let mut products: Vec<ProductSummary<'_>> = self.products.iter()
            .map(|(product, totals)| ProductSummary { product, totals })
            .collect();

        products.sort_by(|left, right| {
            right.totals.revenue.cmp(&left.totals.revenue)
                .then_with(|| left.product.cmp(right.product))
        });

        products
    }

    pub fn top_products(&self, count: usize) -> Vec<ProductSummary<'_>> {
        let mut products = self.products_by_revenue();
        products.truncate(count);
        products
    }

    /// Periods in chronological order.
    pub fn periods(&self) -> Vec<(Period, &Totals)> {
        let mut periods: Vec<(Period, &Totals)> = self.periods.iter()
            .map(|(period, totals)| (*period, totals))
            .collect();

        periods.sort_by_key(|(period, _)| *period);

        periods
    }

    pub fn is_empty(&self) -> bool {
        self.grand_total.transactions == 0
    }
}

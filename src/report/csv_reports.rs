use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::Serialize;

use crate::aggregator::{Snapshot, Totals};
use crate::report::{ReportError, ReportSink};
use crate::types::{serialize_money, Money, Quantity};

#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    product: &'a str,
    quantity: Quantity,
    #[serde(serialize_with = "serialize_money")]
    revenue: Money,
    transactions: u64
}

#[derive(Debug, Serialize)]
struct PeriodRow {
    period: String,
    quantity: Quantity,
    #[serde(serialize_with = "serialize_money")]
    revenue: Money,
    transactions: u64
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    files: usize,
    products: usize,
    transactions: u64,
    quantity: Quantity,
    #[serde(serialize_with = "serialize_money")]
    revenue: Money
}

/// Per-product totals, highest revenue first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductReport;

/// Per-month totals in chronological order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodReport;

/// Single-row grand total.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReport;

impl ProductReport {
    pub const FILE_NAME: &'static str = "products.csv";
}

impl PeriodReport {
    pub const FILE_NAME: &'static str = "periods.csv";
}

impl SummaryReport {
    pub const FILE_NAME: &'static str = "summary.csv";
}

impl ReportSink for ProductReport {
    fn name(&self) -> &'static str {
        "products"
    }

    fn emit(&self, snapshot: &Snapshot, destination: &Path) -> Result<Option<PathBuf>, ReportError> {
        let rows = snapshot.products_by_revenue().into_iter().map(|summary| ProductRow {
            product: summary.product,
            quantity: summary.totals.quantity,
            revenue: summary.totals.revenue,
            transactions: summary.totals.transactions
        });

        write_rows(self.name(), destination.join(Self::FILE_NAME), &["product", "quantity", "revenue", "transactions"], rows)
    }
}

impl ReportSink for PeriodReport {
    fn name(&self) -> &'static str {
        "periods"
    }

    fn emit(&self, snapshot: &Snapshot, destination: &Path) -> Result<Option<PathBuf>, ReportError> {
        let rows = snapshot.periods().into_iter().map(|(period, totals)| PeriodRow {
            period: period.to_string(),
            quantity: totals.quantity,
            revenue: totals.revenue,
            transactions: totals.transactions
        });

        write_rows(self.name(), destination.join(Self::FILE_NAME), &["period", "quantity", "revenue", "transactions"], rows)
    }
}

impl ReportSink for SummaryReport {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn emit(&self, snapshot: &Snapshot, destination: &Path) -> Result<Option<PathBuf>, ReportError> {
        let Totals { quantity, revenue, transactions } = snapshot.grand_total.clone();
        let row = SummaryRow {
            files: snapshot.files,
            products: snapshot.products.len(),
            transactions,
            quantity,
            revenue
        };

        write_rows(self.name(), destination.join(Self::FILE_NAME), &["files", "products", "transactions", "quantity", "revenue"], [row])
    }
}

/// Writes the header explicitly so that empty reports are still valid tables.
fn write_rows<T: Serialize>(
    artifact: &'static str,
    path: PathBuf,
    header: &[&str],
    rows: impl IntoIterator<Item = T>
) -> Result<Option<PathBuf>, ReportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(|error| ReportError::csv(artifact, path.clone(), error))?;

    writer.write_record(header)
        .map_err(|error| ReportError::csv(artifact, path.clone(), error))?;

    for row in rows {
        writer.serialize(row)
            .map_err(|error| ReportError::csv(artifact, path.clone(), error))?;
    }

    writer.flush().map_err(|error| ReportError::io(artifact, error))?;

    Ok(Some(path))
}

use std::fmt::Write as _;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::aggregator::Snapshot;
use crate::report::{ReportError, ReportSink};
use crate::types::format_money;

/// Human-readable table of the best selling products and the grand total on stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSummary {
    top: usize
}

impl ConsoleSummary {
    pub const DEFAULT_TOP: usize = 10;

    pub fn new(top: usize) -> Self {
        Self { top }
    }

    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut output = String::new();
        let products = snapshot.top_products(self.top);
        let width = products.iter()
            .map(|summary| summary.product.chars().count())
            .max()
            .unwrap_or(0)
            .max("product".len());

        let _ = writeln!(output, "Top {} products by revenue", products.len());
        let _ = writeln!(output, "{:<width$}  {:>10}  {:>14}  {:>12}", "product", "quantity", "revenue", "transactions");

        for summary in &products {
            let _ = writeln!(
                output,
                "{:<width$}  {:>10}  {:>14}  {:>12}",
                summary.product,
                summary.totals.quantity,
                format_money(&summary.totals.revenue),
                summary.totals.transactions
            );
        }

        let total = &snapshot.grand_total;
        let _ = writeln!(
            output,
            "Total: {} files, {} products, {} transactions, {} units, revenue {}",
            snapshot.files,
            snapshot.products.len(),
            total.transactions,
            total.quantity,
            format_money(&total.revenue)
        );

        output
    }
}

impl Default for ConsoleSummary {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOP)
    }
}

impl ReportSink for ConsoleSummary {
    fn name(&self) -> &'static str {
        "console"
    }

    fn emit(&self, snapshot: &Snapshot, _destination: &Path) -> Result<Option<PathBuf>, ReportError> {
        let mut output = BufWriter::new(stdout().lock());

        output.write_all(self.render(snapshot).as_bytes())
            .and_then(|_| output.flush())
            .map_err(|error| ReportError::io(self.name(), error))?;

        Ok(None)
    }
}

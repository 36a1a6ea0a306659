mod console;
mod csv_reports;
mod errors;
mod writer;

pub use console::ConsoleSummary;
pub use csv_reports::{PeriodReport, ProductReport, SummaryReport};
pub use errors::ReportError;
pub use writer::{ArtifactResult, ReportSink, ReportWriter};

mod errors;
#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::parser::RecordParser;
use crate::pipeline::PipelineSettings;
use crate::report::ReportWriter;

pub use errors::ConfigError;

#[derive(Debug, Clone, Parser)]
#[command(name = "sales-data-processor")]
#[command(about = "Aggregates CSV sales files into summary reports and files them by outcome")]
pub struct Config {
    /// CSV file or directory containing CSV files
    pub input: PathBuf,

    /// Output reports directory
    #[arg(long, short = 'o', default_value = "reports")]
    pub out: PathBuf,

    /// Where successfully processed files are moved
    #[arg(long, default_value = "processed")]
    pub processed_dir: PathBuf,

    /// Where files that could not be processed are moved
    #[arg(long, default_value = "errors")]
    pub error_dir: PathBuf,

    /// Structured (JSON lines) log of the run
    #[arg(long, default_value = "logs/run.log")]
    pub log_file: PathBuf,

    /// Accepted date format (chrono syntax), may be repeated; replaces the defaults
    #[arg(long = "date-format")]
    pub date_formats: Vec<String>,

    /// Number of products listed in the console summary
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in self.locations() {
            validate_path(field, path)?;
        }

        validate_path("log_file", &self.log_file)?;

        if self.input == self.processed_dir || self.input == self.error_dir {
            return Err(ConfigError::invalid("input", &self.input.display().to_string(), "must differ from the processed and error locations"));
        }

        if self.processed_dir == self.error_dir {
            return Err(ConfigError::invalid("error_dir", &self.error_dir.display().to_string(), "must differ from the processed location"));
        }

        if let Some(format) = self.date_formats.iter().find(|format| format.trim().is_empty()) {
            return Err(ConfigError::invalid("date_format", format, "cannot be empty"));
        }

        if self.top == 0 {
            return Err(ConfigError::invalid("top", "0", "must be at least 1"));
        }

        Ok(())
    }

    /// Creates every output location the run writes into.
    pub fn prepare_directories(&self) -> Result<(), ConfigError> {
        let log_directory = self.log_file.parent().filter(|parent| !parent.as_os_str().is_empty());

        [self.processed_dir.as_path(), self.error_dir.as_path(), self.out.as_path()]
            .into_iter()
            .chain(log_directory)
            .try_for_each(|directory| fs::create_dir_all(directory).map_err(|error| ConfigError::directory(directory, error)))
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO }
    }

    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings::new(&self.input, &self.processed_dir, &self.error_dir, &self.out)
    }

    pub fn record_parser(&self) -> RecordParser {
        if self.date_formats.is_empty() {
            RecordParser::default()
        } else {
            RecordParser::new(self.date_formats.clone())
        }
    }

    pub fn report_writer(&self) -> ReportWriter {
        ReportWriter::standard(self.top)
    }

    fn locations(&self) -> [(&'static str, &Path); 4] {
        [
            ("input", self.input.as_path()),
            ("out", self.out.as_path()),
            ("processed_dir", self.processed_dir.as_path()),
            ("error_dir", self.error_dir.as_path()),
        ]
    }
}

fn validate_path(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::invalid(field, "", "path cannot be empty"));
    }

    Ok(())
}

mod aggregator;
mod config;
mod models;
mod parser;
mod pipeline;
mod processor;
mod report;
mod types;

use std::fs::{File, OpenOptions};
use std::io::stderr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::Config;
use crate::pipeline::{Pipeline, PipelineError};
use crate::processor::FileProcessor;

fn main() -> Result<ExitCode> {
    let config = Config::parse();

    config.validate()?;
    config.prepare_directories()?;

    let log_file = open_log_file(&config.log_file)?;
    setup_logging(config.log_level(), log_file);

    debug!("Configuration: {config:?}");

    let parser = config.record_parser();
    let reports = config.report_writer();

    debug!("Accepted date formats: {:?}", parser.date_formats());
    debug!("Report artifacts: {}", reports.artifacts().join(", "));

    let pipeline = Pipeline::new(config.settings(), FileProcessor::new(parser), reports);

    let timer = Instant::now();
    let result = pipeline.run();
    let duration = timer.elapsed();

    match result {
        Ok(summary) => {
            info!("Processed {} file(s) in: {duration:?}", summary.files.len());

            if summary.relocation_failures() > 0 {
                warn!("{} file(s) could not be moved and remain in {}", summary.relocation_failures(), config.input.display());
            }

            info!("Done. Reports written to {}", config.out.display());

            Ok(ExitCode::SUCCESS)
        }
        Err(pipeline_error @ PipelineError::NoInputFiles { .. }) => {
            error!("{pipeline_error}");
            Ok(ExitCode::FAILURE)
        }
        Err(pipeline_error) => {
            error!("Run aborted: {pipeline_error}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file {}", path.display()))
}

fn setup_logging(level: LevelFilter, log_file: File) {
    //NOTE: stdout carries the console report, progress lines go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    let file_log = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(log_file))
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .with(file_log)
        .init();
}

use super::{Config, ConfigError};

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;

use crate::parser::DEFAULT_DATE_FORMATS;

#[test]
fn test_defaults_follow_conventional_layout() -> Result<()> {
    let config = Config::try_parse_from(["sales-data-processor", "incoming"])?;

    assert_eq!(config.input, PathBuf::from("incoming"));
    assert_eq!(config.out, PathBuf::from("reports"));
    assert_eq!(config.processed_dir, PathBuf::from("processed"));
    assert_eq!(config.error_dir, PathBuf::from("errors"));
    assert_eq!(config.log_file, PathBuf::from("logs/run.log"));
    assert_eq!(config.top, 10);
    assert_eq!(config.log_level(), LevelFilter::INFO);
    assert!(config.validate().is_ok());
    assert_eq!(config.record_parser().date_formats().len(), DEFAULT_DATE_FORMATS.len());

    Ok(())
}

#[test]
fn test_flags_override_defaults() -> Result<()> {
    let config = Config::try_parse_from([
        "sales-data-processor", "data.csv",
        "-o", "out", "--processed-dir", "done", "--error-dir", "failed",
        "--date-format", "%d.%m.%Y", "--date-format", "%m/%d/%Y",
        "--top", "3", "--verbose",
    ])?;

    assert_eq!(config.out, PathBuf::from("out"));
    assert_eq!(config.processed_dir, PathBuf::from("done"));
    assert_eq!(config.error_dir, PathBuf::from("failed"));
    assert_eq!(config.record_parser().date_formats(), ["%d.%m.%Y".to_string(), "%m/%d/%Y".to_string()]);
    assert_eq!(config.top, 3);
    assert_eq!(config.log_level(), LevelFilter::DEBUG);

    let settings = config.settings();

    assert_eq!(settings.input, PathBuf::from("data.csv"));
    assert_eq!(settings.report_dir, PathBuf::from("out"));
    assert_eq!(settings.extension, "csv");

    Ok(())
}

#[test]
fn test_missing_input_argument_is_rejected() {
    assert!(Config::try_parse_from(["sales-data-processor"]).is_err());
}

#[test]
fn test_validation_rejects_overlapping_locations() -> Result<()> {
    let same_input = Config::try_parse_from(["sales-data-processor", "data", "--processed-dir", "data"])?;
    let same_outputs = Config::try_parse_from(["sales-data-processor", "data", "--processed-dir", "x", "--error-dir", "x"])?;

    assert!(matches!(same_input.validate(), Err(ConfigError::InvalidValue { field: "input", .. })));
    assert!(matches!(same_outputs.validate(), Err(ConfigError::InvalidValue { field: "error_dir", .. })));

    Ok(())
}

#[test]
fn test_validation_rejects_bad_values() -> Result<()> {
    let zero_top = Config::try_parse_from(["sales-data-processor", "data", "--top", "0"])?;
    let blank_format = Config::try_parse_from(["sales-data-processor", "data", "--date-format", " "])?;
    let mut empty_out = Config::try_parse_from(["sales-data-processor", "data"])?;
    empty_out.out = PathBuf::new();

    assert!(matches!(zero_top.validate(), Err(ConfigError::InvalidValue { field: "top", .. })));
    assert!(matches!(blank_format.validate(), Err(ConfigError::InvalidValue { field: "date_format", .. })));
    assert!(matches!(empty_out.validate(), Err(ConfigError::InvalidValue { field: "out", .. })));

    Ok(())
}

#[test]
fn test_prepare_directories_creates_output_locations() -> Result<()> {
    let root = TempDir::new()?;
    let path = |name: &str| root.path().join(name).display().to_string();

    let config = Config::try_parse_from([
        "sales-data-processor".to_string(), path("incoming"),
        "--out".to_string(), path("reports"),
        "--processed-dir".to_string(), path("archive/processed"),
        "--error-dir".to_string(), path("archive/errors"),
        "--log-file".to_string(), path("logs/nested/run.log"),
    ])?;

    config.prepare_directories()?;

    assert!(root.path().join("reports").is_dir());
    assert!(root.path().join("archive/processed").is_dir());
    assert!(root.path().join("archive/errors").is_dir());
    assert!(root.path().join("logs/nested").is_dir());
    assert!(!root.path().join("incoming").exists());

    Ok(())
}

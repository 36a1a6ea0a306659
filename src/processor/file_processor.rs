use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ByteRecord, ErrorKind, ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::aggregator::Aggregator;
use crate::models::{FailureReason, FileOutcome, RowError, SalesRecord};
use crate::parser::{HeaderMap, RecordParser};
use crate::processor::ScanError;

/// Everything read from one file before the commit decision is made.
#[derive(Debug, Default)]
pub struct FileScan {
    pub records: Vec<SalesRecord>,
    pub row_errors: Vec<RowError>
}

/// Processes one CSV file at a time, committing only files with valid rows.
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    parser: RecordParser
}

impl FileProcessor {
    pub fn new(parser: RecordParser) -> Self {
        Self { parser }
    }

    /// Scans the file, classifies it and, on success, commits its records.
    ///
    /// Records are buffered for the whole file so that a failed file never
    /// leaves a partial contribution in the aggregate.
    pub fn process(&self, path: &Path, aggregator: &mut Aggregator) -> FileOutcome {
        let name = display_name(path);

        let scan = match self.scan(path) {
            Ok(scan) => scan,
            Err(error) => {
                warn!("File [{name}] is unreadable: {error}");
                return FileOutcome::unreadable(error.to_string());
            }
        };

        for error in &scan.row_errors {
            warn!("File [{name}] {error}");
        }

        let row_errors = scan.row_errors.len();

        if scan.records.is_empty() {
            warn!("File [{name}] has no valid rows ({row_errors} rejected)");
            return FileOutcome::Failure {
                reason: FailureReason::NoValidRows,
                row_errors
            };
        }

        let committed = match aggregator.commit(scan.records) {
            Ok(committed) => committed,
            Err(error) => {
                warn!("File [{name}] not committed: {error}");
                return FileOutcome::Failure {
                    reason: FailureReason::Overflow(error.to_string()),
                    row_errors
                };
            }
        };

        info!("File [{name}] committed {committed} records ({row_errors} rejected)");

        FileOutcome::Success {
            committed,
            row_errors
        }
    }

    /// Reads and parses every row without touching any aggregate.
    ///
    /// Fails only when the file as a whole cannot be read; bad rows are collected.
    pub fn scan(&self, path: &Path) -> Result<FileScan, ScanError> {
        let file = File::open(path)?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()
            .map_err(ScanError::Header)?;
        let header_map = HeaderMap::from_headers(headers);

        let missing = header_map.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|field| field.name()).collect();
            debug!("File [{}] header lacks columns: {}", display_name(path), names.join(", "));
        }

        let mut scan = FileScan::default();
        let mut raw_row = ByteRecord::new();
        let mut next_line = 2;

        loop {
            match reader.read_byte_record(&mut raw_row) {
                Ok(true) => {
                    let line = raw_row.position().map(|position| position.line()).unwrap_or(next_line);
                    next_line = line + 1;

                    let row = match StringRecord::from_byte_record(raw_row.clone()) {
                        Ok(row) => row,
                        Err(error) => {
                            scan.row_errors.push(RowError::malformed(line, &lossy(&raw_row), error.to_string()));
                            continue;
                        }
                    };

                    match self.parser.parse(line, &row, &header_map) {
                        Ok(record) => {
                            debug!("Line [{line}] parsed: {} x {} @ {} on {}", record.product(), record.quantity(), record.unit_price(), record.date());
                            scan.records.push(record);
                        }
                        Err(error) => scan.row_errors.push(error)
                    }
                }
                Ok(false) => break,
                Err(error) => {
                    let line = error.position().map(|position| position.line()).unwrap_or(next_line);
                    next_line = line + 1;

                    if matches!(error.kind(), ErrorKind::Io(_)) {
                        return Err(ScanError::Read { line, source: error });
                    }

                    scan.row_errors.push(RowError::malformed(line, &lossy(&raw_row), error.to_string()));
                }
            }
        }

        Ok(scan)
    }
}

fn lossy(row: &ByteRecord) -> String {
    row.iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

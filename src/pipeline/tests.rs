use super::relocation::move_by_copy;
use super::{discover, relocate, Pipeline, PipelineError, PipelineSettings};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::models::{FailureReason, FileOutcome, FileState};
use crate::processor::FileProcessor;
use crate::report::{PeriodReport, ProductReport, ReportWriter, SummaryReport};

struct Workspace {
    root: TempDir
}

impl Workspace {
    fn new() -> Result<Self> {
        let root = TempDir::new()?;

        for directory in ["incoming", "processed", "errors", "reports"] {
            fs::create_dir(root.path().join(directory))?;
        }

        Ok(Self { root })
    }

    fn dir(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    fn add_input(&self, name: &str, content: &[u8]) -> Result<()> {
        fs::write(self.dir("incoming").join(name), content)?;
        Ok(())
    }

    fn settings(&self) -> PipelineSettings {
        PipelineSettings::new(self.dir("incoming"), self.dir("processed"), self.dir("errors"), self.dir("reports"))
    }

    fn pipeline(&self, settings: PipelineSettings) -> Pipeline {
        let reports = ReportWriter::new(vec![Box::new(ProductReport), Box::new(PeriodReport), Box::new(SummaryReport)]);
        Pipeline::new(settings, FileProcessor::default(), reports)
    }
}

fn file_names(directory: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for entry in fs::read_dir(directory)? {
        names.insert(entry?.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}

const JAN: &[u8] = b"product,quantity,price,date\nWidget,3,9.99,2024-01-05\nGadget,-1,5.00,2024-01-06\n";
const FEB_CORRUPTED: &[u8] = &[0xff, 0xfe, 0x00, 0xc3, 0x28, b'\n', 0x80, 0x81, b'\n'];

#[test]
fn test_mixed_directory_routes_each_file_by_outcome() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("jan.csv", JAN)?;
    workspace.add_input("feb.csv", FEB_CORRUPTED)?;

    let summary = workspace.pipeline(workspace.settings()).run()?;

    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.files[0].location.file_name(), "feb.csv");
    assert!(matches!(summary.files[0].outcome, FileOutcome::Failure { reason: FailureReason::Unreadable(_), .. }));
    assert_eq!(summary.files[0].location.state, FileState::Errored);
    assert_eq!(summary.files[1].outcome, FileOutcome::Success { committed: 1, row_errors: 1 });
    assert_eq!(summary.files[1].location.state, FileState::Processed);

    assert!(file_names(&workspace.dir("incoming"))?.is_empty());
    assert_eq!(file_names(&workspace.dir("processed"))?, BTreeSet::from(["jan.csv".to_string()]));
    assert_eq!(file_names(&workspace.dir("errors"))?, BTreeSet::from(["feb.csv".to_string()]));

    let widget = summary.snapshot.products.get("Widget").ok_or_else(|| anyhow!("Widget bucket missing"))?;

    assert_eq!(widget.quantity, 3);
    assert_eq!(widget.revenue, Decimal::from_str("29.97")?);
    assert_eq!(summary.snapshot.grand_total.revenue, Decimal::from_str("29.97")?);
    assert_eq!(summary.snapshot.products.len(), 1);

    let products = fs::read_to_string(workspace.dir("reports").join(ProductReport::FILE_NAME))?;

    assert_eq!(products, "product,quantity,revenue,transactions\nWidget,3,29.97,1\n");

    Ok(())
}

#[test]
fn test_failed_files_never_reach_the_aggregate() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("a.csv", b"product,quantity,price,date\nWidget,2,1.00,2024-01-01\n")?;
    workspace.add_input("b.csv", b"product,quantity,price,date\nSprocket,x,1.00,2024-01-01\nSprocket,1,1.00,never\n")?;
    workspace.add_input("c.csv", b"product,quantity,price,date\n")?;

    let summary = workspace.pipeline(workspace.settings()).run()?;

    assert_eq!(summary.processed(), 1);
    assert_eq!(summary.errored(), 2);
    assert!(!summary.snapshot.products.contains_key("Sprocket"));
    assert_eq!(summary.snapshot.grand_total.transactions, 1);
    assert_eq!(summary.snapshot.files, 1);

    Ok(())
}

#[test]
fn test_every_discovered_file_lands_in_exactly_one_place() -> Result<()> {
    let workspace = Workspace::new()?;
    let mut expected = BTreeSet::new();

    for index in 0..6 {
        let name = format!("day{index}.csv");
        let content = if index % 2 == 0 {
            format!("product,quantity,price,date\nP{index},1,2.50,2024-03-0{}\n", index + 1)
        } else {
            "product,quantity,price,date\n".to_string()
        };

        workspace.add_input(&name, content.as_bytes())?;
        expected.insert(name);
    }

    let summary = workspace.pipeline(workspace.settings()).run()?;
    let processed = file_names(&workspace.dir("processed"))?;
    let errored = file_names(&workspace.dir("errors"))?;

    assert!(processed.is_disjoint(&errored));
    assert_eq!(processed.union(&errored).cloned().collect::<BTreeSet<_>>(), expected);
    assert!(file_names(&workspace.dir("incoming"))?.is_empty());
    assert_eq!(summary.pending(), 0);
    assert_eq!(summary.snapshot.grand_total.revenue, Decimal::from_str("7.50")?);

    Ok(())
}

#[test]
fn test_files_are_visited_in_lexicographic_order() -> Result<()> {
    let workspace = Workspace::new()?;

    for name in ["b.csv", "a.csv", "c.csv", "9.csv", "10.csv"] {
        workspace.add_input(name, b"product,quantity,price,date\nWidget,1,1.00,2024-01-01\n")?;
    }

    let summary = workspace.pipeline(workspace.settings()).run()?;
    let order: Vec<String> = summary.files.iter().map(|report| report.location.file_name()).collect();

    assert_eq!(order, vec!["10.csv", "9.csv", "a.csv", "b.csv", "c.csv"]);

    Ok(())
}

#[test]
fn test_empty_input_ends_run_without_reports() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("notes.txt", b"not a csv")?;

    let result = workspace.pipeline(workspace.settings()).run();

    assert!(matches!(result, Err(PipelineError::NoInputFiles { .. })));
    assert!(file_names(&workspace.dir("reports"))?.is_empty());
    assert!(workspace.dir("incoming").join("notes.txt").exists());

    Ok(())
}

#[test]
fn test_missing_input_location_is_a_discovery_error() -> Result<()> {
    let workspace = Workspace::new()?;
    let mut settings = workspace.settings();
    settings.input = workspace.dir("nowhere");

    assert!(matches!(workspace.pipeline(settings).run(), Err(PipelineError::Discovery { .. })));

    Ok(())
}

#[test]
fn test_reports_are_written_even_when_no_file_succeeds() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("empty.csv", b"product,quantity,price,date\n")?;

    let summary = workspace.pipeline(workspace.settings()).run()?;

    assert_eq!(summary.errored(), 1);
    assert_eq!(summary.artifacts.len(), 3);
    assert_eq!(summary.failed_artifacts(), 0);
    assert_eq!(
        fs::read_to_string(workspace.dir("reports").join(SummaryReport::FILE_NAME))?,
        "files,products,transactions,quantity,revenue\n0,0,0,0,0.00\n"
    );

    Ok(())
}

#[test]
fn test_failed_relocation_leaves_file_pending() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("bad.csv", b"product,quantity,price,date\n")?;
    workspace.add_input("good.csv", b"product,quantity,price,date\nWidget,1,1.00,2024-01-01\n")?;

    let mut settings = workspace.settings();
    settings.error_dir = workspace.dir("missing-errors");

    let summary = workspace.pipeline(settings).run()?;

    assert_eq!(summary.pending(), 1);
    assert_eq!(summary.relocation_failures(), 1);
    assert_eq!(summary.processed(), 1);
    assert_eq!(summary.files[0].location.state, FileState::Pending);
    assert!(summary.files[0].relocation_error.is_some());
    assert_eq!(file_names(&workspace.dir("incoming"))?, BTreeSet::from(["bad.csv".to_string()]));
    assert_eq!(file_names(&workspace.dir("processed"))?, BTreeSet::from(["good.csv".to_string()]));

    Ok(())
}

#[test]
fn test_single_file_input_is_processed() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("jan.csv", JAN)?;

    let mut settings = workspace.settings();
    settings.input = workspace.dir("incoming").join("jan.csv");

    let summary = workspace.pipeline(settings).run()?;

    assert_eq!(summary.processed(), 1);
    assert!(workspace.dir("processed").join("jan.csv").exists());

    Ok(())
}

#[test]
fn test_discover_ignores_subdirectories_and_other_extensions() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("b.CSV", b"")?;
    workspace.add_input("a.csv", b"")?;
    workspace.add_input("readme.md", b"")?;
    fs::create_dir(workspace.dir("incoming").join("nested.csv"))?;

    let found: Vec<String> = discover(&workspace.dir("incoming"), "csv")?
        .iter()
        .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .collect();

    assert_eq!(found, vec!["a.csv", "b.CSV"]);
    assert!(discover(&workspace.dir("incoming").join("readme.md"), "csv")?.is_empty());

    Ok(())
}

#[test]
fn test_relocate_never_overwrites_existing_files() -> Result<()> {
    let workspace = Workspace::new()?;
    fs::write(workspace.dir("processed").join("jan.csv"), b"earlier run")?;
    fs::write(workspace.dir("processed").join("jan-1.csv"), b"another earlier run")?;
    workspace.add_input("jan.csv", JAN)?;

    let destination = relocate(&workspace.dir("incoming").join("jan.csv"), &workspace.dir("processed"))?;

    assert_eq!(destination, workspace.dir("processed").join("jan-2.csv"));
    assert_eq!(fs::read(&destination)?, JAN);
    assert_eq!(fs::read(workspace.dir("processed").join("jan.csv"))?, b"earlier run");
    assert!(!workspace.dir("incoming").join("jan.csv").exists());

    Ok(())
}

#[test]
fn test_relocate_reports_missing_source() -> Result<()> {
    let workspace = Workspace::new()?;
    let result = relocate(&workspace.dir("incoming").join("ghost.csv"), &workspace.dir("processed"));

    assert!(result.is_err());
    assert!(file_names(&workspace.dir("processed"))?.is_empty());

    Ok(())
}

#[test]
fn test_failed_copy_leaves_no_partial_destination() -> Result<()> {
    let workspace = Workspace::new()?;
    let source = workspace.dir("incoming").join("feb.csv");
    let destination = workspace.dir("processed").join("feb.csv");
    fs::create_dir(&source)?;
    fs::write(&destination, b"product,quan")?;

    assert!(move_by_copy(&source, &destination).is_err());
    assert!(source.exists());
    assert!(!destination.exists());

    Ok(())
}

#[test]
fn test_copy_fallback_moves_the_file() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("jan.csv", JAN)?;
    let source = workspace.dir("incoming").join("jan.csv");
    let destination = workspace.dir("processed").join("jan.csv");

    move_by_copy(&source, &destination)?;

    assert!(!source.exists());
    assert_eq!(fs::read(&destination)?, JAN);

    Ok(())
}

#[test]
fn test_overflowing_file_is_errored_and_run_continues() -> Result<()> {
    let workspace = Workspace::new()?;
    workspace.add_input("a.csv", b"product,quantity,price,date\nWidget,1,5.00,2024-01-05\n")?;
    workspace.add_input(
        "b.csv",
        b"product,quantity,price,date\nBig,1,40000000000000000000000000000,2024-01-06\nBig,1,40000000000000000000000000000,2024-01-07\n"
    )?;
    workspace.add_input("c.csv", b"product,quantity,price,date\nGadget,2,1.50,2024-02-01\n")?;

    let summary = workspace.pipeline(workspace.settings()).run()?;

    assert_eq!(summary.processed(), 2);
    assert_eq!(summary.errored(), 1);
    assert!(matches!(summary.files[1].outcome, FileOutcome::Failure { reason: FailureReason::Overflow(_), .. }));
    assert_eq!(summary.snapshot.grand_total.revenue, Decimal::from_str("8.00")?);
    assert_eq!(file_names(&workspace.dir("errors"))?, BTreeSet::from(["b.csv".to_string()]));

    let products = fs::read_to_string(workspace.dir("reports").join("products.csv"))?;

    assert_eq!(products, "product,quantity,revenue,transactions\nWidget,1,5.00,1\nGadget,2,3.00,1\n");

    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::pipeline::PipelineError;

/// Lists candidate input files in lexicographic file-name order.
///
/// A file path is its own single candidate when the extension matches. A
/// directory is scanned without recursing; subdirectories and files with other
/// extensions are ignored.
pub fn discover(input: &Path, extension: &str) -> Result<Vec<PathBuf>, PipelineError> {
    if input.is_file() {
        return Ok(if has_extension(input, extension) { vec![input.to_path_buf()] } else { Vec::new() });
    }

    let entries = fs::read_dir(input).map_err(|error| PipelineError::discovery(input, error))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|error| PipelineError::discovery(input, error))?;
        let path = entry.path();

        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        } else {
            debug!("Skipping [{}]", path.display());
        }
    }

    files.sort_by(|left, right| left.file_name().cmp(&right.file_name()));

    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|value| value.to_str())
        .is_some_and(|value| value.eq_ignore_ascii_case(extension))
}

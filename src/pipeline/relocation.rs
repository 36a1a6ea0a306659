use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::pipeline::RelocationError;

/// Moves a file into `directory`, returning its new path.
///
/// Existing files are never overwritten: a numeric suffix is added to the stem
/// (`jan-1.csv`, `jan-2.csv`, ...) until the name is free. When a plain rename
/// is not possible (for example across filesystems) the file is copied and the
/// source removed; if either step fails the copy is deleted again so the file
/// is never left in two places.
pub fn relocate(path: &Path, directory: &Path) -> Result<PathBuf, RelocationError> {
    let destination = free_destination(path, directory);
    let failure = |source: io::Error| RelocationError {
        source_path: path.to_path_buf(),
        destination: destination.clone(),
        source
    };

    if !directory.is_dir() {
        return Err(failure(io::Error::new(io::ErrorKind::NotFound, "destination directory does not exist")));
    }

    match fs::rename(path, &destination) {
        Ok(()) => return Ok(destination),
        Err(error) if !path.exists() => return Err(failure(error)),
        Err(error) => debug!("Rename of [{}] failed ({error}), falling back to copy", path.display())
    }

    move_by_copy(path, &destination).map_err(failure)?;

    Ok(destination)
}

/// Copies `path` to `destination` and removes the source.
///
/// `destination` must be a name reserved for this move: whenever the move
/// fails, whatever was written there is removed again.
pub fn move_by_copy(path: &Path, destination: &Path) -> io::Result<()> {
    let result = fs::copy(path, destination).and_then(|_| fs::remove_file(path));

    if result.is_err() && destination.exists() {
        if let Err(cleanup) = fs::remove_file(destination) {
            warn!("Could not remove partial copy [{}]: {cleanup}", destination.display());
        }
    }

    result
}

fn free_destination(path: &Path, directory: &Path) -> PathBuf {
    let file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    let candidate = directory.join(&file_name);

    if !candidate.exists() {
        return candidate;
    }

    let stem = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
    let extension = path.extension().map(|extension| extension.to_string_lossy().into_owned());

    (1..)
        .map(|counter| {
            let name = match &extension {
                Some(extension) => format!("{stem}-{counter}.{extension}"),
                None => format!("{stem}-{counter}")
            };
            directory.join(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(candidate)
}

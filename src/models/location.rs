use std::path::{Path, PathBuf};

use crate::models::FileOutcome;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FileState {
    Pending,
    Processed,
    Errored
}

impl FileState {
    /// Returns the state a file moves to once its outcome is known.
    ///
    /// Only `Pending` files may move, and only once. Terminal states yield `None`.
    pub fn next(self, outcome: &FileOutcome) -> Option<FileState> {
        match (self, outcome) {
            (FileState::Pending, FileOutcome::Success { .. }) => Some(FileState::Processed),
            (FileState::Pending, FileOutcome::Failure { .. }) => Some(FileState::Errored),
            (FileState::Processed | FileState::Errored, _) => None
        }
    }

    pub fn is_terminal(self) -> bool {
        self != FileState::Pending
    }
}

/// Where an input file currently lives and which lifecycle state it is in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileLocation {
    pub path: PathBuf,
    pub state: FileState
}

impl FileLocation {
    pub fn pending(path: PathBuf) -> Self {
        Self {
            path,
            state: FileState::Pending
        }
    }

    pub fn file_name(&self) -> String {
        self.path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Records a completed move. Returns `false` when the transition is not allowed.
    pub fn settle(&mut self, state: FileState, new_path: &Path) -> bool {
        if self.state.is_terminal() || !state.is_terminal() {
            return false;
        }

        self.state = state;
        self.path = new_path.to_path_buf();

        true
    }
}

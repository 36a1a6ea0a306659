mod discovery;
mod errors;
mod orchestrator;
mod relocation;
mod summary;
#[cfg(test)]
mod tests;

pub use discovery::discover;
pub use errors::{PipelineError, RelocationError};
pub use orchestrator::{Pipeline, PipelineSettings};
pub use relocation::relocate;
pub use summary::{FileReport, RunSummary};

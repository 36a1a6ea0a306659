mod errors;
mod file_processor;

pub use errors::ScanError;
pub use file_processor::{FileProcessor, FileScan};

mod header;
mod record_parser;

pub use header::{Field, HeaderMap};
pub use record_parser::{RecordParser, DEFAULT_DATE_FORMATS};

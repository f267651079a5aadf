//! Read log streams line by line, splitting every physical line on escaped
//! newline markers (`\` followed by `n`) and tagging each subline with the
//! number of the line it came from.

pub mod driver;
pub mod reader;
pub mod utils;

pub use driver::core::{ReaderKind, Summary, summarize, total_len};
pub use reader::chunked::ChunkedLines;
pub use reader::core::{ESCAPED_NEWLINE, LineSplitter, LogLine, sublines};
pub use reader::error::SublinesError;

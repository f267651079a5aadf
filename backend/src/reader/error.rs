use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// What can go wrong while reading sublines from an input source.
#[derive(Error, Debug, Diagnostic)]
pub enum SublinesError {
    #[error("failed to read input")]
    #[diagnostic(
        code(sublines::reader::io),
        help("The input stream could not be read to the end")
    )]
    Io(#[from] io::Error),

    #[error("failed to open {}", path.display())]
    #[diagnostic(code(sublines::reader::open))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("subline from line {line} is not valid UTF-8")]
    #[diagnostic(
        code(sublines::reader::utf8),
        help("Use the `splitter` reader to stop at the first undecodable line")
    )]
    Utf8 {
        line: usize,
        #[source]
        source: Utf8Error,
    },
}

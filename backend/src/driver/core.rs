use clap::ValueEnum;
use std::io::BufRead;
use tracing::debug;

use crate::reader::{chunked::ChunkedLines, core::LineSplitter, error::SublinesError};

/// Strategy used to walk the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReaderKind {
    /// Line by line, splitting on escaped newlines.
    #[default]
    Splitter,
    /// Fixed-size chunks into a reused buffer, splitting on escaped newlines.
    Chunked,
    /// Fixed-size chunks into a reused buffer, splitting on real newlines only.
    ChunkedPlain,
    /// Plain `BufRead::lines`, no escape handling.
    Plain,
}

/// Counters gathered over one pass of the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of sublines yielded.
    pub records: usize,
    /// Number of physical lines those sublines came from.
    pub lines: usize,
    /// Sum of the byte lengths of all sublines.
    pub total: usize,
}

impl Summary {
    fn record(&mut self, len: usize, line: usize) {
        self.records += 1;
        self.lines = self.lines.max(line);
        self.total += len;
    }
}

pub fn summarize<R: BufRead>(kind: ReaderKind, reader: R) -> Result<Summary, SublinesError> {
    let mut summary = Summary::default();
    match kind {
        ReaderKind::Splitter => {
            for record in LineSplitter::new(reader) {
                let (subline, line) = record?;
                summary.record(subline.len(), line);
            }
        }
        ReaderKind::Chunked | ReaderKind::ChunkedPlain => {
            let records = if kind == ReaderKind::Chunked {
                ChunkedLines::new(reader)
            } else {
                ChunkedLines::plain(reader)
            };
            for record in records {
                let (bytes, line) = record?;
                let subline = std::str::from_utf8(&bytes)
                    .map_err(|source| SublinesError::Utf8 { line, source })?;
                summary.record(subline.len(), line);
            }
        }
        ReaderKind::Plain => {
            for (n, line) in reader.lines().enumerate() {
                summary.record(line?.len(), n + 1);
            }
        }
    }
    debug!(
        reader = ?kind,
        records = summary.records,
        lines = summary.lines,
        total = summary.total,
        "input exhausted"
    );
    Ok(summary)
}

/// Sum of the lengths of every subline `kind` yields from `reader`.
pub fn total_len<R: BufRead>(kind: ReaderKind, reader: R) -> Result<usize, SublinesError> {
    summarize(kind, reader).map(|summary| summary.total)
}

use bytes::{Buf, Bytes, BytesMut};
use memchr::{memchr, memchr2};
use std::io::{self, Read};
use std::iter::FusedIterator;

use crate::reader::core::LogLine;

/// Number of bytes requested from the reader per read call.
pub const CHUNK_SIZE: usize = 8192;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sep {
    /// A real line return: `\n`.
    NewLine,
    /// An escaped line return: `\` followed by `n`.
    SubLine,
}

impl Sep {
    fn len(self) -> usize {
        match self {
            Sep::NewLine => 1,
            Sep::SubLine => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Eof,
    /// Remembers the last separator so the line counter only moves after a real newline.
    Scanning(Sep),
}

/// Chunked counterpart of [`LineSplitter`](crate::reader::core::LineSplitter).
///
/// Reads `CHUNK_SIZE` bytes at a time into one reusable buffer and hands out
/// sublines as zero-copy [`Bytes`] slices of it. The records are the same as the
/// ones `LineSplitter` yields for valid UTF-8 input, but the bytes are not checked.
///
/// [`ChunkedLines::plain`] builds a reader that only splits on real newlines,
/// numbering every line separately.
#[derive(Debug)]
pub struct ChunkedLines<R> {
    reader: R,
    buf: BytesMut,
    split_escapes: bool,
    state: State,
    line_count: usize,
    // Bytes of `buf` already known to hold no separator.
    scanned: usize,
}

impl<R: Read> ChunkedLines<R> {
    pub fn new(reader: R) -> Self {
        Self::with_escapes(reader, true)
    }

    /// Chunked reader that ignores escaped newline markers.
    pub fn plain(reader: R) -> Self {
        Self::with_escapes(reader, false)
    }

    fn with_escapes(reader: R, split_escapes: bool) -> Self {
        Self {
            reader,
            buf: BytesMut::with_capacity(CHUNK_SIZE),
            split_escapes,
            state: State::Scanning(Sep::NewLine),
            line_count: 0,
            scanned: 0,
        }
    }

    // Appends one chunk to the buffer, returning how many bytes were read.
    fn fill(&mut self) -> io::Result<usize> {
        let pos = self.buf.len();
        self.buf.reserve(CHUNK_SIZE);
        self.buf.resize(pos + CHUNK_SIZE, 0);
        match self.reader.read(&mut self.buf[pos..]) {
            Ok(n) => {
                self.buf.truncate(pos + n);
                Ok(n)
            }
            Err(e) => {
                self.buf.truncate(pos);
                Err(e)
            }
        }
    }

    fn find_separator(&mut self) -> Option<(usize, Sep)> {
        let slice = &self.buf[..];
        let mut from = self.scanned;
        let found = loop {
            let hit = if self.split_escapes {
                memchr2(b'\n', b'\\', &slice[from..])
            } else {
                memchr(b'\n', &slice[from..])
            };
            let Some(offset) = hit else { break None };
            let pos = from + offset;
            match slice[pos] {
                b'\n' => break Some((pos, Sep::NewLine)),
                _ if slice.get(pos + 1) == Some(&b'n') => break Some((pos, Sep::SubLine)),
                _ => from = pos + 1,
            }
        };
        // A trailing backslash may start a marker completed by the next chunk.
        self.scanned = match found {
            Some(_) => 0,
            None => slice.len().saturating_sub(1),
        };
        found
    }

    fn advance_state(&mut self, state: State) {
        if self.state == State::Scanning(Sep::NewLine) {
            self.line_count += 1;
        }
        self.state = state;
    }

    fn split_line(&mut self, pos: usize, sep: Sep) -> LogLine<Bytes> {
        self.advance_state(State::Scanning(sep));
        let line = self.buf.split_to(pos).freeze();
        self.buf.advance(sep.len());
        (line, self.line_count)
    }

    fn finish(&mut self) -> Option<LogLine<Bytes>> {
        let dangling_subline = self.state == State::Scanning(Sep::SubLine);
        if self.buf.is_empty() && !dangling_subline {
            self.state = State::Eof;
            return None;
        }
        self.advance_state(State::Eof);
        Some((self.buf.split().freeze(), self.line_count))
    }
}

impl<R: Read> Iterator for ChunkedLines<R> {
    type Item = io::Result<LogLine<Bytes>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == State::Eof {
                return None;
            }
            if let Some((pos, sep)) = self.find_separator() {
                return Some(Ok(self.split_line(pos, sep)));
            }
            match self.fill() {
                Ok(0) => return self.finish().map(Ok),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.state = State::Eof;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for ChunkedLines<R> {}

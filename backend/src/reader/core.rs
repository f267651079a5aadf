use std::io::{self, BufRead};
use std::iter::FusedIterator;

/// The two-character marker (`\` followed by `n`) standing for a newline that was
/// flattened into a single stored line.
pub const ESCAPED_NEWLINE: &str = "\\n";

/// A subline paired with the 1-based number of the physical line it came from.
pub type LogLine<T> = (T, usize);

/// Pull-based reader yielding every subline of a line-oriented source.
///
/// Each physical line is read with [`BufRead::read_line`], its `\n` terminator is
/// removed, and the rest is split on [`ESCAPED_NEWLINE`]. All sublines of one
/// physical line carry the same line number.
///
/// A read error is yielded once, after which the iterator is exhausted.
#[derive(Debug)]
pub struct LineSplitter<R> {
    reader: R,
    buffer: String,
    // Start of the next subline in `buffer`, `None` once the line is drained.
    cursor: Option<usize>,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> LineSplitter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            cursor: None,
            line_number: 0,
            done: false,
        }
    }

    /// Number of physical lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_line(&mut self) -> Option<io::Result<()>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                // A final line without terminator keeps all of its content.
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                }
                self.line_number += 1;
                self.cursor = Some(0);
                Some(Ok(()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn next_subline(&mut self, start: usize) -> String {
        let rest = &self.buffer[start..];
        match rest.find(ESCAPED_NEWLINE) {
            Some(end) => {
                self.cursor = Some(start + end + ESCAPED_NEWLINE.len());
                rest[..end].to_owned()
            }
            None => {
                self.cursor = None;
                rest.to_owned()
            }
        }
    }
}

impl<R: BufRead> Iterator for LineSplitter<R> {
    type Item = io::Result<LogLine<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = match self.cursor {
            Some(start) => start,
            None => {
                if let Err(e) = self.read_line()? {
                    return Some(Err(e));
                }
                0
            }
        };
        Some(Ok((self.next_subline(start), self.line_number)))
    }
}

impl<R: BufRead> FusedIterator for LineSplitter<R> {}

/// Shorthand for [`LineSplitter::new`].
pub fn sublines<R: BufRead>(reader: R) -> LineSplitter<R> {
    LineSplitter::new(reader)
}

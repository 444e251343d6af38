//! Memory Reference Trace.
//!
//! A trace is a text file with one request per line:
//!
//! ```text
//! r ffe04540
//! w 0x7b030d68
//! ```
//!
//! The first token is the request type (`r` or `w`), the second a hexadecimal address
//! with an optional `0x` prefix. Blank lines are skipped. Anything else is an error
//! that aborts the replay.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::{AccessKind, TraceError};

/// One memory reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Read or write.
    pub kind: AccessKind,
    /// Byte address referenced.
    pub address: u32,
}

impl TraceEvent {
    /// Creates a read of `address`.
    pub const fn read(address: u32) -> Self {
        Self {
            kind: AccessKind::Read,
            address,
        }
    }

    /// Creates a write of `address`.
    pub const fn write(address: u32) -> Self {
        Self {
            kind: AccessKind::Write,
            address,
        }
    }

    /// Parses one trace line. `line` is the 1-based line number used in errors.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// - [`TraceError::UnknownKind`] if the request type is not `r` or `w`.
    /// - [`TraceError::Malformed`] if the line does not have exactly two tokens or
    ///   the address is not a 32-bit hexadecimal number.
    pub fn parse_line(line: usize, text: &str) -> Result<Option<Self>, TraceError> {
        let mut tokens = text.split_whitespace();
        let Some(kind) = tokens.next() else {
            return Ok(None);
        };

        let malformed = || TraceError::Malformed {
            line,
            text: text.trim().to_owned(),
        };

        let mut chars = kind.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(malformed());
        };
        let kind = AccessKind::from_char(c).ok_or(TraceError::UnknownKind { line, kind: c })?;

        let (Some(address), None) = (tokens.next(), tokens.next()) else {
            return Err(malformed());
        };
        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address);
        let address = u32::from_str_radix(digits, 16).map_err(|_| malformed())?;

        Ok(Some(Self { kind, address }))
    }
}

/// Iterator over the events of a trace read from any buffered reader.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;
            match TraceEvent::parse_line(self.line, &text) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Reads and parses the whole trace file at `path`.
///
/// # Errors
///
/// Returns the first [`TraceError`] encountered; no partial trace is returned.
pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEvent>, TraceError> {
    TraceReader::open(path)?.collect()
}

use std::io::BufRead;

use mongodb::bson::Document;

use crate::error::{LoadError, ParseError, Result};
use crate::schema::RecordKind;

pub const DELIMITER: char = '|';

/// Parse one delimited line into a document of the given kind.
///
/// Columns beyond the schema are ignored, so the trailing `|` of `.tbl`
/// files is harmless.
pub fn parse_line(kind: RecordKind, line: &str) -> std::result::Result<Document, ParseError> {
    let schema = kind.schema();
    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() < schema.len() {
        return Err(ParseError::MissingFields {
            expected: schema.len(),
            found: parts.len(),
        });
    }

    let mut doc = Document::new();
    for (field, raw) in schema.iter().zip(parts) {
        doc.insert(field.name, field.coerce(raw)?);
    }
    Ok(doc)
}

/// Lazy, single pass sequence of parsed documents in file order.
pub struct RecordReader<R> {
    kind: RecordKind,
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(kind: RecordKind, reader: R) -> Self {
        RecordReader {
            kind,
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        let n = match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(n) => n,
            Err(source) => {
                return Some(Err(LoadError::Read {
                    line: self.line + 1,
                    source,
                }))
            }
        };
        if n == 0 {
            return None;
        }
        self.line += 1;

        let bytes = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        // invalid UTF-8 is replaced, not rejected
        let line = String::from_utf8_lossy(bytes);
        Some(parse_line(self.kind, &line).map_err(|source| LoadError::Parse {
            line: self.line,
            source,
        }))
    }
}

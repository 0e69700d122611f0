//! Data sources and delimited-text parsing.
//!
//! The first record of a source is the header; every following record is a
//! data row. Quoting follows RFC 4180, so quoted fields may contain the
//! delimiter or line breaks. Row length is checked strictly: a row with more
//! or fewer cells than the header fails the whole load, and a blank line is a
//! row with one empty cell.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ErrorKind, Position, ReaderBuilder, StringRecord};

use crate::error::LoadError;
use crate::record::{Header, Record};

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A delimited text file on disk.
    File(PathBuf),
    /// Delimited text held in memory.
    Inline(String),
}

impl DataSource {
    /// Source backed by a file path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Source backed by in-memory text.
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline(text.into())
    }

    /// Read and parse the whole source.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Open`] if the file cannot be opened, and any
    /// error from [`parse`] for unreadable or malformed content.
    pub fn read(&self) -> Result<Dataset, LoadError> {
        match self {
            Self::File(path) => {
                let file = File::open(path).map_err(|source| LoadError::Open {
                    path: path.clone(),
                    source,
                })?;
                parse(BufReader::new(file))
            }
            Self::Inline(text) => parse(text.as_bytes()),
        }
    }

    /// The file path, if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Inline(_) => None,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(text) => write!(f, "<inline, {} bytes>", text.len()),
        }
    }
}

/// Something a [`JobStore`](crate::JobStore) can load its dataset from.
///
/// [`DataSource`] covers files and in-memory text; other implementations can
/// wrap any reader and hand it to [`parse`].
pub trait TableSource: fmt::Debug + fmt::Display + Send + Sync {
    /// Read and parse the whole source.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the source cannot be read or parsed.
    fn read(&self) -> Result<Dataset, LoadError>;

    /// The file path backing this source, if any.
    fn path(&self) -> Option<&Path> {
        None
    }
}

impl TableSource for DataSource {
    fn read(&self) -> Result<Dataset, LoadError> {
        DataSource::read(self)
    }

    fn path(&self) -> Option<&Path> {
        DataSource::path(self)
    }
}

/// A fully parsed table: the header plus its rows in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Arc<Header>,
    records: Vec<Record>,
}

impl Dataset {
    /// Shared header of every record.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Records in source order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Parse delimited text from `reader` into a [`Dataset`].
///
/// A blank line between data rows is a row with a single empty cell: with a
/// one-column header it becomes a record whose value is `""`, otherwise it
/// fails the load as a short row. Blank lines after the last row are ignored.
///
/// # Errors
///
/// - [`LoadError::Read`] if `reader` fails
/// - [`LoadError::MissingHeader`] if the input is empty
/// - [`LoadError::DuplicateColumn`] if a header name repeats
/// - [`LoadError::RowLength`] if a row's cell count differs from the header's
/// - [`LoadError::Csv`] for invalid UTF-8 and other parse errors
pub fn parse<R: Read>(mut reader: R) -> Result<Dataset, LoadError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input).map_err(LoadError::Read)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input.as_slice());

    let names = rdr.headers()?.clone();
    let header = Arc::new(Header::new(names.iter())?);

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    let mut start = byte_offset(rdr.position(), input.len());
    loop {
        let result = rdr.read_record(&mut row);
        let end = byte_offset(rdr.position(), input.len());

        if matches!(result, Ok(false)) {
            break;
        }

        let (blank_lines, row_start) = leading_blank_lines(&input, start, end);
        for line in blank_lines {
            if header.len() != 1 {
                return Err(LoadError::RowLength {
                    line,
                    expected: header.len(),
                    found: 1,
                });
            }
            records.push(Record::new(Arc::clone(&header), vec![String::new()]));
        }

        if let Err(e) = result {
            return Err(row_error(e, line_at(&input, row_start)));
        }
        records.push(Record::new(
            Arc::clone(&header),
            row.iter().map(str::to_string).collect(),
        ));
        start = end;
    }

    Ok(Dataset { header, records })
}

fn byte_offset(pos: &Position, len: usize) -> usize {
    usize::try_from(pos.byte()).map_or(len, |b| b.min(len))
}

/// Blank lines at the start of `input[start..end]` and the offset where the
/// row itself begins.
///
/// The csv reader skips empty lines silently, so they only show up as line
/// breaks between the end of one record and the first byte of the next.
fn leading_blank_lines(input: &[u8], start: usize, end: usize) -> (Vec<u64>, usize) {
    let mut pos = start;
    // A CRLF terminator leaves its '\n' to be consumed with the next record.
    if pos > 0 && pos < end && input[pos - 1] == b'\r' && input[pos] == b'\n' {
        pos += 1;
    }

    let mut lines = Vec::new();
    while pos < end {
        match input[pos] {
            b'\r' => {
                lines.push(line_at(input, pos));
                pos += if input.get(pos + 1) == Some(&b'\n') { 2 } else { 1 };
            }
            b'\n' => {
                lines.push(line_at(input, pos));
                pos += 1;
            }
            _ => break,
        }
    }
    (lines, pos.min(end))
}

/// 1-based line number of byte `pos`, counting `\n` like the csv reader does.
fn line_at(input: &[u8], pos: usize) -> u64 {
    let newlines = input[..pos].iter().filter(|&&b| b == b'\n').count();
    u64::try_from(newlines).map_or(u64::MAX, |n| n + 1)
}

/// Map a row-level csv error, surfacing length mismatches as `RowLength`.
///
/// `line` is where the row starts, after any skipped blank lines.
fn row_error(err: csv::Error, line: u64) -> LoadError {
    if let ErrorKind::UnequalLengths {
        expected_len, len, ..
    } = err.kind()
    {
        return LoadError::RowLength {
            line,
            expected: usize::try_from(*expected_len).unwrap_or(usize::MAX),
            found: usize::try_from(*len).unwrap_or(usize::MAX),
        };
    }
    LoadError::Csv(err)
}

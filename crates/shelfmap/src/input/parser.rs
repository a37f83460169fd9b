//! CSV/TSV and workbook reader producing record sets.

use std::fs;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use indexmap::IndexSet;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Result, ShelfmapError};
use crate::record::{RecordSet, Value};

use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// UTF-8 byte order mark written by spreadsheet exports.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extensions read as Excel workbooks rather than delimited text.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether a file without data rows is accepted.
    pub allow_empty: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            allow_empty: false,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Accept header-only files (templates are usually just a header row).
    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Reads delimited files and workbooks into [`RecordSet`]s.
///
/// Every cell is read as text; cells that are empty after trimming become null.
/// Blank headers are named `Unnamed: <position>` and repeated headers get a
/// `.1`, `.2`, ... suffix, so no cell is ever read under another column.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the record set and its provenance.
    ///
    /// `.xlsx` and `.xlsm` files are read from their first worksheet; anything
    /// else is treated as delimited text.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RecordSet, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| ShelfmapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let hash = format!("sha256:{:x}", Sha256::digest(&contents));

        let (records, format) = if is_workbook(path) {
            (self.parse_workbook(&contents)?, "xlsx")
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(strip_bom(&contents))?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            };
            (self.parse_bytes(&contents, delimiter)?, format)
        };

        debug!(
            path = %path.display(),
            rows = records.row_count(),
            columns = records.column_count(),
            format,
            "parsed record set"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format.to_string(),
            records.row_count(),
            records.column_count(),
        );

        Ok((records, metadata))
    }

    /// Parse in-memory delimited text.
    pub fn parse_str(&self, text: &str) -> Result<RecordSet> {
        let bytes = text.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(strip_bom(bytes))?,
        };
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse the first worksheet of an in-memory `.xlsx` workbook.
    pub fn parse_workbook(&self, bytes: &[u8]) -> Result<RecordSet> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ShelfmapError::EmptyData("Workbook has no worksheets".to_string()))??;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .map(|cell| workbook_text(cell).trim().to_string())
                .collect(),
            None => Vec::new(),
        };
        let data = rows
            .map(|row| row.iter().map(|cell| cell_value(&workbook_text(cell))).collect())
            .collect();

        self.assemble(headers, data)
    }

    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<RecordSet> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(strip_bom(bytes));

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(cell_value).collect());
        }

        self.assemble(headers, rows)
    }

    /// Build a record set from raw headers and rows.
    ///
    /// Short rows are padded with nulls. Cells past the last header are
    /// dropped only when they are blank; otherwise the row is rejected.
    fn assemble(&self, headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<RecordSet> {
        if headers.iter().all(String::is_empty) {
            return Err(ShelfmapError::EmptyData("No columns found".to_string()));
        }

        let mut records = RecordSet::try_new(disambiguate_headers(headers))?;
        let width = records.column_count();

        for (index, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                if row[width..].iter().any(|v| !v.is_null()) {
                    return Err(ShelfmapError::RaggedRow {
                        row: index,
                        expected: width,
                        found: row.len(),
                    });
                }
                row.truncate(width);
            }
            row.resize(width, Value::Null);
            records.push_row(row)?;
        }

        if records.is_empty() && !self.config.allow_empty {
            return Err(ShelfmapError::EmptyData("No data rows found".to_string()));
        }

        Ok(records)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_value(raw: &str) -> Value {
    if raw.trim().is_empty() {
        Value::Null
    } else {
        Value::Text(raw.to_string())
    }
}

fn workbook_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Give every header a distinct name.
fn disambiguate_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: IndexSet<String> = IndexSet::with_capacity(headers.len());

    for (position, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {}", position)
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while taken.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }
        if suffix > 0 {
            warn!(column = %base, renamed = %name, "repeated header renamed");
        }
        taken.insert(name);
    }

    taken.into_iter().collect()
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Detect the delimiter from the first few non-blank lines.
///
/// A delimiter that appears the same number of times on every line wins over
/// one whose count varies; tab breaks ties.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(std::io::Result::ok)
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ShelfmapError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best = (b',', 0usize);

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first
        };

        if score > best.1 {
            best = (delim, score);
        }
    }

    Ok(best.0)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

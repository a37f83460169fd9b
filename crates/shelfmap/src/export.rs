//! Serialization of populated templates.
//!
//! Delimited formats render every cell with [`Value::to_cell_string`]; JSON
//! and workbooks keep native types. Every format keeps the schema's column
//! order.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ShelfmapError};
use crate::pipeline::PopulationReport;
use crate::record::{RecordSet, Value};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Worksheet holding the populated template.
const SHEET_NAME: &str = "Sheet1";

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook with thin borders, top-left alignment and wrapped text.
    #[default]
    Xlsx,
    /// Comma-separated, UTF-8 with a byte order mark for spreadsheet software.
    Csv,
    /// Tab-separated, no byte order mark.
    Tsv,
    /// JSON array of row objects.
    Json,
}

impl ExportFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ShelfmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" | "txt" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ShelfmapError::Config(format!(
                "Unknown export format '{}' (expected xlsx, csv, tsv or json)",
                other
            ))),
        }
    }
}

/// Refuse export while any operator selection is missing.
pub fn ensure_exportable(report: &PopulationReport) -> Result<()> {
    if report.is_exportable() {
        Ok(())
    } else {
        Err(ShelfmapError::IncompleteConfiguration(
            report.missing_selections.clone(),
        ))
    }
}

/// Serialize a record set.
pub fn write<W: Write>(records: &RecordSet, format: ExportFormat, mut writer: W) -> Result<()> {
    match format {
        ExportFormat::Xlsx => {
            let buffer = workbook_bytes(records)?;
            writer.write_all(&buffer)?;
            writer.flush()?;
            Ok(())
        }
        ExportFormat::Csv => {
            writer.write_all(UTF8_BOM)?;
            write_delimited(records, b',', writer)
        }
        ExportFormat::Tsv => write_delimited(records, b'\t', writer),
        ExportFormat::Json => {
            let rows: Vec<IndexMap<&str, &Value>> =
                (0..records.row_count()).filter_map(|i| records.row(i)).collect();
            writer.write_all(&serde_json::to_vec_pretty(&rows)?)?;
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_delimited<W: Write>(records: &RecordSet, delimiter: u8, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(records.column_names())?;
    for row in records.rows() {
        out.write_record(row.iter().map(Value::to_cell_string))?;
    }
    out.flush()?;
    Ok(())
}

/// Build a single-sheet workbook; every cell, blanks included, is bordered,
/// aligned top-left and wrapped.
fn workbook_bytes(records: &RecordSet) -> Result<Vec<u8>> {
    let cell = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Top)
        .set_align(FormatAlign::Left)
        .set_text_wrap();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in records.column_names().into_iter().enumerate() {
        sheet.write_string_with_format(0, excel_col(col)?, name, &cell)?;
    }

    for (index, row) in records.rows().enumerate() {
        let row_num = excel_row(index + 1)?;
        for (col, value) in row.iter().enumerate() {
            let col = excel_col(col)?;
            match value {
                Value::Null => sheet.write_blank(row_num, col, &cell)?,
                Value::Bool(b) => sheet.write_boolean_with_format(row_num, col, *b, &cell)?,
                Value::Integer(i) => sheet.write_number_with_format(row_num, col, *i as f64, &cell)?,
                Value::Float(f) => sheet.write_number_with_format(row_num, col, *f, &cell)?,
                Value::Text(text) => sheet.write_string_with_format(row_num, col, text, &cell)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn excel_row(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| ShelfmapError::Config(format!("Row {} exceeds the worksheet limit", index)))
}

fn excel_col(index: usize) -> Result<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| ShelfmapError::Config(format!("Column {} exceeds the worksheet limit", index)))
}

/// Serialize a record set to a file.
pub fn export_to_path(records: &RecordSet, format: ExportFormat, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ShelfmapError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    write(records, format, BufWriter::new(file)).map_err(|e| match e {
        ShelfmapError::Write(source) => ShelfmapError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(
        path = %path.display(),
        %format,
        rows = records.row_count(),
        "exported populated template"
    );
    Ok(())
}

/// Export a report's output once the configuration is complete.
pub fn export_report(report: &PopulationReport, format: ExportFormat, path: impl AsRef<Path>) -> Result<()> {
    ensure_exportable(report)?;
    export_to_path(&report.output, format, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, DataType, Reader};
    use indexmap::IndexSet;

    fn sample() -> RecordSet {
        RecordSet::with_rows(
            ["SSID", "Title", "Send to Harvard", "Count"],
            vec![
                vec![
                    Value::from("NEW"),
                    Value::from("Fair, 1920"),
                    Value::Bool(true),
                    Value::Integer(1),
                ],
                vec![Value::from("NEW"), Value::Null, Value::Bool(false), Value::Integer(1)],
            ],
        )
        .unwrap()
    }

    fn report(missing: Vec<String>) -> PopulationReport {
        PopulationReport {
            output: sample(),
            outcomes: Vec::new(),
            warnings: IndexSet::new(),
            missing_selections: missing,
        }
    }

    #[test]
    fn test_csv_has_bom_and_quotes() {
        let mut buf = Vec::new();
        write(&sample(), ExportFormat::Csv, &mut buf).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "SSID,Title,Send to Harvard,Count");
        assert_eq!(lines[1], "NEW,\"Fair, 1920\",True,1");
        assert_eq!(lines[2], "NEW,,False,1");
    }

    #[test]
    fn test_tsv_without_bom() {
        let mut buf = Vec::new();
        write(&sample(), ExportFormat::Tsv, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("SSID\tTitle"));
    }

    #[test]
    fn test_json_keeps_column_order() {
        let mut buf = Vec::new();
        write(&sample(), ExportFormat::Json, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let ssid = text.find("\"SSID\"").unwrap();
        let title = text.find("\"Title\"").unwrap();
        assert!(ssid < title);

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["Send to Harvard"], serde_json::json!(true));
        assert!(parsed[1]["Title"].is_null());
    }

    #[test]
    fn test_xlsx_keeps_values_and_types() {
        let mut buf = Vec::new();
        write(&sample(), ExportFormat::Xlsx, &mut buf).unwrap();
        assert!(buf.starts_with(b"PK"));

        let mut workbook: calamine::Xlsx<_> = calamine::Xlsx::new(std::io::Cursor::new(buf)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_size(), (3, 4));
        assert_eq!(range.get_value((0, 1)), Some(&Data::String("Title".into())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("Fair, 1920".into())));
        assert_eq!(range.get_value((1, 2)), Some(&Data::Bool(true)));
        assert_eq!(range.get_value((1, 3)).and_then(|d| d.as_f64()), Some(1.0));
        assert_eq!(range.get_value((2, 1)), Some(&Data::Empty));
    }

    #[test]
    fn test_stream_failure_reported_as_write_error() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        for format in [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json] {
            let err = write(&sample(), format, Closed).unwrap_err();
            assert!(matches!(err, ShelfmapError::Write(_)), "{format}: {err}");
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path("out/template.tsv"), Some(ExportFormat::Tsv));
        assert_eq!(ExportFormat::from_path("out/template.xlsx"), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::from_path("out/template.parquet"), None);
        assert_eq!(ExportFormat::default(), ExportFormat::Xlsx);
        assert!("xls".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_gate() {
        let err = ensure_exportable(&report(vec!["Metadata Type".into()])).unwrap_err();
        assert!(matches!(err, ShelfmapError::IncompleteConfiguration(ref names) if names.len() == 1));
        assert!(ensure_exportable(&report(Vec::new())).is_ok());
    }

    #[test]
    fn test_export_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.csv");

        export_report(&report(Vec::new()), ExportFormat::Csv, &path).unwrap();
        assert!(path.exists());

        let blocked = dir.path().join("blocked.csv");
        assert!(export_report(&report(vec!["Title Column".into()]), ExportFormat::Csv, &blocked).is_err());
        assert!(!blocked.exists());
    }
}

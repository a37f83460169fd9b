//! Error types for the Shelfmap library.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::RuleCategory;

/// Main error type for Shelfmap operations.
#[derive(Debug, Error)]
pub enum ShelfmapError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing serialized output to a stream.
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading an Excel workbook.
    #[error("Workbook read error: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),

    /// Error building an Excel workbook.
    #[error("Workbook write error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Empty file or no rows to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An input record set lacks a column the caller asked for.
    #[error("Column '{column}' not found in {table}")]
    MissingColumn { table: String, column: String },

    /// A column name appears more than once.
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A row does not carry one value per column.
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export attempted while operator selections are still missing.
    #[error("Please select value(s) for {} before exporting the populated template", .0.join(", "))]
    IncompleteConfiguration(Vec<String>),
}

/// Result type alias for Shelfmap operations.
pub type Result<T> = std::result::Result<T, ShelfmapError>;

/// How serious a reported finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Surfaced for operator awareness, never blocks anything.
    Advisory,
    /// One rule category failed; the others still ran.
    Recoverable,
    /// A category's precondition does not hold for the whole run.
    Fatal,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Advisory => "Warning",
            Severity::Recoverable => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

/// Failure of a single rule category during population.
///
/// These never abort a run: the pipeline records them against the category
/// and moves on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleError {
    /// The output schema lacks a field this category cannot run without.
    #[error("Template missing required field for {category}: '{field}'")]
    MissingRequiredField {
        category: RuleCategory,
        field: String,
    },

    /// The category produced values for fields the output schema does not define.
    #[error("Template missing expected field(s) for {category}: {}", .fields.join(", "))]
    UnknownFields {
        category: RuleCategory,
        fields: Vec<String>,
    },

    /// A source column named by the configuration is absent from its record set.
    #[error("Selected {table} column '{column}' not found for {category}")]
    MissingSourceColumn {
        category: RuleCategory,
        table: String,
        column: String,
    },
}

impl RuleError {
    /// Severity of this failure.
    pub fn severity(&self) -> Severity {
        match self {
            RuleError::MissingRequiredField { .. } => Severity::Fatal,
            RuleError::UnknownFields { .. } | RuleError::MissingSourceColumn { .. } => {
                Severity::Recoverable
            }
        }
    }

    /// The category that failed.
    pub fn category(&self) -> RuleCategory {
        match self {
            RuleError::MissingRequiredField { category, .. }
            | RuleError::UnknownFields { category, .. }
            | RuleError::MissingSourceColumn { category, .. } => *category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_configuration_lists_selections() {
        let err = ShelfmapError::IncompleteConfiguration(vec![
            "Metadata Type".to_string(),
            "Source for Rights".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("Metadata Type, Source for Rights"));
    }

    #[test]
    fn test_rule_error_severity() {
        let fatal = RuleError::MissingRequiredField {
            category: RuleCategory::Description,
            field: "Description[34357]".into(),
        };
        let recoverable = RuleError::UnknownFields {
            category: RuleCategory::Title,
            fields: vec!["Title[34338]".into()],
        };

        assert_eq!(fatal.severity(), Severity::Fatal);
        assert_eq!(recoverable.severity(), Severity::Recoverable);
        assert_eq!(recoverable.category(), RuleCategory::Title);
        assert!(recoverable.to_string().contains("Title[34338]"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Advisory < Severity::Recoverable);
        assert!(Severity::Recoverable < Severity::Fatal);
    }
}

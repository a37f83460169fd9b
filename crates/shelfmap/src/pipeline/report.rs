//! Results of a population run.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{RuleError, Severity};
use crate::record::RecordSet;
use crate::rules::RuleCategory;

/// Rows shown in a preview when the caller does not ask for a count.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// What one rule category did during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutcome {
    pub category: RuleCategory,
    /// Output fields this category wrote, in write order.
    pub fields_written: Vec<String>,
    /// Advisory messages from this category.
    pub warnings: Vec<String>,
    /// Failures; the category may still have written some fields.
    pub errors: Vec<RuleError>,
}

impl CategoryOutcome {
    pub(crate) fn new(category: RuleCategory) -> Self {
        Self {
            category,
            fields_written: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns true if the category wrote at least one field.
    pub fn wrote_anything(&self) -> bool {
        !self.fields_written.is_empty()
    }

    /// Returns true if the category was skipped on a fatal precondition.
    pub fn is_skipped(&self) -> bool {
        self.errors.iter().any(|e| e.severity() == Severity::Fatal)
    }
}

/// The populated template plus everything the operator should see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationReport {
    /// One row per cleaned identifier record, in schema column order.
    pub output: RecordSet,
    /// Per-category manifests, in pipeline order.
    pub outcomes: Vec<CategoryOutcome>,
    /// Advisory messages from every category, each reported once.
    pub warnings: IndexSet<String>,
    /// Operator selections still absent.
    pub missing_selections: Vec<String>,
}

impl PopulationReport {
    /// All category failures, in pipeline order.
    pub fn errors(&self) -> impl Iterator<Item = &RuleError> {
        self.outcomes.iter().flat_map(|o| o.errors.iter())
    }

    /// Returns true if any category failed.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Manifest for one category.
    pub fn outcome(&self, category: RuleCategory) -> Option<&CategoryOutcome> {
        self.outcomes.iter().find(|o| o.category == category)
    }

    /// Fields written by any category, in first-write order.
    pub fn preview_fields(&self) -> Vec<&str> {
        let fields: IndexSet<&str> = self
            .outcomes
            .iter()
            .flat_map(|o| o.fields_written.iter().map(String::as_str))
            .collect();
        fields.into_iter().collect()
    }

    /// The first `rows` output rows, restricted to populated fields.
    pub fn preview(&self, rows: usize) -> RecordSet {
        self.output.select(self.preview_fields()).head(rows)
    }

    /// Returns true when no selection is missing.
    pub fn is_exportable(&self) -> bool {
        self.missing_selections.is_empty()
    }
}

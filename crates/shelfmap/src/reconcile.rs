//! Key reconciliation between identifier and descriptive records.
//!
//! Findings are advisory: nothing here stops a population run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ShelfmapError};
use crate::record::RecordSet;

/// Outcome of comparing the two record sets on their match keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Raw identifier row count, duplicates included.
    pub identifier_rows: usize,
    /// Raw descriptive row count, duplicates included.
    pub descriptive_rows: usize,
    /// Identifier keys with no descriptive entry.
    pub missing_from_descriptive: BTreeSet<String>,
    /// Descriptive keys with no identifier entry.
    pub missing_from_identifiers: BTreeSet<String>,
}

impl ReconciliationReport {
    /// Both row counts, when they differ.
    pub fn row_count_mismatch(&self) -> Option<(usize, usize)> {
        (self.identifier_rows != self.descriptive_rows)
            .then_some((self.identifier_rows, self.descriptive_rows))
    }

    /// Returns true if either key set has entries the other lacks.
    pub fn has_key_mismatch(&self) -> bool {
        !self.missing_from_descriptive.is_empty() || !self.missing_from_identifiers.is_empty()
    }

    /// Returns true when counts and key sets agree.
    pub fn is_clean(&self) -> bool {
        self.row_count_mismatch().is_none() && !self.has_key_mismatch()
    }

    /// Human-readable advisory messages.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();

        if let Some((ids, desc)) = self.row_count_mismatch() {
            messages.push(format!(
                "Row count mismatch! Identifiers: {}, Descriptive Metadata: {}",
                ids, desc
            ));
        }
        if !self.missing_from_descriptive.is_empty() {
            messages.push(format!(
                "Identifiers not in Descriptive Metadata: {}",
                join_keys(&self.missing_from_descriptive)
            ));
        }
        if !self.missing_from_identifiers.is_empty() {
            messages.push(format!(
                "Descriptive Metadata not in Identifiers: {}",
                join_keys(&self.missing_from_identifiers)
            ));
        }

        messages
    }
}

fn join_keys(keys: &BTreeSet<String>) -> String {
    keys.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Compare two key sequences.
///
/// Keys are trimmed before comparison. Row counts are the raw sequence
/// lengths, so duplicate keys count once for the set differences but every
/// time for the row counts.
pub fn reconcile_keys<I, J, S, T>(identifier_keys: I, descriptive_keys: J) -> ReconciliationReport
where
    I: IntoIterator<Item = S>,
    J: IntoIterator<Item = T>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let (identifier_rows, id_keys) = collect_keys(identifier_keys);
    let (descriptive_rows, desc_keys) = collect_keys(descriptive_keys);

    let report = ReconciliationReport {
        identifier_rows,
        descriptive_rows,
        missing_from_descriptive: id_keys.difference(&desc_keys).cloned().collect(),
        missing_from_identifiers: desc_keys.difference(&id_keys).cloned().collect(),
    };

    for message in report.messages() {
        warn!("{}", message);
    }

    report
}

fn collect_keys<I, S>(keys: I) -> (usize, BTreeSet<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut count = 0;
    let mut set = BTreeSet::new();
    for key in keys {
        count += 1;
        set.insert(key.as_ref().trim().to_string());
    }
    (count, set)
}

/// Compare two record sets on their designated key columns.
///
/// Null keys compare as the empty string.
pub fn reconcile_record_sets(
    identifiers: &RecordSet,
    identifier_key: &str,
    descriptive: &RecordSet,
    descriptive_key: &str,
) -> Result<ReconciliationReport> {
    let id_keys = key_column(identifiers, identifier_key, "identifier records")?;
    let desc_keys = key_column(descriptive, descriptive_key, "descriptive records")?;
    Ok(reconcile_keys(id_keys, desc_keys))
}

fn key_column(records: &RecordSet, column: &str, table: &str) -> Result<Vec<String>> {
    let values = records
        .column(column)
        .ok_or_else(|| ShelfmapError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })?;
    Ok(values.into_iter().map(|v| v.trimmed().unwrap_or_default()).collect())
}

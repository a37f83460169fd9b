//! Crediting-notes translation table.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfmapError};
use crate::record::RecordSet;

/// One row of the translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Canonical source name the operator picks from.
    pub source: String,
    /// Crediting text written into the output.
    pub notes: String,
}

/// Maps a canonical source name to its crediting note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTable {
    entries: Vec<TranslationEntry>,
}

impl TranslationTable {
    /// Create a table from entries, trimming both sides and dropping blank sources.
    pub fn new(entries: impl IntoIterator<Item = TranslationEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| TranslationEntry {
                    source: e.source.trim().to_string(),
                    notes: e.notes.trim().to_string(),
                })
                .filter(|e| !e.source.is_empty())
                .collect(),
        }
    }

    /// Build from a record set, using its first two columns as (source, notes)
    /// whatever their header names are.
    pub fn from_record_set(records: &RecordSet) -> Result<Self> {
        if records.column_count() < 2 {
            return Err(ShelfmapError::Config(format!(
                "Translation table needs two columns (source, notes), found {}",
                records.column_count()
            )));
        }

        let entries = records.rows().map(|row| TranslationEntry {
            source: row[0].trimmed().unwrap_or_default(),
            notes: row[1].trimmed().unwrap_or_default(),
        });

        Ok(Self::new(entries))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selectable source names, deduplicated, in table order.
    pub fn sources(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.source.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// First non-blank notes value for an exact source match.
    pub fn lookup(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|e| e.source == source)
            .map(|e| e.notes.as_str())
            .find(|notes| !notes.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    fn entry(source: &str, notes: &str) -> TranslationEntry {
        TranslationEntry {
            source: source.into(),
            notes: notes.into(),
        }
    }

    #[test]
    fn test_first_non_blank_match_wins() {
        let table = TranslationTable::new([
            entry("Gift of A", ""),
            entry("Gift of A", "Donated by A"),
            entry("Gift of A", "Later note"),
        ]);
        assert_eq!(table.lookup("Gift of A"), Some("Donated by A"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = TranslationTable::new([entry("Purchase", "Purchased")]);
        assert_eq!(table.lookup("purchase"), None);
        assert_eq!(table.lookup(" Purchase"), None);
    }

    #[test]
    fn test_blank_only_notes_is_none() {
        let table = TranslationTable::new([entry("Unknown", "   ")]);
        assert_eq!(table.lookup("Unknown"), None);
    }

    #[test]
    fn test_from_record_set_uses_first_two_columns() {
        let records = RecordSet::with_rows(
            ["Source Name", "Credit Line", "Extra"],
            vec![
                vec![Value::from(" Purchase "), Value::from(" Purchased "), Value::Null],
                vec![Value::Null, Value::from("orphan"), Value::Null],
                vec![Value::from("Purchase"), Value::Null, Value::Null],
            ],
        )
        .unwrap();

        let table = TranslationTable::from_record_set(&records).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.sources(), vec!["Purchase"]);
        assert_eq!(table.lookup("Purchase"), Some("Purchased"));
    }

    #[test]
    fn test_single_column_rejected() {
        let records = RecordSet::new(["only"]);
        assert!(TranslationTable::from_record_set(&records).is_err());
    }
}

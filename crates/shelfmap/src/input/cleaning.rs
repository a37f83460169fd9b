//! Identifier record cleaning.

use tracing::info;

use crate::error::{Result, ShelfmapError};
use crate::record::RecordSet;

/// Identifier records after blank-identifier rows were removed.
#[derive(Debug, Clone)]
pub struct CleanedIdentifiers {
    /// Remaining rows, in their original order.
    pub records: RecordSet,
    /// How many rows were dropped.
    pub dropped: usize,
}

/// Drop rows whose identifier is null or blank.
///
/// The population pipeline assumes this has already been applied.
pub fn clean_identifiers(mut records: RecordSet, column: &str) -> Result<CleanedIdentifiers> {
    let index = records
        .column_index(column)
        .ok_or_else(|| ShelfmapError::MissingColumn {
            table: "identifier records".to_string(),
            column: column.to_string(),
        })?;

    let before = records.row_count();
    records.retain_rows(|row| !row[index].is_blank());
    let dropped = before - records.row_count();

    info!(
        remaining = records.row_count(),
        dropped, "cleaned identifier records"
    );

    Ok(CleanedIdentifiers { records, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    #[test]
    fn test_blank_identifiers_dropped() {
        let records = RecordSet::with_rows(
            ["FILE-URN", "OBJ-OSN"],
            vec![
                vec![Value::from("urn-3:1"), Value::from("a_1")],
                vec![Value::Null, Value::from("a_2")],
                vec![Value::from("   "), Value::from("a_3")],
                vec![Value::from("urn-3:4"), Value::from("a_4")],
            ],
        )
        .unwrap();

        let cleaned = clean_identifiers(records, "FILE-URN").unwrap();
        assert_eq!(cleaned.dropped, 2);
        assert_eq!(cleaned.records.row_count(), 2);
        assert_eq!(cleaned.records.get(1, "OBJ-OSN"), Some(&Value::from("a_4")));
    }

    #[test]
    fn test_missing_identifier_column() {
        let records = RecordSet::new(["OBJ-OSN"]);
        let err = clean_identifiers(records, "FILE-URN").unwrap_err();
        assert!(err.to_string().contains("FILE-URN"));
    }
}

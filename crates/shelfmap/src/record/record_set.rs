//! Ordered, column-named tables of scalar values.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfmapError};

use super::value::Value;

/// An ordered sequence of rows sharing one column set.
///
/// Every row holds exactly one value per column, in column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSet {
    columns: IndexSet<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordSet {
    /// Create an empty record set with the given columns.
    ///
    /// Duplicate column names collapse into a single column.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create an empty record set, rejecting repeated column names.
    pub fn try_new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique = IndexSet::new();
        for name in columns {
            let name = name.into();
            if unique.contains(&name) {
                return Err(ShelfmapError::DuplicateColumn(name));
            }
            unique.insert(name);
        }
        Ok(Self {
            columns: unique,
            rows: Vec::new(),
        })
    }

    /// Create a record set with `row_count` rows of nulls.
    pub fn blank<I, S>(columns: I, row_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(columns);
        let width = set.column_count();
        set.rows = vec![vec![Value::Null; width]; row_count];
        set
    }

    /// Create a record set from columns and rows, checking row widths.
    pub fn with_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(columns);
        for row in rows {
            set.push_row(row)?;
        }
        Ok(set)
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ShelfmapError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    /// Returns true if the column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// All values for a column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[index]).collect())
    }

    /// Iterate over rows as value slices in column order.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// A row as an ordered column-to-value map.
    pub fn row(&self, index: usize) -> Option<IndexMap<&str, &Value>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect(),
        )
    }

    /// Set a cell. Returns false if the row or column does not exist.
    pub fn set(&mut self, row: usize, column: &str, value: Value) -> bool {
        let Some(index) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row) {
            Some(r) => {
                r[index] = value;
                true
            }
            None => false,
        }
    }

    /// Write the same value into every row of a column.
    pub fn fill_column(&mut self, column: &str, value: &Value) -> bool {
        let Some(index) = self.column_index(column) else {
            return false;
        };
        for row in &mut self.rows {
            row[index] = value.clone();
        }
        true
    }

    /// Write one value per row into a column.
    ///
    /// Values are aligned by position; rows past the end of `values` become
    /// null and surplus values are ignored.
    pub fn assign_column(&mut self, column: &str, values: &[Value]) -> bool {
        let Some(index) = self.column_index(column) else {
            return false;
        };
        for (i, row) in self.rows.iter_mut().enumerate() {
            row[index] = values.get(i).cloned().unwrap_or_default();
        }
        true
    }

    /// Keep only rows for which the predicate holds.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Project onto the given columns, skipping names that do not exist.
    pub fn select<'a, I>(&self, columns: I) -> RecordSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let indices: IndexMap<&str, usize> = columns
            .into_iter()
            .filter_map(|name| self.column_index(name).map(|i| (name, i)))
            .collect();

        RecordSet {
            columns: indices.keys().map(|s| s.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.values().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> RecordSet {
        RecordSet {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

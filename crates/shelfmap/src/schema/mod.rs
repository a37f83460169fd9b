//! Output template schema.

pub mod fields;

use serde::{Deserialize, Serialize};

use crate::record::RecordSet;

/// A named field of the output template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Stable field name, used verbatim by rule output.
    pub name: String,
    /// Whether the field is canonical for its rule category.
    pub required: bool,
}

/// Ordered field list of the output record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    fields: Vec<SchemaField>,
}

impl OutputSchema {
    /// Create a schema from field names; canonical fields are flagged required.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<SchemaField> = Vec::new();
        for name in names {
            let name = name.into();
            if fields.iter().any(|f| f.name == name) {
                continue;
            }
            fields.push(SchemaField {
                required: fields::REQUIRED.contains(&name.as_str()),
                name,
            });
        }
        Self { fields }
    }

    /// The default SharedShelf template.
    pub fn shared_shelf() -> Self {
        Self::new(fields::SHARED_SHELF.iter().copied())
    }

    /// Use the header row of a template file as the field list.
    pub fn from_record_set(template: &RecordSet) -> Self {
        Self::new(template.column_names())
    }

    /// All fields in order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if the schema defines this field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Canonical fields this schema does not define.
    pub fn missing_required(&self) -> Vec<&'static str> {
        fields::REQUIRED
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// An output record set with this schema and `rows` null rows.
    pub fn blank_records(&self, rows: usize) -> RecordSet {
        RecordSet::blank(self.field_names(), rows)
    }
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::shared_shelf()
    }
}

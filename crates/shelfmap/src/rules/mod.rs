//! Population rules.
//!
//! Each rule maps the configuration and source record sets to a set of
//! column assignments for the output template. Rules never touch the output
//! record set themselves: they return a [`RuleOutput`] and the pipeline
//! decides whether the assignments fit the schema.

mod date_fields;
mod defaults;
mod description;
mod fixed;
mod geography;
mod identifiers;
mod rights;
mod title;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::RuleError;
use crate::input::TranslationTable;
use crate::record::{RecordSet, Value};

pub use date_fields::DateFieldsRule;
pub use defaults::{CategoryDefaultsRule, category_defaults};
pub use description::DescriptionRule;
pub use fixed::FixedValuesRule;
pub use geography::{CountryRule, CultureRule};
pub use identifiers::{IdentifierFieldsRule, normalize_secondary_code};
pub use rights::{CreditingRule, RightsRule};
pub use title::{TitleForm, TitleRule, title_form};

/// Rule categories, in the order the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    FixedValues,
    IdentifierFields,
    Dates,
    Title,
    CategoryDefaults,
    Description,
    Culture,
    Country,
    Rights,
    Crediting,
}

impl RuleCategory {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RuleCategory::FixedValues => "fixed value population",
            RuleCategory::IdentifierFields => "identifier-related population",
            RuleCategory::Dates => "start/end date population",
            RuleCategory::Title => "title population",
            RuleCategory::CategoryDefaults => "metadata type-related population",
            RuleCategory::Description => "general note population",
            RuleCategory::Culture => "culture population",
            RuleCategory::Country => "country population",
            RuleCategory::Rights => "rights population",
            RuleCategory::Crediting => "crediting note population",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Values for one output column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// The same value in every row.
    Constant(Value),
    /// One value per output row, aligned by position.
    PerRow(Vec<Value>),
}

/// A write into one output field.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub values: ColumnValues,
}

impl Assignment {
    /// Write `value` into every row of `field`.
    pub fn constant(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            values: ColumnValues::Constant(value.into()),
        }
    }

    /// Write `values` row by row into `field`.
    pub fn per_row(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            values: ColumnValues::PerRow(values),
        }
    }

    /// Apply to an output record set. Returns false if the field does not exist.
    pub fn apply(&self, records: &mut RecordSet) -> bool {
        match &self.values {
            ColumnValues::Constant(value) => records.fill_column(&self.field, value),
            ColumnValues::PerRow(values) => records.assign_column(&self.field, values),
        }
    }
}

/// What a rule wants written, plus anything the operator should know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutput {
    pub assignments: Vec<Assignment>,
    pub warnings: Vec<String>,
}

impl RuleOutput {
    /// A rule that has nothing to do.
    pub fn none() -> Self {
        Self::default()
    }

    /// Output with the given assignments and no warnings.
    pub fn assign(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments,
            warnings: Vec::new(),
        }
    }

    /// Output with a single warning and no assignments.
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            assignments: Vec::new(),
            warnings: vec![message.into()],
        }
    }

    /// Output fields in assignment order.
    pub fn fields(&self) -> Vec<&str> {
        self.assignments.iter().map(|a| a.field.as_str()).collect()
    }
}

/// Inputs visible to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Cleaned identifier records; one output row per row here.
    pub identifiers: &'a RecordSet,
    /// Descriptive records, aligned to identifier rows by position.
    pub descriptive: &'a RecordSet,
    pub config: &'a Configuration,
    pub credits: Option<&'a TranslationTable>,
}

impl<'a> RuleContext<'a> {
    /// Number of output rows.
    pub fn row_count(&self) -> usize {
        self.identifiers.row_count()
    }

    /// Trimmed text of a descriptive column for every output row.
    ///
    /// Output rows with no descriptive counterpart, and null cells, give null.
    pub fn descriptive_text(&self, category: RuleCategory, column: &str) -> Result<Vec<Value>, RuleError> {
        let values = self.descriptive_column(category, column)?;
        Ok(values
            .into_iter()
            .map(|v| v.trimmed().map(Value::Text).unwrap_or_default())
            .collect())
    }

    /// Raw values of a descriptive column for every output row.
    pub fn descriptive_column(&self, category: RuleCategory, column: &str) -> Result<Vec<Value>, RuleError> {
        let index = self
            .descriptive
            .column_index(column)
            .ok_or_else(|| RuleError::MissingSourceColumn {
                category,
                table: "descriptive".to_string(),
                column: column.to_string(),
            })?;

        let rows: Vec<&[Value]> = self.descriptive.rows().collect();
        Ok((0..self.row_count())
            .map(|i| rows.get(i).map(|r| r[index].clone()).unwrap_or_default())
            .collect())
    }

    /// Raw values of an identifier column.
    pub fn identifier_column(&self, category: RuleCategory, column: &str) -> Result<Vec<&'a Value>, RuleError> {
        self.identifiers
            .column(column)
            .ok_or_else(|| RuleError::MissingSourceColumn {
                category,
                table: "identifier".to_string(),
                column: column.to_string(),
            })
    }
}

/// One category of population logic.
pub trait Rule {
    /// The category this rule populates.
    fn category(&self) -> RuleCategory;

    /// Output fields whose absence from the schema disables this rule for the run.
    fn required_fields(&self) -> &[&'static str] {
        &[]
    }

    /// Whether assignments to existing fields are kept when other fields of
    /// the same output are missing from the schema. When false, any missing
    /// field discards the whole output.
    fn partial_writes(&self) -> bool {
        false
    }

    /// Compute this category's assignments.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError>;
}

/// The standard rule set, in pipeline order.
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FixedValuesRule),
        Box::new(IdentifierFieldsRule),
        Box::new(DateFieldsRule),
        Box::new(TitleRule),
        Box::new(CategoryDefaultsRule),
        Box::new(DescriptionRule),
        Box::new(CultureRule),
        Box::new(CountryRule),
        Box::new(RightsRule),
        Box::new(CreditingRule),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn records(columns: &[&str], rows: &[&[&str]]) -> RecordSet {
        RecordSet::with_rows(
            columns.iter().copied(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| {
                            if cell.is_empty() {
                                Value::Null
                            } else {
                                Value::from(*cell)
                            }
                        })
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    pub fn identifiers(n: usize) -> RecordSet {
        let mut set = RecordSet::new(["FILE-URN", "OBJ-OSN"]);
        for i in 0..n {
            set.push_row(vec![
                Value::from(format!("urn-3:HUL:{}", i)),
                Value::from(format!("obj_{}_x", i)),
            ])
            .unwrap();
        }
        set
    }

    pub fn assignment<'o>(output: &'o RuleOutput, field: &str) -> &'o ColumnValues {
        &output
            .assignments
            .iter()
            .find(|a| a.field == field)
            .unwrap_or_else(|| panic!("no assignment for {}", field))
            .values
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_standard_rule_order() {
        let categories: Vec<RuleCategory> = standard_rules().iter().map(|r| r.category()).collect();
        assert_eq!(
            categories,
            vec![
                RuleCategory::FixedValues,
                RuleCategory::IdentifierFields,
                RuleCategory::Dates,
                RuleCategory::Title,
                RuleCategory::CategoryDefaults,
                RuleCategory::Description,
                RuleCategory::Culture,
                RuleCategory::Country,
                RuleCategory::Rights,
                RuleCategory::Crediting,
            ]
        );
    }

    #[test]
    fn test_descriptive_values_align_to_identifier_rows() {
        let ids = identifiers(3);
        let desc = records(&["Title"], &[&[" A "], &[""]]);
        let config = Configuration::new();
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config: &config,
            credits: None,
        };

        let values = ctx.descriptive_text(RuleCategory::Title, "Title").unwrap();
        assert_eq!(values, vec![Value::from("A"), Value::Null, Value::Null]);

        let err = ctx.descriptive_text(RuleCategory::Title, "Nope").unwrap_err();
        assert!(matches!(err, RuleError::MissingSourceColumn { .. }));
    }
}

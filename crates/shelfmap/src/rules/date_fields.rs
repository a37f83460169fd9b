//! Date description and earliest/latest fields.

use indexmap::IndexSet;

use crate::dates::resolve_values;
use crate::error::RuleError;
use crate::record::Value;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

/// Resolves every output row's start/end years into the five date fields.
pub struct DateFieldsRule;

impl Rule for DateFieldsRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Dates
    }

    fn partial_writes(&self) -> bool {
        true
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let (Some(start_col), Some(end_col)) = (
            ctx.config.start_date_column.column(),
            ctx.config.end_date_column.column(),
        ) else {
            return Ok(RuleOutput::none());
        };

        let starts = ctx.descriptive_column(self.category(), start_col)?;
        let ends = ctx.descriptive_column(self.category(), end_col)?;

        let rows = ctx.row_count();
        let described = ctx.descriptive.row_count();
        let mut label = Vec::with_capacity(rows);
        let mut artstor_earliest = Vec::with_capacity(rows);
        let mut artstor_latest = Vec::with_capacity(rows);
        let mut earliest = Vec::with_capacity(rows);
        let mut latest = Vec::with_capacity(rows);
        let mut warnings = IndexSet::new();

        for (i, (start, end)) in starts.iter().zip(&ends).enumerate() {
            // Rows past the descriptive records stay blank
            if i >= described {
                for column in [
                    &mut label,
                    &mut artstor_earliest,
                    &mut artstor_latest,
                    &mut earliest,
                    &mut latest,
                ] {
                    column.push(Value::Null);
                }
                continue;
            }

            let resolved = resolve_values(start, end);
            if let Some(warning) = resolved.warning {
                warnings.insert(warning.message().to_string());
            }
            label.push(Value::from(resolved.label));
            artstor_earliest.push(Value::Integer(resolved.artstor_earliest));
            artstor_latest.push(Value::Integer(resolved.artstor_latest));
            earliest.push(Value::Integer(resolved.earliest));
            latest.push(Value::Integer(resolved.latest));
        }

        Ok(RuleOutput {
            assignments: vec![
                Assignment::per_row(fields::DATE_DESCRIPTION, label),
                Assignment::per_row(fields::ARTSTOR_EARLIEST_DATE, artstor_earliest),
                Assignment::per_row(fields::ARTSTOR_LATEST_DATE, artstor_latest),
                Assignment::per_row(fields::EARLIEST_DATE, earliest),
                Assignment::per_row(fields::LATEST_DATE, latest),
            ],
            warnings: warnings.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::dates::DateWarning;
    use crate::rules::ColumnValues;
    use crate::rules::test_support::*;

    #[test]
    fn test_dates_resolved_per_row() {
        let ids = identifiers(4);
        let desc = records(
            &["Start", "End"],
            &[&["1920", "1925"], &["", ""], &["1930", "1930"], &["", ""]],
        );
        let config = Configuration::new().with_date_columns("Start", "End");
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config: &config,
            credits: None,
        };

        let output = DateFieldsRule.evaluate(&ctx).unwrap();
        assert_eq!(
            assignment(&output, fields::DATE_DESCRIPTION),
            &ColumnValues::PerRow(vec![
                Value::from("1920-1925"),
                Value::from("1900-2025"),
                Value::Integer(1930),
                Value::from("1900-2025"),
            ])
        );
        assert_eq!(
            assignment(&output, fields::LATEST_DATE),
            &ColumnValues::PerRow(vec![
                Value::Integer(1925),
                Value::Integer(2025),
                Value::Integer(1930),
                Value::Integer(2025),
            ])
        );
        // Two defaulted rows, one warning
        assert_eq!(output.warnings, vec![DateWarning::BothMissing.message().to_string()]);
    }

    #[test]
    fn test_rows_without_descriptive_counterpart_stay_blank() {
        let ids = identifiers(3);
        let desc = records(&["Start", "End"], &[&["1950", "1955"]]);
        let config = Configuration::new().with_date_columns("Start", "End");
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config: &config,
            credits: None,
        };

        let output = DateFieldsRule.evaluate(&ctx).unwrap();
        assert_eq!(
            assignment(&output, fields::EARLIEST_DATE),
            &ColumnValues::PerRow(vec![Value::Integer(1950), Value::Null, Value::Null])
        );
        assert_eq!(
            assignment(&output, fields::DATE_DESCRIPTION),
            &ColumnValues::PerRow(vec![Value::from("1950-1955"), Value::Null, Value::Null])
        );
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_unselected_columns_are_noop() {
        let ids = identifiers(1);
        let desc = records(&["Start"], &[&["1950"]]);
        let config = Configuration::new();
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config: &config,
            credits: None,
        };

        assert_eq!(DateFieldsRule.evaluate(&ctx).unwrap(), RuleOutput::none());
    }
}

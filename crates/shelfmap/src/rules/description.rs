//! General note / description.

use crate::config::NoteSource;
use crate::error::RuleError;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

const INVALID_SOURCE: &str = "Please select a valid General Note source or text";

/// Fills the description from a column, an empty note, or literal text.
pub struct DescriptionRule;

impl Rule for DescriptionRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Description
    }

    fn required_fields(&self) -> &[&'static str] {
        &[fields::DESCRIPTION]
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let Some(source) = ctx.config.note_source.get() else {
            return Ok(RuleOutput::none());
        };

        let assignment = match source {
            NoteSource::Column { column } => match column.as_deref().map(str::trim) {
                Some(column) if !column.is_empty() => Assignment::per_row(
                    fields::DESCRIPTION,
                    ctx.descriptive_text(self.category(), column)?,
                ),
                _ => return Ok(RuleOutput::warn(INVALID_SOURCE)),
            },
            NoteSource::NoNote => Assignment::constant(fields::DESCRIPTION, ""),
            NoteSource::Literal { text } if !text.trim().is_empty() => {
                Assignment::constant(fields::DESCRIPTION, text.as_str())
            }
            NoteSource::Literal { .. } => return Ok(RuleOutput::warn(INVALID_SOURCE)),
        };

        Ok(RuleOutput::assign(vec![assignment]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::record::{RecordSet, Value};
    use crate::rules::ColumnValues;
    use crate::rules::test_support::*;

    fn run(source: NoteSource, desc: &RecordSet) -> Result<RuleOutput, RuleError> {
        let ids = identifiers(desc.row_count().max(1));
        let config = Configuration::new().with_note_source(source);
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: desc,
            config: &config,
            credits: None,
        };
        DescriptionRule.evaluate(&ctx)
    }

    #[test]
    fn test_column_source_trimmed() {
        let desc = records(&["Note"], &[&["  Printed in Tel Aviv. "]]);
        let output = run(
            NoteSource::Column {
                column: Some("Note".into()),
            },
            &desc,
        )
        .unwrap();
        assert_eq!(
            assignment(&output, fields::DESCRIPTION),
            &ColumnValues::PerRow(vec![Value::from("Printed in Tel Aviv.")])
        );
    }

    #[test]
    fn test_no_note_forces_empty() {
        let output = run(NoteSource::NoNote, &RecordSet::default()).unwrap();
        assert_eq!(
            assignment(&output, fields::DESCRIPTION),
            &ColumnValues::Constant(Value::from(""))
        );
    }

    #[test]
    fn test_literal_text() {
        let output = run(
            NoteSource::Literal {
                text: "Gift of the artist".into(),
            },
            &RecordSet::default(),
        )
        .unwrap();
        assert_eq!(
            assignment(&output, fields::DESCRIPTION),
            &ColumnValues::Constant(Value::from("Gift of the artist"))
        );
    }

    #[test]
    fn test_column_without_name_warns() {
        let output = run(NoteSource::Column { column: None }, &RecordSet::default()).unwrap();
        assert!(output.assignments.is_empty());
        assert_eq!(output.warnings, vec![INVALID_SOURCE.to_string()]);
    }

    #[test]
    fn test_blank_literal_warns() {
        let output = run(NoteSource::Literal { text: " ".into() }, &RecordSet::default()).unwrap();
        assert!(output.assignments.is_empty());
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_missing_note_column() {
        let desc = records(&["Title"], &[&["x"]]);
        let err = run(
            NoteSource::Column {
                column: Some("Note".into()),
            },
            &desc,
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::MissingSourceColumn { .. }));
    }
}

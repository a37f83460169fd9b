//! Rights statement and crediting note.

use tracing::debug;

use crate::config::{CreditSource, RightsSource};
use crate::error::RuleError;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

/// Writes the rights text into both rights fields.
pub struct RightsRule;

impl Rule for RightsRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Rights
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let text = match ctx.config.rights_source.get() {
            Some(RightsSource::Standard) => ctx.config.profile.standard_rights.as_str(),
            Some(RightsSource::Custom { text }) => text.as_str(),
            None => return Ok(RuleOutput::none()),
        };

        if text.trim().is_empty() {
            return Ok(RuleOutput::warn("Please enter Copyright Information"));
        }

        // Same statement, two audiences
        Ok(RuleOutput::assign(vec![
            Assignment::constant(fields::RIGHTS, text),
            Assignment::constant(fields::RIGHTS_ACCESS_INFORMATION, text),
        ]))
    }
}

/// Writes the crediting note from the translation table or free text.
pub struct CreditingRule;

impl Rule for CreditingRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Crediting
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let text = match ctx.config.credit_source.get() {
            Some(CreditSource::Table { source }) => {
                let Some(table) = ctx.credits else {
                    return Ok(RuleOutput::warn(
                        "No valid Crediting-Notes Translation Table available",
                    ));
                };
                match table.lookup(source) {
                    Some(notes) => {
                        debug!(source = %source, "crediting note found");
                        notes
                    }
                    None => {
                        return Ok(RuleOutput::warn(format!(
                            "Selected source '{}' has no corresponding note in the table",
                            source
                        )));
                    }
                }
            }
            Some(CreditSource::Other { text }) => text.as_str(),
            None => return Ok(RuleOutput::none()),
        };

        if text.trim().is_empty() {
            return Ok(RuleOutput::warn("Crediting Note cannot be blank"));
        }

        Ok(RuleOutput::assign(vec![Assignment::constant(fields::NOTES, text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::input::{TranslationEntry, TranslationTable};
    use crate::record::{RecordSet, Value};
    use crate::rules::ColumnValues;
    use crate::rules::test_support::*;

    fn credits() -> TranslationTable {
        TranslationTable::new([
            TranslationEntry {
                source: "Purchase".into(),
                notes: "".into(),
            },
            TranslationEntry {
                source: "Purchase".into(),
                notes: "Purchased with the Judaica Fund".into(),
            },
            TranslationEntry {
                source: "Blank".into(),
                notes: "".into(),
            },
        ])
    }

    fn run_crediting(source: CreditSource, table: Option<&TranslationTable>) -> RuleOutput {
        let ids = identifiers(1);
        let desc = RecordSet::default();
        let config = Configuration::new().with_credit_source(source);
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config: &config,
            credits: table,
        };
        CreditingRule.evaluate(&ctx).unwrap()
    }

    fn run_rights(source: RightsSource) -> RuleOutput {
        let ids = identifiers(1);
        let desc = RecordSet::default();
        let config = Configuration::new().with_rights_source(source);
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config: &config,
            credits: None,
        };
        RightsRule.evaluate(&ctx).unwrap()
    }

    #[test]
    fn test_standard_rights_written_twice() {
        let output = run_rights(RightsSource::Standard);
        let standard = Configuration::new().profile.standard_rights;
        assert_eq!(
            assignment(&output, fields::RIGHTS),
            assignment(&output, fields::RIGHTS_ACCESS_INFORMATION)
        );
        assert_eq!(
            assignment(&output, fields::RIGHTS),
            &ColumnValues::Constant(Value::from(standard))
        );
    }

    #[test]
    fn test_blank_custom_rights_warns() {
        let output = run_rights(RightsSource::Custom { text: "".into() });
        assert!(output.assignments.is_empty());
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_table_lookup_first_non_blank() {
        let table = credits();
        let output = run_crediting(
            CreditSource::Table {
                source: "Purchase".into(),
            },
            Some(&table),
        );
        assert_eq!(
            assignment(&output, fields::NOTES),
            &ColumnValues::Constant(Value::from("Purchased with the Judaica Fund"))
        );
    }

    #[test]
    fn test_unmatched_key_is_warning() {
        let table = credits();
        let output = run_crediting(
            CreditSource::Table {
                source: "Blank".into(),
            },
            Some(&table),
        );
        assert!(output.assignments.is_empty());
        assert!(output.warnings[0].contains("no corresponding note"));
    }

    #[test]
    fn test_other_bypasses_table() {
        let output = run_crediting(
            CreditSource::Other {
                text: "Courtesy of the family".into(),
            },
            None,
        );
        assert_eq!(
            assignment(&output, fields::NOTES),
            &ColumnValues::Constant(Value::from("Courtesy of the family"))
        );
    }

    #[test]
    fn test_table_choice_without_table_warns() {
        let output = run_crediting(
            CreditSource::Table {
                source: "Purchase".into(),
            },
            None,
        );
        assert!(output.assignments.is_empty());
        assert_eq!(output.warnings.len(), 1);
    }
}

//! Fields derived from the identifier records.

use crate::error::RuleError;
use crate::record::Value;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

/// Upper-case a secondary code and drop its first underscore only.
///
/// `"obj_123_abc"` becomes `"OBJ123_ABC"`; later underscores are kept.
pub fn normalize_secondary_code(code: &str) -> String {
    code.to_uppercase().replacen('_', "", 1)
}

/// Filename and classification numbers.
pub struct IdentifierFieldsRule;

impl Rule for IdentifierFieldsRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::IdentifierFields
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let profile = &ctx.config.profile;
        let identifiers = ctx.identifier_column(self.category(), &profile.identifier_column)?;
        let codes = ctx.identifier_column(self.category(), &profile.secondary_code_column)?;

        let filenames: Vec<Value> = identifiers
            .iter()
            .map(|id| match id.trimmed() {
                Some(id) => Value::Text(format!("{}{}", profile.filename_prefix, id)),
                None => Value::Null,
            })
            .collect();

        let normalized: Vec<Option<String>> = codes
            .iter()
            .map(|code| code.trimmed().map(|c| normalize_secondary_code(&c)))
            .collect();

        let classification: Vec<Value> = normalized.iter().cloned().map(Value::from).collect();
        let repository_numbers: Vec<Value> = normalized
            .iter()
            .map(|code| match code {
                Some(code) => Value::Text(format!("{}{}", code, profile.classification_suffix)),
                None => Value::Null,
            })
            .collect();

        Ok(RuleOutput::assign(vec![
            Assignment::per_row(fields::FILENAME, filenames),
            Assignment::per_row(fields::REPOSITORY_CLASSIFICATION_NUMBER, classification.clone()),
            Assignment::per_row(fields::IMAGE_CLASSIFICATION_NUMBER, classification),
            Assignment::per_row(fields::REPOSITORY_NUMBER, repository_numbers),
        ]))
    }
}

//! Controlled-vocabulary defaults per metadata category.

use crate::config::MetadataCategory;
use crate::error::RuleError;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

const POSTER_DEFAULTS: &[(&str, &str)] = &[
    (fields::MATERIALS_TECHNIQUES, "posters"),
    (fields::WORK_TYPE, "posters"),
    (fields::MATERIALS_TECHNIQUES_NOTE, "posters"),
];

const EPHEMERA_DEFAULTS: &[(&str, &str)] = &[
    (fields::MATERIALS_TECHNIQUES, "ephemera"),
    (fields::WORK_TYPE, "ephemera"),
    (fields::MATERIALS_TECHNIQUES_NOTE, "ephemera"),
];

/// Field constants for a category; empty when the category has none.
pub fn category_defaults(category: MetadataCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        MetadataCategory::Posters => POSTER_DEFAULTS,
        MetadataCategory::Ephemera => EPHEMERA_DEFAULTS,
        MetadataCategory::Memorabilia => &[],
    }
}

/// Writes the category's materials and work type vocabulary.
pub struct CategoryDefaultsRule;

impl Rule for CategoryDefaultsRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::CategoryDefaults
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let Some(&category) = ctx.config.metadata_category.get() else {
            return Ok(RuleOutput::none());
        };

        Ok(RuleOutput::assign(
            category_defaults(category)
                .iter()
                .map(|&(field, value)| Assignment::constant(field, value))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::record::{RecordSet, Value};
    use crate::rules::ColumnValues;
    use crate::rules::test_support::*;

    fn run(config: &Configuration) -> RuleOutput {
        let ids = identifiers(1);
        let desc = RecordSet::default();
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: &desc,
            config,
            credits: None,
        };
        CategoryDefaultsRule.evaluate(&ctx).unwrap()
    }

    #[test]
    fn test_poster_vocabulary() {
        let output = run(&Configuration::new().with_metadata_category(MetadataCategory::Posters));
        assert_eq!(output.fields().len(), 3);
        assert_eq!(
            assignment(&output, fields::WORK_TYPE),
            &ColumnValues::Constant(Value::from("posters"))
        );
    }

    #[test]
    fn test_memorabilia_silently_skipped() {
        let output = run(&Configuration::new().with_metadata_category(MetadataCategory::Memorabilia));
        assert_eq!(output, RuleOutput::none());
    }
}

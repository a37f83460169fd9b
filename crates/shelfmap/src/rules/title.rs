//! Title composition.

use crate::config::{Cataloging, MetadataCategory};
use crate::error::RuleError;
use crate::record::Value;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

/// How a source title becomes an output title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleForm {
    /// Use the trimmed source title as is.
    Unchanged,
    /// Append a marker to the trimmed source title.
    Suffix(&'static str),
}

impl TitleForm {
    /// Compose one output title.
    pub fn apply(&self, title: &str) -> String {
        match self {
            TitleForm::Unchanged => title.to_string(),
            TitleForm::Suffix(suffix) => format!("{}{}", title, suffix),
        }
    }
}

/// Title forms by (category, cataloging). Pairs not listed have no title rule.
const TITLE_FORMS: &[((MetadataCategory, Cataloging), TitleForm)] = &[
    ((MetadataCategory::Posters, Cataloging::Full), TitleForm::Unchanged),
    (
        (MetadataCategory::Posters, Cataloging::Provisional),
        TitleForm::Suffix(" - poster (Cataloging in progress)"),
    ),
    ((MetadataCategory::Ephemera, Cataloging::Full), TitleForm::Unchanged),
    (
        (MetadataCategory::Ephemera, Cataloging::Provisional),
        TitleForm::Suffix(" - ephemera item (Cataloging in progress)"),
    ),
];

/// Look up the title form for a category and cataloging type.
pub fn title_form(category: MetadataCategory, cataloging: Cataloging) -> Option<TitleForm> {
    TITLE_FORMS
        .iter()
        .find(|(key, _)| *key == (category, cataloging))
        .map(|(_, form)| *form)
}

/// Writes the composed title for every row.
pub struct TitleRule;

impl Rule for TitleRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Title
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let config = ctx.config;
        let (Some(column), Some(&category), Some(&cataloging)) = (
            config.title_column.column(),
            config.metadata_category.get(),
            config.cataloging.get(),
        ) else {
            return Ok(RuleOutput::none());
        };

        let titles = ctx.descriptive_text(self.category(), column)?;

        let Some(form) = title_form(category, cataloging) else {
            return Ok(RuleOutput::warn(format!(
                "unknown cataloging type for {} / {}; titles left blank",
                category, cataloging
            )));
        };

        let composed = titles
            .into_iter()
            .map(|title| match title {
                Value::Text(text) => Value::Text(form.apply(&text)),
                other => other,
            })
            .collect();

        Ok(RuleOutput::assign(vec![Assignment::per_row(fields::TITLE, composed)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::record::RecordSet;
    use crate::rules::ColumnValues;
    use crate::rules::test_support::*;

    fn run(config: &Configuration, desc: &RecordSet) -> RuleOutput {
        let ids = identifiers(desc.row_count());
        let ctx = RuleContext {
            identifiers: &ids,
            descriptive: desc,
            config,
            credits: None,
        };
        TitleRule.evaluate(&ctx).unwrap()
    }

    #[test]
    fn test_provisional_poster_suffix() {
        let desc = records(&["Title"], &[&["  Spring Fair "]]);
        let config = Configuration::new()
            .with_title_column("Title")
            .with_metadata_category(MetadataCategory::Posters)
            .with_cataloging(Cataloging::Provisional);

        let output = run(&config, &desc);
        assert_eq!(
            assignment(&output, fields::TITLE),
            &ColumnValues::PerRow(vec![Value::from(
                "Spring Fair - poster (Cataloging in progress)"
            )])
        );
    }

    #[test]
    fn test_full_cataloging_unchanged() {
        let desc = records(&["Title"], &[&["Spring Fair"]]);
        let config = Configuration::new()
            .with_title_column("Title")
            .with_metadata_category(MetadataCategory::Posters)
            .with_cataloging(Cataloging::Full);

        let output = run(&config, &desc);
        assert_eq!(
            assignment(&output, fields::TITLE),
            &ColumnValues::PerRow(vec![Value::from("Spring Fair")])
        );
    }

    #[test]
    fn test_ephemera_suffix() {
        assert_eq!(
            title_form(MetadataCategory::Ephemera, Cataloging::Provisional)
                .unwrap()
                .apply("Ticket"),
            "Ticket - ephemera item (Cataloging in progress)"
        );
    }

    #[test]
    fn test_category_without_form_warns() {
        let desc = records(&["Title"], &[&["Medal"]]);
        let config = Configuration::new()
            .with_title_column("Title")
            .with_metadata_category(MetadataCategory::Memorabilia)
            .with_cataloging(Cataloging::Provisional);

        let output = run(&config, &desc);
        assert!(output.assignments.is_empty());
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("unknown cataloging type"));
    }

    #[test]
    fn test_null_titles_stay_null() {
        let desc = records(&["Title"], &[&[""]]);
        let config = Configuration::new()
            .with_title_column("Title")
            .with_metadata_category(MetadataCategory::Posters)
            .with_cataloging(Cataloging::Provisional);

        let output = run(&config, &desc);
        assert_eq!(
            assignment(&output, fields::TITLE),
            &ColumnValues::PerRow(vec![Value::Null])
        );
    }

    #[test]
    fn test_missing_selection_is_noop() {
        let desc = records(&["Title"], &[&["x"]]);
        let config = Configuration::new().with_title_column("Title");
        assert_eq!(run(&config, &desc), RuleOutput::none());
    }
}

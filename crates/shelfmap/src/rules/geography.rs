//! Culture and country.

use crate::config::GeographicScope;
use crate::error::RuleError;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

/// Culture constant chosen by geographic scope.
pub struct CultureRule;

impl Rule for CultureRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Culture
    }

    fn required_fields(&self) -> &[&'static str] {
        &[fields::CULTURE]
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let profile = &ctx.config.profile;
        let culture = match ctx.config.geographic_scope.get() {
            Some(GeographicScope::Regional) => &profile.regional_culture,
            Some(GeographicScope::World) => &profile.world_culture,
            None => return Ok(RuleOutput::none()),
        };

        Ok(RuleOutput::assign(vec![Assignment::constant(
            fields::CULTURE,
            culture.as_str(),
        )]))
    }
}

/// Country: a constant for regional scope, a descriptive column for world scope.
pub struct CountryRule;

impl Rule for CountryRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::Country
    }

    fn required_fields(&self) -> &[&'static str] {
        &[fields::ARTSTOR_COUNTRY]
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let assignment = match ctx.config.geographic_scope.get() {
            Some(GeographicScope::Regional) => Assignment::constant(
                fields::ARTSTOR_COUNTRY,
                ctx.config.profile.regional_country.as_str(),
            ),
            Some(GeographicScope::World) => match ctx.config.country_column.column() {
                Some(column) => Assignment::per_row(
                    fields::ARTSTOR_COUNTRY,
                    ctx.descriptive_text(self.category(), column)?,
                ),
                None => return Ok(RuleOutput::none()),
            },
            None => return Ok(RuleOutput::none()),
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

    fn context<'a>(ids: &'a RecordSet, desc: &'a RecordSet, config: &'a Configuration) -> RuleContext<'a> {
        RuleContext {
            identifiers: ids,
            descriptive: desc,
            config,
            credits: None,
        }
    }

    #[test]
    fn test_culture_by_scope() {
        let ids = identifiers(1);
        let desc = RecordSet::default();

        let regional = Configuration::new().with_geographic_scope(GeographicScope::Regional);
        let output = CultureRule.evaluate(&context(&ids, &desc, &regional)).unwrap();
        assert_eq!(
            assignment(&output, fields::CULTURE),
            &ColumnValues::Constant(Value::from("Israeli"))
        );

        let world = Configuration::new().with_geographic_scope(GeographicScope::World);
        let output = CultureRule.evaluate(&context(&ids, &desc, &world)).unwrap();
        assert_eq!(
            assignment(&output, fields::CULTURE),
            &ColumnValues::Constant(Value::from("Jewish"))
        );
    }

    #[test]
    fn test_regional_country_constant() {
        let ids = identifiers(2);
        let desc = RecordSet::default();
        let config = Configuration::new().with_geographic_scope(GeographicScope::Regional);

        let output = CountryRule.evaluate(&context(&ids, &desc, &config)).unwrap();
        assert_eq!(
            assignment(&output, fields::ARTSTOR_COUNTRY),
            &ColumnValues::Constant(Value::from("Israel"))
        );
    }

    #[test]
    fn test_world_country_from_column() {
        let ids = identifiers(2);
        let desc = records(&["Country"], &[&[" Poland "], &["Morocco"]]);
        let config = Configuration::new()
            .with_geographic_scope(GeographicScope::World)
            .with_country_column("Country");

        let output = CountryRule.evaluate(&context(&ids, &desc, &config)).unwrap();
        assert_eq!(
            assignment(&output, fields::ARTSTOR_COUNTRY),
            &ColumnValues::PerRow(vec![Value::from("Poland"), Value::from("Morocco")])
        );
    }

    #[test]
    fn test_world_without_column_left_unset() {
        let ids = identifiers(1);
        let desc = RecordSet::default();
        let config = Configuration::new().with_geographic_scope(GeographicScope::World);

        let output = CountryRule.evaluate(&context(&ids, &desc, &config)).unwrap();
        assert_eq!(output, RuleOutput::none());
    }
}

//! Fixed constants written into every output row.

use crate::error::RuleError;
use crate::record::Value;
use crate::schema::fields;

use super::{Assignment, Rule, RuleCategory, RuleContext, RuleOutput};

/// Record id, file count, repository and publication flags.
pub struct FixedValuesRule;

impl Rule for FixedValuesRule {
    fn category(&self) -> RuleCategory {
        RuleCategory::FixedValues
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<RuleOutput, RuleError> {
        let repository = ctx.config.profile.repository.as_str();

        Ok(RuleOutput::assign(vec![
            Assignment::constant(fields::SSID, "NEW"),
            Assignment::constant(fields::FILE_COUNT, Value::Integer(1)),
            Assignment::constant(fields::REPOSITORY, repository),
            Assignment::constant(fields::IMAGE_REPOSITORY, repository),
            Assignment::constant(fields::SEND_TO_HARVARD, true),
            Assignment::constant(fields::IN_HOUSE_USE_ONLY, false),
            Assignment::constant(fields::EXPORT_ONLY_IN_GROUP, false),
        ]))
    }
}

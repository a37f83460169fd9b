//! Population pipeline.
//!
//! Runs every rule category against the input record sets in a fixed order
//! and assembles the output template. A failing category is recorded in its
//! [`CategoryOutcome`] and never stops the categories after it.

mod report;

use indexmap::IndexSet;
use tracing::{debug, error, info, info_span, warn};

use crate::config::Configuration;
use crate::error::{Result, RuleError};
use crate::input::TranslationTable;
use crate::reconcile::{ReconciliationReport, reconcile_record_sets};
use crate::record::RecordSet;
use crate::rules::{Rule, RuleContext, standard_rules};
use crate::schema::OutputSchema;

pub use report::{CategoryOutcome, DEFAULT_PREVIEW_ROWS, PopulationReport};

/// Record sets and lookup tables for one run.
#[derive(Debug, Clone, Copy)]
pub struct PopulationInputs<'a> {
    /// Cleaned identifier records.
    pub identifiers: &'a RecordSet,
    pub descriptive: &'a RecordSet,
    pub schema: &'a OutputSchema,
    /// Crediting translation table, if one was loaded.
    pub credits: Option<&'a TranslationTable>,
}

impl<'a> PopulationInputs<'a> {
    /// Inputs without a translation table.
    pub fn new(identifiers: &'a RecordSet, descriptive: &'a RecordSet, schema: &'a OutputSchema) -> Self {
        Self {
            identifiers,
            descriptive,
            schema,
            credits: None,
        }
    }

    /// Attach the crediting translation table.
    pub fn with_credits(mut self, credits: &'a TranslationTable) -> Self {
        self.credits = Some(credits);
        self
    }
}

/// Ordered set of rules applied to every run.
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    /// Create a pipeline with the standard rule set.
    pub fn new() -> Self {
        Self::with_rules(standard_rules())
    }

    /// Create a pipeline with a custom rule set, run in the given order.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the pipeline has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compare the input record sets on the configured match keys.
    ///
    /// Returns `None` while either match key is unselected.
    pub fn reconcile(
        &self,
        inputs: &PopulationInputs<'_>,
        config: &Configuration,
    ) -> Result<Option<ReconciliationReport>> {
        let (Some(id_key), Some(desc_key)) = (
            config.identifier_key.column(),
            config.descriptive_key.column(),
        ) else {
            debug!("match keys not selected; skipping reconciliation");
            return Ok(None);
        };

        reconcile_record_sets(inputs.identifiers, id_key, inputs.descriptive, desc_key).map(Some)
    }

    /// Populate the output template.
    pub fn run(&self, inputs: &PopulationInputs<'_>, config: &Configuration) -> PopulationReport {
        let rows = inputs.identifiers.row_count();
        let span = info_span!("populate", rows, fields = inputs.schema.len());
        let _enter = span.enter();

        info!(
            identifiers = rows,
            descriptive = inputs.descriptive.row_count(),
            "starting population"
        );

        let mut output = inputs.schema.blank_records(rows);
        let ctx = RuleContext {
            identifiers: inputs.identifiers,
            descriptive: inputs.descriptive,
            config,
            credits: inputs.credits,
        };

        let mut outcomes = Vec::with_capacity(self.rules.len());
        let mut warnings = IndexSet::new();

        for rule in &self.rules {
            let outcome = run_rule(rule.as_ref(), &ctx, inputs.schema, &mut output);

            for message in &outcome.warnings {
                if warnings.insert(message.clone()) {
                    warn!(category = %outcome.category, "{}", message);
                }
            }
            for err in &outcome.errors {
                error!(category = %outcome.category, severity = err.severity().label(), "{}", err);
            }
            debug!(
                category = %outcome.category,
                fields = ?outcome.fields_written,
                "category finished"
            );

            outcomes.push(outcome);
        }

        let missing_selections = config.missing_selections();
        let errors: usize = outcomes.iter().map(|o| o.errors.len()).sum();
        info!(
            rows = output.row_count(),
            warnings = warnings.len(),
            errors,
            missing_selections = missing_selections.len(),
            "population finished"
        );

        PopulationReport {
            output,
            outcomes,
            warnings,
            missing_selections,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn run_rule(
    rule: &dyn Rule,
    ctx: &RuleContext<'_>,
    schema: &OutputSchema,
    output: &mut RecordSet,
) -> CategoryOutcome {
    let category = rule.category();
    let mut outcome = CategoryOutcome::new(category);

    if let Some(field) = rule.required_fields().iter().find(|f| !schema.contains(f)) {
        outcome.errors.push(RuleError::MissingRequiredField {
            category,
            field: field.to_string(),
        });
        return outcome;
    }

    let result = match rule.evaluate(ctx) {
        Ok(result) => result,
        Err(err) => {
            outcome.errors.push(err);
            return outcome;
        }
    };
    outcome.warnings = result.warnings;

    let unknown: Vec<String> = result
        .assignments
        .iter()
        .filter(|a| !schema.contains(&a.field))
        .map(|a| a.field.clone())
        .collect();

    if !unknown.is_empty() {
        outcome.errors.push(RuleError::UnknownFields {
            category,
            fields: unknown,
        });
        if !rule.partial_writes() {
            return outcome;
        }
    }

    for assignment in &result.assignments {
        if assignment.apply(output) && !outcome.fields_written.contains(&assignment.field) {
            outcome.fields_written.push(assignment.field.clone());
        }
    }

    outcome
}

//! Main Shelfmap struct and file-based API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Configuration;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata, TranslationTable, clean_identifiers};
use crate::pipeline::{Pipeline, PopulationInputs, PopulationReport};
use crate::reconcile::ReconciliationReport;
use crate::record::RecordSet;
use crate::schema::OutputSchema;

/// Files read for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    /// File-identifier registry export.
    pub identifiers: PathBuf,
    /// Descriptive metadata catalog.
    pub descriptive: PathBuf,
    /// Template whose header row defines the output schema (None = SharedShelf default).
    pub template: Option<PathBuf>,
    /// Crediting-notes translation table.
    pub credits: Option<PathBuf>,
}

impl RunFiles {
    /// Identifier and descriptive files with the default template and no credits table.
    pub fn new(identifiers: impl Into<PathBuf>, descriptive: impl Into<PathBuf>) -> Self {
        Self {
            identifiers: identifiers.into(),
            descriptive: descriptive.into(),
            template: None,
            credits: None,
        }
    }

    /// Use a template file for the output schema.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// Use a crediting-notes translation table.
    pub fn with_credits(mut self, path: impl Into<PathBuf>) -> Self {
        self.credits = Some(path.into());
        self
    }
}

/// Provenance of every file read for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSources {
    pub identifiers: SourceMetadata,
    pub descriptive: SourceMetadata,
    pub template: Option<SourceMetadata>,
    pub credits: Option<SourceMetadata>,
}

/// Result of loading and reconciling the two input record sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub sources: RunSources,
    /// Identifier rows removed for a blank identifier.
    pub dropped_identifier_rows: usize,
    /// `None` while either match key is unselected.
    pub reconciliation: Option<ReconciliationReport>,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub validation: ValidationResult,
    pub population: PopulationReport,
}

/// Record sets loaded for a run.
struct LoadedInputs {
    identifiers: RecordSet,
    descriptive: RecordSet,
    schema: OutputSchema,
    credits: Option<TranslationTable>,
    sources: RunSources,
    dropped: usize,
}

impl LoadedInputs {
    fn population_inputs(&self) -> PopulationInputs<'_> {
        let inputs = PopulationInputs::new(&self.identifiers, &self.descriptive, &self.schema);
        match &self.credits {
            Some(credits) => inputs.with_credits(credits),
            None => inputs,
        }
    }
}

/// The file-based population engine.
pub struct Shelfmap {
    parser: ParserConfig,
    pipeline: Pipeline,
}

impl Shelfmap {
    /// Create an engine with the standard rule set.
    pub fn new() -> Self {
        Self::with_parser(ParserConfig::default())
    }

    /// Create an engine with a custom parser configuration.
    pub fn with_parser(parser: ParserConfig) -> Self {
        Self {
            parser,
            pipeline: Pipeline::new(),
        }
    }

    /// Replace the rule pipeline.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Load the inputs and compare them on the configured match keys.
    pub fn validate(&self, files: &RunFiles, config: &Configuration) -> Result<ValidationResult> {
        let loaded = self.load(files, config)?;
        let reconciliation = self.pipeline.reconcile(&loaded.population_inputs(), config)?;

        Ok(ValidationResult {
            sources: loaded.sources,
            dropped_identifier_rows: loaded.dropped,
            reconciliation,
        })
    }

    /// Load, reconcile and populate.
    pub fn run(&self, files: &RunFiles, config: &Configuration) -> Result<RunResult> {
        let loaded = self.load(files, config)?;
        let inputs = loaded.population_inputs();

        let reconciliation = self.pipeline.reconcile(&inputs, config)?;
        let population = self.pipeline.run(&inputs, config);

        Ok(RunResult {
            validation: ValidationResult {
                sources: loaded.sources.clone(),
                dropped_identifier_rows: loaded.dropped,
                reconciliation,
            },
            population,
        })
    }

    fn load(&self, files: &RunFiles, config: &Configuration) -> Result<LoadedInputs> {
        let parser = Parser::with_config(self.parser.clone());

        let (raw_identifiers, identifier_source) = parser.parse_file(&files.identifiers)?;
        let cleaned = clean_identifiers(raw_identifiers, &config.profile.identifier_column)?;
        let (descriptive, descriptive_source) = parser.parse_file(&files.descriptive)?;

        let (schema, template_source) = match &files.template {
            Some(path) => {
                let (template, source) = self.parse_template(path)?;
                (OutputSchema::from_record_set(&template), Some(source))
            }
            None => (OutputSchema::shared_shelf(), None),
        };

        let (credits, credits_source) = match &files.credits {
            Some(path) => {
                let (table, source) = self.load_credits(path)?;
                (Some(table), Some(source))
            }
            None => (None, None),
        };

        info!(
            identifiers = cleaned.records.row_count(),
            dropped = cleaned.dropped,
            descriptive = descriptive.row_count(),
            fields = schema.len(),
            credits = credits.as_ref().map_or(0, TranslationTable::len),
            "loaded inputs"
        );

        Ok(LoadedInputs {
            identifiers: cleaned.records,
            descriptive,
            schema,
            credits,
            sources: RunSources {
                identifiers: identifier_source,
                descriptive: descriptive_source,
                template: template_source,
                credits: credits_source,
            },
            dropped: cleaned.dropped,
        })
    }

    /// Load a crediting-notes translation table.
    pub fn load_credits(&self, path: impl AsRef<Path>) -> Result<(TranslationTable, SourceMetadata)> {
        let (table, source) = Parser::with_config(self.parser.clone()).parse_file(path)?;
        Ok((TranslationTable::from_record_set(&table)?, source))
    }

    fn parse_template(&self, path: &Path) -> Result<(RecordSet, SourceMetadata)> {
        Parser::with_config(self.parser.clone().allowing_empty()).parse_file(path)
    }
}

impl Default for Shelfmap {
    fn default() -> Self {
        Self::new()
    }
}

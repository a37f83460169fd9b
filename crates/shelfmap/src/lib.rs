//! Shelfmap: populate fixed-schema cataloging templates from a file-identifier
//! registry and a descriptive metadata catalog.
//!
//! # Overview
//!
//! - **Reconciliation**: compare the two record sets on operator-chosen match
//!   keys and report advisory mismatches
//! - **Population**: run rule categories (fixed values, identifiers, dates,
//!   title, category defaults, description, geography, rights, crediting)
//!   against the record sets, isolating failures per category
//! - **Export**: write the populated template once every selection is made
//!
//! # Example
//!
//! ```no_run
//! use shelfmap::{Configuration, RunFiles, Shelfmap};
//!
//! let config = Configuration::load("run.json").unwrap();
//! let files = RunFiles::new("identifiers.csv", "descriptive.csv");
//! let result = Shelfmap::new().run(&files, &config).unwrap();
//!
//! println!("Rows: {}", result.population.output.row_count());
//! println!("Warnings: {}", result.population.warnings.len());
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod rules;
pub mod schema;

mod shelfmap;

pub use crate::shelfmap::{RunFiles, RunResult, RunSources, Shelfmap, ValidationResult};
pub use config::{Configuration, Profile, Selection};
pub use dates::{DateLabel, DateResolution, DateWarning, resolve_dates};
pub use error::{Result, RuleError, Severity, ShelfmapError};
pub use export::ExportFormat;
pub use input::{Parser, SourceMetadata, TranslationTable};
pub use pipeline::{CategoryOutcome, Pipeline, PopulationInputs, PopulationReport};
pub use reconcile::ReconciliationReport;
pub use record::{RecordSet, Value};
pub use rules::{Rule, RuleCategory};
pub use schema::OutputSchema;

//! Operator configuration for a population run.
//!
//! A [`Configuration`] is built once per run and only read by the engine.
//! Every choice is a [`Selection`]; rules whose choices are still
//! [`Selection::Unselected`] do nothing, and
//! [`Configuration::missing_selections`] names what is left to pick.

mod options;
mod profile;
mod selection;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfmapError};

pub use options::{Cataloging, CreditSource, GeographicScope, MetadataCategory, NoteSource, RightsSource};
pub use profile::Profile;
pub use selection::Selection;

/// Names reported by [`Configuration::missing_selections`].
pub mod selection_names {
    pub const IDENTIFIER_KEY: &str = "Match Field for Identifier Records";
    pub const METADATA_CATEGORY: &str = "Metadata Type";
    pub const CATALOGING: &str = "Cataloging Type";
    pub const GEOGRAPHIC_SCOPE: &str = "Geographic Type";
    pub const COUNTRY_COLUMN: &str = "Country Column";
    pub const DESCRIPTIVE_KEY: &str = "Match Field for Descriptive Metadata";
    pub const TITLE_COLUMN: &str = "Title Column";
    pub const START_DATE_COLUMN: &str = "Start Date Column";
    pub const END_DATE_COLUMN: &str = "End Date Column";
    pub const NOTE_SOURCE: &str = "Source for General Note";
    pub const RIGHTS_SOURCE: &str = "Source for Rights";
    pub const CREDIT_SOURCE: &str = "Source for Crediting";
}

/// All operator choices for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Match key column in the identifier records.
    pub identifier_key: Selection<String>,
    /// Match key column in the descriptive records.
    pub descriptive_key: Selection<String>,
    /// Title column in the descriptive records.
    pub title_column: Selection<String>,
    /// Start date column in the descriptive records.
    pub start_date_column: Selection<String>,
    /// End date column in the descriptive records.
    pub end_date_column: Selection<String>,
    /// Country column in the descriptive records, used under world scope.
    pub country_column: Selection<String>,
    pub metadata_category: Selection<MetadataCategory>,
    pub cataloging: Selection<Cataloging>,
    pub geographic_scope: Selection<GeographicScope>,
    pub note_source: Selection<NoteSource>,
    pub rights_source: Selection<RightsSource>,
    pub credit_source: Selection<CreditSource>,
    /// Institution constants.
    pub profile: Profile,
}

impl Configuration {
    /// Create an empty configuration with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both match key columns.
    pub fn with_match_keys(mut self, identifier: impl Into<String>, descriptive: impl Into<String>) -> Self {
        self.identifier_key = Selection::Selected(identifier.into());
        self.descriptive_key = Selection::Selected(descriptive.into());
        self
    }

    /// Set the title column.
    pub fn with_title_column(mut self, column: impl Into<String>) -> Self {
        self.title_column = Selection::Selected(column.into());
        self
    }

    /// Set the start and end date columns.
    pub fn with_date_columns(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date_column = Selection::Selected(start.into());
        self.end_date_column = Selection::Selected(end.into());
        self
    }

    /// Set the country column.
    pub fn with_country_column(mut self, column: impl Into<String>) -> Self {
        self.country_column = Selection::Selected(column.into());
        self
    }

    /// Set the metadata category.
    pub fn with_metadata_category(mut self, category: MetadataCategory) -> Self {
        self.metadata_category = Selection::Selected(category);
        self
    }

    /// Set the cataloging completeness.
    pub fn with_cataloging(mut self, cataloging: Cataloging) -> Self {
        self.cataloging = Selection::Selected(cataloging);
        self
    }

    /// Set the geographic scope.
    pub fn with_geographic_scope(mut self, scope: GeographicScope) -> Self {
        self.geographic_scope = Selection::Selected(scope);
        self
    }

    /// Set the general note source.
    pub fn with_note_source(mut self, source: NoteSource) -> Self {
        self.note_source = Selection::Selected(source);
        self
    }

    /// Set the rights source.
    pub fn with_rights_source(mut self, source: RightsSource) -> Self {
        self.rights_source = Selection::Selected(source);
        self
    }

    /// Set the crediting source.
    pub fn with_credit_source(mut self, source: CreditSource) -> Self {
        self.credit_source = Selection::Selected(source);
        self
    }

    /// Replace the institution profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Names of the selections still missing, in the order an operator makes them.
    ///
    /// The country column only counts as missing under world scope.
    pub fn missing_selections(&self) -> Vec<String> {
        use selection_names as names;

        let mut missing = Vec::new();
        let mut check = |selected: bool, name: &str| {
            if !selected {
                missing.push(name.to_string());
            }
        };

        check(self.identifier_key.column().is_some(), names::IDENTIFIER_KEY);
        check(self.metadata_category.is_selected(), names::METADATA_CATEGORY);
        check(self.cataloging.is_selected(), names::CATALOGING);
        check(self.geographic_scope.is_selected(), names::GEOGRAPHIC_SCOPE);
        if self.geographic_scope.get() == Some(&GeographicScope::World) {
            check(self.country_column.column().is_some(), names::COUNTRY_COLUMN);
        }
        check(self.descriptive_key.column().is_some(), names::DESCRIPTIVE_KEY);
        check(self.title_column.column().is_some(), names::TITLE_COLUMN);
        check(self.start_date_column.column().is_some(), names::START_DATE_COLUMN);
        check(self.end_date_column.column().is_some(), names::END_DATE_COLUMN);
        check(self.note_source.is_selected(), names::NOTE_SOURCE);
        check(self.rights_source.is_selected(), names::RIGHTS_SOURCE);
        check(self.credit_source.is_selected(), names::CREDIT_SOURCE);

        missing
    }

    /// Returns true when every selection has been made.
    pub fn is_complete(&self) -> bool {
        self.missing_selections().is_empty()
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ShelfmapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ShelfmapError::Config(format!(
                "Failed to parse configuration '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ShelfmapError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| ShelfmapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Configuration {
        Configuration::new()
            .with_match_keys("OBJ-OSN", "Call Number")
            .with_metadata_category(MetadataCategory::Posters)
            .with_cataloging(Cataloging::Full)
            .with_geographic_scope(GeographicScope::Regional)
            .with_title_column("Title")
            .with_date_columns("Start", "End")
            .with_note_source(NoteSource::NoNote)
            .with_rights_source(RightsSource::Standard)
            .with_credit_source(CreditSource::Other {
                text: "Gift".into(),
            })
    }

    #[test]
    fn test_empty_configuration_lists_everything() {
        let missing = Configuration::new().missing_selections();
        assert_eq!(missing.len(), 11);
        assert_eq!(missing[0], selection_names::IDENTIFIER_KEY);
        assert!(!missing.iter().any(|m| m == selection_names::COUNTRY_COLUMN));
    }

    #[test]
    fn test_complete_configuration() {
        assert!(complete().is_complete());
    }

    #[test]
    fn test_world_scope_requires_country_column() {
        let config = complete().with_geographic_scope(GeographicScope::World);
        assert_eq!(config.missing_selections(), vec![selection_names::COUNTRY_COLUMN]);

        let config = config.with_country_column("Country");
        assert!(config.is_complete());
    }

    #[test]
    fn test_blank_column_counts_as_missing() {
        let config = complete().with_title_column("   ");
        assert_eq!(config.missing_selections(), vec![selection_names::TITLE_COLUMN]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");

        let config = complete();
        config.save(&path).unwrap();
        let loaded = Configuration::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_deserialize_as_unselected() {
        let config: Configuration =
            serde_json::from_str(r#"{"metadata_category": "ephemera"}"#).unwrap();
        assert_eq!(config.metadata_category.get(), Some(&MetadataCategory::Ephemera));
        assert!(!config.title_column.is_selected());
        assert_eq!(config.profile, Profile::default());
    }
}

//! Institution constants written by the population rules.

use serde::{Deserialize, Serialize};

const STANDARD_RIGHTS: &str = "The President and Fellows of Harvard College make no representation that they are the owner of the copyright; any researcher wishing to make use of an image must therefore assume all responsibility for clearing reproduction rights and for any infringement of Title 17 of the United States Code.";

/// Constants for one holding institution.
///
/// Every field has a default, so a configuration file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Identifier column in the registry records.
    pub identifier_column: String,
    /// Secondary classification code column in the registry records.
    pub secondary_code_column: String,
    /// Prepended to each identifier to build the filename.
    pub filename_prefix: String,
    /// Appended to the normalized code for the repository number.
    pub classification_suffix: String,
    /// Repository written into both repository fields.
    pub repository: String,
    /// Culture for regional scope.
    pub regional_culture: String,
    /// Culture for world scope.
    pub world_culture: String,
    /// Country for regional scope.
    pub regional_country: String,
    /// Standard rights statement.
    pub standard_rights: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            identifier_column: "FILE-URN".to_string(),
            secondary_code_column: "OBJ-OSN".to_string(),
            filename_prefix: "drs:".to_string(),
            classification_suffix: " (classification)".to_string(),
            repository: "Judaica Division, Widener Library[9000347138]".to_string(),
            regional_culture: "Israeli".to_string(),
            world_culture: "Jewish".to_string(),
            regional_country: "Israel".to_string(),
            standard_rights: STANDARD_RIGHTS.to_string(),
        }
    }
}

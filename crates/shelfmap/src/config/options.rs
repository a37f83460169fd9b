//! Enumerated operator choices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of material being cataloged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataCategory {
    Posters,
    Ephemera,
    Memorabilia,
}

impl MetadataCategory {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MetadataCategory::Posters => "Posters",
            MetadataCategory::Ephemera => "Ephemera",
            MetadataCategory::Memorabilia => "Memorabilia",
        }
    }
}

impl fmt::Display for MetadataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How complete the cataloging of a batch is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cataloging {
    /// Full Cataloging: titles are used as given.
    Full,
    /// Provisional Records: titles are marked as work in progress.
    Provisional,
}

impl Cataloging {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Cataloging::Full => "Full Cataloging",
            Cataloging::Provisional => "Provisional Records",
        }
    }
}

impl fmt::Display for Cataloging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Geographic scope of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographicScope {
    /// Items from the collection's home region; country is a fixed constant.
    Regional,
    /// Items from anywhere; country comes from a descriptive column.
    World,
}

impl GeographicScope {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            GeographicScope::Regional => "Regional",
            GeographicScope::World => "World",
        }
    }
}

/// Where the general note / description text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteSource {
    /// Copy from a descriptive column; the column itself may not be chosen yet.
    Column {
        #[serde(default)]
        column: Option<String>,
    },
    /// Write an empty description.
    NoNote,
    /// Write operator-entered text into every row.
    Literal {
        #[serde(default)]
        text: String,
    },
}

/// Where the rights statement comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RightsSource {
    /// The institution's standard boilerplate.
    Standard,
    /// Operator-entered text.
    Custom {
        #[serde(default)]
        text: String,
    },
}

/// Where the crediting note comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreditSource {
    /// Look up a source name in the translation table.
    Table { source: String },
    /// Operator-entered text, bypassing the table.
    Other {
        #[serde(default)]
        text: String,
    },
}

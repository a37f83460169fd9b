//! Loading record sets, translation tables and identifier cleaning.

mod cleaning;
mod parser;
mod source;
mod translation;

pub use cleaning::{CleanedIdentifiers, clean_identifiers};
pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
pub use translation::{TranslationEntry, TranslationTable};

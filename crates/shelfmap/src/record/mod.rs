//! Tabular data model shared by every other module.

mod record_set;
mod value;

pub use record_set::RecordSet;
pub use value::Value;

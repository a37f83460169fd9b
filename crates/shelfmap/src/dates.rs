//! Date range resolution.
//!
//! Each output row carries one date description and two (earliest, latest)
//! pairs. [`resolve_dates`] derives all five from a row's optional start and
//! end years.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Value;

/// Earliest year used when a row has no dates at all.
pub const DEFAULT_EARLIEST: i64 = 1900;
/// Latest year used when a row has no dates at all.
pub const DEFAULT_LATEST: i64 = 2025;

/// The date description: a single year, or a hyphenated range.
///
/// Equal start and end produce a [`DateLabel::Year`], not a one-year range;
/// exports render it as a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLabel {
    Year(i64),
    Range(String),
}

impl From<DateLabel> for Value {
    fn from(label: DateLabel) -> Self {
        match label {
            DateLabel::Year(year) => Value::Integer(year),
            DateLabel::Range(range) => Value::Text(range),
        }
    }
}

/// Why a row's dates were defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWarning {
    StartAfterEnd,
    StartMissing,
    BothMissing,
}

impl DateWarning {
    /// Message surfaced to the operator.
    pub fn message(&self) -> &'static str {
        match self {
            DateWarning::StartAfterEnd => "start later than end; start used as default",
            DateWarning::StartMissing => "start missing; end used as default",
            DateWarning::BothMissing => "both dates missing; defaulted to 1900–2025",
        }
    }
}

impl fmt::Display for DateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The five derived date values of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateResolution {
    pub label: DateLabel,
    pub artstor_earliest: i64,
    pub artstor_latest: i64,
    pub earliest: i64,
    pub latest: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<DateWarning>,
}

impl DateResolution {
    fn single(year: i64, warning: Option<DateWarning>) -> Self {
        Self {
            label: DateLabel::Year(year),
            artstor_earliest: year,
            artstor_latest: year,
            earliest: year,
            latest: year,
            warning,
        }
    }

    fn span(label: DateLabel, start: i64, end: i64, warning: Option<DateWarning>) -> Self {
        Self {
            label,
            artstor_earliest: start,
            artstor_latest: end,
            earliest: start,
            latest: end,
            warning,
        }
    }
}

/// Resolve a row's (start, end) years.
///
/// | start / end         | label          | pairs                    | warning          |
/// |---------------------|----------------|--------------------------|------------------|
/// | start > end         | start          | all start                | start after end  |
/// | start < end         | `"start-end"`  | (start, end) twice       |                  |
/// | start == end        | start          | (start, end) twice       |                  |
/// | start only          | start          | all start                |                  |
/// | end only            | end            | all end                  | start missing    |
/// | neither             | `"1900-2025"`  | (1900, 2025) twice       | both missing     |
pub fn resolve_dates(start: Option<i64>, end: Option<i64>) -> DateResolution {
    match (start, end) {
        (Some(s), Some(e)) if s > e => DateResolution::single(s, Some(DateWarning::StartAfterEnd)),
        (Some(s), Some(e)) if s < e => {
            DateResolution::span(DateLabel::Range(format!("{}-{}", s, e)), s, e, None)
        }
        (Some(s), Some(e)) => DateResolution::span(DateLabel::Year(s), s, e, None),
        (Some(s), None) => DateResolution::single(s, None),
        (None, Some(e)) => DateResolution::single(e, Some(DateWarning::StartMissing)),
        (None, None) => DateResolution::span(
            DateLabel::Range(format!("{}-{}", DEFAULT_EARLIEST, DEFAULT_LATEST)),
            DEFAULT_EARLIEST,
            DEFAULT_LATEST,
            Some(DateWarning::BothMissing),
        ),
    }
}

/// Resolve raw cell values, coercing non-numeric input to absent.
pub fn resolve_values(start: &Value, end: &Value) -> DateResolution {
    resolve_dates(start.as_year(), end.as_year())
}

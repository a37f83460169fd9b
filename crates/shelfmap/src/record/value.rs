//! Scalar cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell in a record set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Free text.
    Text(String),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for null and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Trimmed string form, or `None` for null.
    pub fn trimmed(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Coerce to a whole year.
    ///
    /// Numbers and numeric text are accepted; fractional values are truncated.
    /// Anything else, including non-finite floats, is treated as absent.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) => float_to_year(*f),
            Value::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_year))
            }
            Value::Null | Value::Bool(_) => None,
        }
    }

    /// Rendering used for delimited exports.
    pub fn to_cell_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

fn float_to_year(f: f64) -> Option<i64> {
    if f.is_finite() && f.abs() < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_year_coercion() {
        assert_eq!(Value::Integer(1920).as_year(), Some(1920));
        assert_eq!(Value::Float(1925.0).as_year(), Some(1925));
        assert_eq!(Value::from(" 1930 ").as_year(), Some(1930));
        assert_eq!(Value::from("1931.0").as_year(), Some(1931));
        assert_eq!(Value::from("circa 1930").as_year(), None);
        assert_eq!(Value::from("").as_year(), None);
        assert_eq!(Value::Float(f64::NAN).as_year(), None);
        assert_eq!(Value::Null.as_year(), None);
    }

    #[test]
    fn test_blank_detection() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("   ").is_blank());
        assert!(!Value::from("x").is_blank());
        assert!(!Value::Integer(0).is_blank());
    }

    #[test]
    fn test_cell_rendering() {
        assert_eq!(Value::Null.to_cell_string(), "");
        assert_eq!(Value::Bool(true).to_cell_string(), "True");
        assert_eq!(Value::Bool(false).to_cell_string(), "False");
        assert_eq!(Value::Integer(1).to_cell_string(), "1");
        assert_eq!(Value::from("NEW").to_cell_string(), "NEW");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(Value::from("  Spring Fair ").trimmed().as_deref(), Some("Spring Fair"));
        assert_eq!(Value::Integer(7).trimmed().as_deref(), Some("7"));
        assert_eq!(Value::Null.trimmed(), None);
    }
}

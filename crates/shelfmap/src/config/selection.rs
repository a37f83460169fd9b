//! Operator choices that may not have been made yet.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A configuration choice: either still open or made.
///
/// Serialized as a nullable value, so `null` or a missing key means
/// [`Selection::Unselected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Unselected,
    Selected(T),
}

impl<T> Selection<T> {
    /// Returns true if a value was chosen.
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }

    /// The chosen value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Selection::Selected(value) => Some(value),
            Selection::Unselected => None,
        }
    }
}

impl Selection<String> {
    /// The chosen column name, trimmed; blank names count as unselected.
    pub fn column(&self) -> Option<&str> {
        self.get().map(|s| s.trim()).filter(|s| !s.is_empty())
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Unselected
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Selected(v),
            None => Selection::Unselected,
        }
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Selection::from)
    }
}

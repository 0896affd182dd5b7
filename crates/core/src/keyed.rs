//! Keyed sub-documents.
//!
//! A keyed sub-document is a structured column holding a list of single-key
//! objects, e.g. `[{"dept_a": "Alice"}, {"dept_b": "Bob"}]`, whose entries are
//! addressed by key instead of by position. The employee `department` column
//! is stored this way.

use serde_json::{Map, Value};

use crate::encoding::{decode_structured, encode_structured};
use crate::error::CoreError;

/// In-memory form of a keyed sub-document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedList {
    entries: Vec<Map<String, Value>>,
}

impl KeyedList {
    /// Decode the stored text of a keyed column.
    ///
    /// `NULL`, an empty string and `[]` all yield an empty list. Anything
    /// other than a list of objects is rejected.
    pub fn from_stored(stored: Option<&str>) -> Result<Self, CoreError> {
        match stored.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => Self::from_value(decode_structured(text)),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let Value::Array(items) = value else {
            return Err(CoreError::Validation(
                "Stored value is not a list of keyed entries".to_string(),
            ));
        };
        let entries = items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                _ => Err(CoreError::Validation(
                    "Stored list contains a non-object entry".to_string(),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Replace the value under the first entry holding `key`.
    ///
    /// Every other entry, including later entries with the same key, is left
    /// untouched.
    pub fn edit(&mut self, key: &str, value: Value) -> Result<(), CoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.contains_key(key))
            .ok_or_else(|| CoreError::MissingKey {
                key: key.to_string(),
            })?;
        entry.insert(key.to_string(), value);
        Ok(())
    }

    /// Remove every entry holding `key`. Returns the number removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.contains_key(key));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.entries.iter().cloned().map(Value::Object).collect())
    }

    /// Canonical text form for writing back to the store.
    pub fn encode(&self) -> String {
        encode_structured(&self.to_value())
    }
}

/// Reject blank keys before touching the store.
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    if key.trim().is_empty() {
        return Err(CoreError::Validation("'key' must not be empty".to_string()));
    }
    Ok(())
}

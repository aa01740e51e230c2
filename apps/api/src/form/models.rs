use std::collections::BTreeMap;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Errors raised by the form layer. Only structurally invalid configuration
/// is an error; missing values and missing query strings never are.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0}")]
    InvalidConfiguration(String),
}

/// A single prefill value. Multi-select fields carry a list and serialize as
/// one repeated query parameter per selected option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.into_iter().map(String::from).collect())
    }
}

/// Logical field name → value. Lookup only; parameter order comes from the mapping.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// Logical field name → external parameter key (e.g. `entry.1048297419`).
///
/// Iteration follows insertion order so generated links are reproducible.
/// Keys are unique: inserting an existing field replaces its parameter in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct FieldMapping {
    entries: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, param: impl Into<String>) {
        let field = field.into();
        let param = param.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(existing) => existing.1 = param,
            None => self.entries.push((field, param)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, p)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, p)| (f.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a mapping from a JSON document that must be an object of strings.
    pub fn from_json_str(raw: &str) -> Result<Self, FormError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            FormError::InvalidConfiguration(format!("Invalid JSON mapping: {e}"))
        })?;
        Self::try_from(value)
    }
}

impl TryFrom<Value> for FieldMapping {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(FormError::InvalidConfiguration(format!(
                    "Field mapping must be a JSON object of field -> parameter key, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut mapping = FieldMapping::new();
        for (field, param) in object {
            match param {
                Value::String(param) => mapping.insert(field, param.trim()),
                other => {
                    return Err(FormError::InvalidConfiguration(format!(
                        "Parameter key for field '{field}' must be a string, got {}",
                        json_kind(&other)
                    )))
                }
            }
        }
        Ok(mapping)
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = FieldMapping::new();
        for (field, param) in iter {
            mapping.insert(field, param);
        }
        mapping
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, param) in &self.entries {
            map.serialize_entry(field, param)?;
        }
        map.end()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

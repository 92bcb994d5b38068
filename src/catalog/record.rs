//! CarRecord - one inventory entry, kept as an ordered JSON object.
//!
//! Sources are heterogeneous: ids may be numbers or strings, the display
//! field may be `title` or the legacy `name`, and arbitrary extra fields must
//! survive untouched. The record therefore stores the raw object and exposes
//! typed, non-failing accessors for the handful of fields the engine reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single car entry. Serializes exactly as the underlying JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarRecord {
    fields: Map<String, Value>,
}

impl CarRecord {
    /// Wrap an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw field lookup.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// All fields, in insertion order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }

    /// Canonical string form of the `id` field, see [`canonical_id`].
    pub fn id_key(&self) -> Option<String> {
        self.get("id").and_then(canonical_id)
    }

    /// Display name: `title`, falling back to the legacy `name` field.
    pub fn title(&self) -> Option<&str> {
        self.get("title")
            .and_then(Value::as_str)
            .or_else(|| self.get("name").and_then(Value::as_str))
    }

    pub fn color(&self) -> Option<&str> {
        self.get("color").and_then(Value::as_str)
    }

    /// Model year. Integral floats (`2020.0`) count; anything else is `None`.
    pub fn model(&self) -> Option<i64> {
        self.get("model").and_then(integral)
    }

    pub fn price(&self) -> Option<f64> {
        self.get("price").and_then(Value::as_f64)
    }
}

impl TryFrom<Value> for CarRecord {
    type Error = Value;

    /// Accepts only JSON objects; anything else is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

impl From<CarRecord> for Value {
    fn from(record: CarRecord) -> Self {
        Value::Object(record.fields)
    }
}

/// String form used to compare ids across sources.
///
/// Strings compare as-is. Numbers render without a trailing `.0`, so `7`,
/// `7.0` and `"7"` share one form. Other JSON types have no id form.
pub fn canonical_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => Some(f.to_string()),
            _ => Some(n.to_string()),
        },
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

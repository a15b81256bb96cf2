//! Document and Record - the values the store holds.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::uid::Uid;

/// A schema-less JSON object with at least one field.
///
/// The only way to build one is through validation, so every `Document`
/// the store sees is already known to be a non-empty object. Field values
/// are arbitrary JSON and stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Accept an already-parsed JSON value.
    pub fn try_from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(fields) if fields.is_empty() => Err(ValidationError::EmptyBody),
            Value::Object(fields) => Ok(Document(fields)),
            other => Err(ValidationError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a validated document.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for Document {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Document::try_from_value(value)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::try_from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Human-readable name of a JSON value's top-level kind.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A document plus its identifier and timestamps, as held by the store.
///
/// `id` and `created_at` never change after creation; `updated_at` moves
/// forward on every successful replace and is never earlier than
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uid,
    pub body: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Flat response shape: body fields at the top level next to `uid` and
    /// `_metadata`. The store-owned keys win over same-named body fields.
    pub fn render(&self) -> Value {
        let mut out = self.body.fields().clone();
        out.insert("uid".to_string(), Value::String(self.id.to_string()));
        out.insert(
            "_metadata".to_string(),
            serde_json::json!({
                "created_at": format_timestamp(&self.created_at),
                "updated_at": format_timestamp(&self.updated_at),
            }),
        );
        Value::Object(out)
    }
}

/// RFC 3339 with microsecond precision and a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

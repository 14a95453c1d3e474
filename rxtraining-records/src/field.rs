//! Field values as returned by the record store.
//!
//! The store hands back loosely-typed JSON per field. [`FieldValue::classify`]
//! is the single place that JSON is inspected; everything downstream
//! pattern-matches on the variant instead of probing keys.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys that carry displayable text inside rich-text objects, in priority order.
pub const RICH_TEXT_KEYS: [&str; 5] = ["text", "value", "plain_text", "content", "description"];

/// A classified field payload.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Plain string (also single-select and linked-record values on the wire).
    Text(String),
    /// Array of strings: multi-select labels, linked record ids, lookups.
    TextList(Vec<String>),
    /// Object carrying text under one of [`RICH_TEXT_KEYS`].
    RichObject(Map<String, Value>),
    /// Select option object (`{ id, name, color }`).
    SelectSingle(String),
    /// Array of select option objects.
    SelectMulti(Vec<String>),
    /// Attachment array, with malformed entries already dropped.
    AttachmentList(Vec<Attachment>),
    /// Numbers, booleans, null, and shapes nothing above matches.
    Unknown(Value),
}

impl FieldValue {
    /// Classifies a raw JSON payload.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Array(items) => classify_array(items),
            Value::Object(map) => classify_object(map),
            other => Self::Unknown(other),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, for number/currency/rating fields.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Unknown(v) => v.as_f64(),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Checkbox value. Unchecked boxes are omitted by the store, so callers
    /// typically treat a missing field as `false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Unknown(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::classify)
    }
}

fn classify_array(items: Vec<Value>) -> FieldValue {
    if items.iter().all(Value::is_string) {
        return FieldValue::TextList(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        );
    }

    if items.iter().all(Value::is_object) {
        if items.iter().any(looks_like_attachment) {
            return FieldValue::AttachmentList(
                items.iter().filter_map(Attachment::from_value).collect(),
            );
        }
        let labels: Option<Vec<String>> = items
            .iter()
            .map(|item| item.as_object().and_then(option_label))
            .collect();
        if let Some(labels) = labels {
            return FieldValue::SelectMulti(labels);
        }
    }

    FieldValue::Unknown(Value::Array(items))
}

fn classify_object(map: Map<String, Value>) -> FieldValue {
    let has_text_key = RICH_TEXT_KEYS.iter().any(|key| map.contains_key(*key));
    if !has_text_key {
        if let Some(label) = option_label(&map) {
            return FieldValue::SelectSingle(label);
        }
    }
    FieldValue::RichObject(map)
}

/// Select options carry their display text under `name`.
fn option_label(map: &Map<String, Value>) -> Option<String> {
    map.get("name").and_then(Value::as_str).map(str::to_string)
}

fn looks_like_attachment(item: &Value) -> bool {
    item.get("url").is_some() || item.get("filename").is_some()
}

/// A file attached to a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    pub filename: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Attachment {
    /// Extracts an attachment when `id`, `url` and `filename` are all
    /// non-empty strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        Some(Self {
            id: text("id")?,
            url: text("url")?,
            filename: text("filename")?,
            mime_type: text("type"),
            size: value.get("size").and_then(Value::as_u64),
        })
    }
}

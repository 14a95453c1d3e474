//! Coercion of classified field values into display text.
//!
//! Every function here is total: a value of the wrong shape degrades to an
//! empty string or an empty list.

use rxtraining_records::field::RICH_TEXT_KEYS;
use rxtraining_records::{Attachment, FieldValue, Record};
use serde_json::{Map, Value};

/// Display text of a field value.
///
/// Strings are trimmed, string lists and select labels are space-joined,
/// rich objects yield the first non-empty text found under
/// `text`, `value`, `plain_text`, `content`, `description` (array-valued
/// candidates are searched one level deep). Anything else is `""`.
pub fn coerce_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.trim().to_string(),
        FieldValue::TextList(items) => join_non_empty(items),
        FieldValue::RichObject(map) => probe_object(map, true),
        FieldValue::SelectSingle(label) => label.trim().to_string(),
        FieldValue::SelectMulti(labels) => join_non_empty(labels),
        FieldValue::AttachmentList(_) | FieldValue::Unknown(_) => String::new(),
    }
}

fn probe_object(map: &Map<String, Value>, descend: bool) -> String {
    for key in RICH_TEXT_KEYS {
        let text = match map.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Array(items)) if descend => join_non_empty(items.iter().map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Object(inner) => probe_object(inner, false),
                _ => String::new(),
            })),
            _ => continue,
        };
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}

fn join_non_empty<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter_map(|part| {
            let part = part.as_ref().trim();
            (!part.is_empty()).then(|| part.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Select labels, whether the store sent option objects or plain strings.
pub fn select_labels(value: &FieldValue) -> Vec<String> {
    let labels: Vec<&str> = match value {
        FieldValue::SelectSingle(label) | FieldValue::Text(label) => vec![label.as_str()],
        FieldValue::SelectMulti(labels) | FieldValue::TextList(labels) => {
            labels.iter().map(String::as_str).collect()
        }
        _ => Vec::new(),
    };
    labels
        .into_iter()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// The first select label, if any.
pub fn select_label(value: &FieldValue) -> Option<String> {
    select_labels(value).into_iter().next()
}

/// Well-formed attachments of an attachment field; anything else is empty.
pub fn attachments(value: &FieldValue) -> Vec<Attachment> {
    match value {
        FieldValue::AttachmentList(items) => items.clone(),
        _ => Vec::new(),
    }
}

/// First non-empty text among the named fields.
pub fn first_text(record: &Record, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| record.field(name))
        .map(coerce_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Like [`first_text`], but `None` instead of an empty string.
pub fn optional_text(record: &Record, names: &[&str]) -> Option<String> {
    Some(first_text(record, names)).filter(|text| !text.is_empty())
}

/// First select label among the named fields, or `default`.
pub fn label_or(record: &Record, names: &[&str], default: &str) -> String {
    names
        .iter()
        .filter_map(|name| record.field(name))
        .find_map(select_label)
        .unwrap_or_else(|| default.to_string())
}

/// All select labels among the named fields, from the first field that has any.
pub fn labels(record: &Record, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| record.field(name))
        .map(select_labels)
        .find(|labels| !labels.is_empty())
        .unwrap_or_default()
}

/// Attachments of the first named field that has any.
pub fn first_attachments(record: &Record, names: &[&str]) -> Vec<Attachment> {
    names
        .iter()
        .filter_map(|name| record.field(name))
        .map(attachments)
        .find(|files| !files.is_empty())
        .unwrap_or_default()
}

/// Checkbox value; absent or non-boolean reads as unchecked.
pub fn checked(record: &Record, names: &[&str]) -> bool {
    names
        .iter()
        .filter_map(|name| record.field(name))
        .find_map(FieldValue::as_bool)
        .unwrap_or(false)
}

/// Linked record ids.
pub fn linked_ids(record: &Record, names: &[&str]) -> Vec<String> {
    match record.first_field(names) {
        Some(FieldValue::TextList(ids)) => ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        Some(FieldValue::Text(id)) if !id.trim().is_empty() => vec![id.trim().to_string()],
        _ => Vec::new(),
    }
}

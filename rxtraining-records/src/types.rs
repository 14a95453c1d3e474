//! Shared types for record-store reads.

use crate::error::{RecordsError, RecordsResult};
use crate::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Largest page the list endpoint will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A record read from a table, with fields keyed by field name.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The first of `names` present on the record.
    pub fn first_field(&self, names: &[&str]) -> Option<&FieldValue> {
        names.iter().find_map(|name| self.fields.get(*name))
    }
}

/// One page of a list call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordPage {
    pub records: Vec<Record>,
    /// Continuation token; `None` on the last page.
    pub next_offset: Option<String>,
}

/// Record as it comes off the wire, fields keyed by field id.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Re-keys fields from ids to names and classifies each value.
    /// Ids missing from the schema keep their id as key.
    pub fn into_record(self, table: &TableSchema) -> Record {
        let fields = self
            .fields
            .into_iter()
            .map(|(key, value)| {
                let name = table
                    .field_by_id(&key)
                    .map(|f| f.name.clone())
                    .unwrap_or(key);
                (name, FieldValue::classify(value))
            })
            .collect();
        Record {
            id: self.id,
            created_time: self.created_time,
            fields,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default)]
    pub records: Vec<RawRecord>,
    pub offset: Option<String>,
}

/// Table and field layout of a base, from the metadata endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseSchema {
    pub tables: Vec<TableSchema>,
}

impl BaseSchema {
    /// Exact-name table lookup.
    pub fn table(&self, name: &str) -> RecordsResult<&TableSchema> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| RecordsError::TableNotFound(name.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl TableSchema {
    /// Exact-name field lookup.
    pub fn field(&self, name: &str) -> RecordsResult<&FieldSchema> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| RecordsError::FieldNotFound {
                table: self.name.clone(),
                field: name.to_string(),
            })
    }

    pub fn field_by_id(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    /// Field name.
    pub field: String,
    pub direction: SortDirection,
}

/// Parameters of a list call. Field names are resolved to ids at request time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    /// Records per page, clamped to `1..=100`. `None` leaves the store default.
    pub page_size: Option<u32>,
    pub filter_formula: Option<String>,
    /// Fields to return; empty returns every field.
    pub fields: Vec<String>,
    pub view: Option<String>,
    pub sort: Vec<SortSpec>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn filter(mut self, formula: impl Into<String>) -> Self {
        self.filter_formula = Some(formula.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }
}

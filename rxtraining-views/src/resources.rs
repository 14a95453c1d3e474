//! Resource library view-models.

use crate::coerce::{first_attachments, first_text, label_or, optional_text};
use crate::programs::{DEFAULT_CATEGORY, record_slug};
use rxtraining_records::{Attachment, Record};
use serde::Serialize;

const TITLE: &[&str] = &["Title", "Name"];
const DESCRIPTION: &[&str] = &["Description", "Summary", "Notes"];
const CATEGORY: &[&str] = &["Category"];
const KIND: &[&str] = &["Type", "Format"];
const LINK: &[&str] = &["Link", "URL"];
const FILES: &[&str] = &["Files", "Attachments", "File"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Resource format, e.g. "PDF" or "Video".
    pub kind: Option<String>,
    pub link: Option<String>,
    pub files: Vec<Attachment>,
}

pub fn map_resource(record: &Record) -> ResourceItem {
    let title = first_text(record, TITLE);
    ResourceItem {
        id: record.id.clone(),
        slug: record_slug(record, &title),
        description: first_text(record, DESCRIPTION),
        category: label_or(record, CATEGORY, DEFAULT_CATEGORY),
        kind: optional_text(record, KIND),
        link: optional_text(record, LINK),
        files: first_attachments(record, FILES),
        title,
    }
}

pub fn map_resources(records: &[Record]) -> Vec<ResourceItem> {
    records.iter().map(map_resource).collect()
}

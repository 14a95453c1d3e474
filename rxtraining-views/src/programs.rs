//! Program catalog view-models.

use crate::coerce::{
    checked, first_attachments, first_text, label_or, labels, linked_ids, optional_text,
};
use crate::slug::slugify;
use rxtraining_records::{Attachment, Record};
use serde::Serialize;

const TITLE: &[&str] = &["Title", "Name", "Program Name"];
const SLUG: &[&str] = &["Slug"];
const SUMMARY: &[&str] = &["Summary", "Short Description", "Description"];
const CATEGORY: &[&str] = &["Category", "Track"];
const LEVEL: &[&str] = &["Level"];
const DURATION: &[&str] = &["Duration", "Length"];
const IMAGE: &[&str] = &["Cover", "Image", "Thumbnail"];
const TAGS: &[&str] = &["Tags", "Topics"];
const RESOURCES: &[&str] = &["Resources"];
const FEATURED: &[&str] = &["Featured"];

/// Category shown when a record has none.
pub const DEFAULT_CATEGORY: &str = "General";

/// A program as shown in the catalog grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgramCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub level: Option<String>,
    pub duration: Option<String>,
    pub image: Option<Attachment>,
    pub tags: Vec<String>,
    /// Linked records in the resource library.
    pub resource_ids: Vec<String>,
    pub featured: bool,
}

pub fn map_program(record: &Record) -> ProgramCard {
    let title = first_text(record, TITLE);
    ProgramCard {
        id: record.id.clone(),
        slug: record_slug(record, &title),
        summary: first_text(record, SUMMARY),
        category: label_or(record, CATEGORY, DEFAULT_CATEGORY),
        level: optional_text(record, LEVEL),
        duration: optional_text(record, DURATION),
        image: first_attachments(record, IMAGE).into_iter().next(),
        tags: labels(record, TAGS),
        resource_ids: linked_ids(record, RESOURCES),
        featured: checked(record, FEATURED),
        title,
    }
}

pub fn map_programs(records: &[Record]) -> Vec<ProgramCard> {
    records.iter().map(map_program).collect()
}

/// The record's `Slug` field, else one derived from its title, else its id.
pub(crate) fn record_slug(record: &Record, title: &str) -> String {
    if let Some(slug) = optional_text(record, SLUG) {
        return slug;
    }
    let derived = slugify(title);
    if derived.is_empty() {
        record.id.to_ascii_lowercase()
    } else {
        derived
    }
}

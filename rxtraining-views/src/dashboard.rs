//! Member dashboard view-models.

use crate::coerce::{first_text, optional_text};
use crate::programs::ProgramCard;
use chrono::{DateTime, NaiveDate};
use rxtraining_records::Record;
use serde::Serialize;

const TITLE: &[&str] = &["Title", "Headline", "Name"];
const BODY: &[&str] = &["Body", "Message", "Content", "Description"];
const PUBLISHED: &[&str] = &["Published", "Date", "Publish Date"];
const LINK: &[&str] = &["Link", "URL"];

/// Announcements shown on the dashboard.
pub const DASHBOARD_ANNOUNCEMENTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_on: Option<NaiveDate>,
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub announcements: Vec<Announcement>,
    pub featured_programs: Vec<ProgramCard>,
}

pub fn map_announcement(record: &Record) -> Announcement {
    Announcement {
        id: record.id.clone(),
        title: first_text(record, TITLE),
        body: first_text(record, BODY),
        published_on: optional_text(record, PUBLISHED)
            .as_deref()
            .and_then(parse_date),
        link: optional_text(record, LINK),
    }
}

/// Announcements newest first, undated ones last; ties keep store order.
pub fn map_announcements(records: &[Record]) -> Vec<Announcement> {
    let mut announcements: Vec<Announcement> = records.iter().map(map_announcement).collect();
    announcements.sort_by(|a, b| b.published_on.cmp(&a.published_on));
    announcements
}

/// Assembles the dashboard from already-mapped parts.
pub fn build_dashboard(announcements: Vec<Announcement>, programs: Vec<ProgramCard>) -> DashboardView {
    DashboardView {
        announcements: announcements
            .into_iter()
            .take(DASHBOARD_ANNOUNCEMENTS)
            .collect(),
        featured_programs: programs.into_iter().filter(|p| p.featured).collect(),
    }
}

/// Date fields arrive as `YYYY-MM-DD`, date-time fields as RFC 3339.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

//! Page loaders: fetch records, map them, and degrade failures.
//!
//! The `*_page` methods never fail. A store error becomes
//! [`PageState::Degraded`] with a message fit for display, and the
//! underlying error is logged.

use crate::config::CatalogTables;
use crate::dashboard::{DashboardView, build_dashboard, map_announcements};
use crate::programs::{ProgramCard, map_programs};
use crate::resources::{ResourceItem, map_resources};
use rxtraining_records::{ListQuery, RecordClient, RecordsResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Outcome of loading a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum PageState<T> {
    Ready(T),
    Degraded { message: String },
}

impl<T> PageState<T> {
    /// Converts a load result, logging the error behind a degraded page.
    pub fn from_result(result: RecordsResult<T>, page: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                warn!("{page} degraded: {e}");
                Self::Degraded {
                    message: format!("We couldn't load the {page} right now. Please try again shortly."),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Degraded { .. } => None,
        }
    }
}

/// A program together with its linked library resources.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgramDetail {
    pub program: ProgramCard,
    pub resources: Vec<ResourceItem>,
}

/// Loads the member-area pages from the record store.
pub struct CatalogLoader {
    client: Arc<RecordClient>,
    tables: CatalogTables,
}

impl CatalogLoader {
    pub fn new(client: Arc<RecordClient>, tables: CatalogTables) -> Self {
        Self { client, tables }
    }

    pub async fn programs(&self) -> RecordsResult<Vec<ProgramCard>> {
        let records = self
            .client
            .list_all(&self.tables.programs, &ListQuery::new(), None)
            .await?;
        Ok(map_programs(&records))
    }

    pub async fn resources(&self) -> RecordsResult<Vec<ResourceItem>> {
        let records = self
            .client
            .list_all(&self.tables.resources, &ListQuery::new(), None)
            .await?;
        Ok(map_resources(&records))
    }

    pub async fn dashboard(&self) -> RecordsResult<DashboardView> {
        let records = self
            .client
            .list_all(&self.tables.announcements, &ListQuery::new(), None)
            .await?;
        let announcements = map_announcements(&records);
        let programs = self.programs().await?;
        Ok(build_dashboard(announcements, programs))
    }

    /// Finds a program by slug (stored or derived) and resolves its
    /// linked resources in link order. `None` when no program matches.
    pub async fn program_detail(&self, slug: &str) -> RecordsResult<Option<ProgramDetail>> {
        let Some(program) = self
            .programs()
            .await?
            .into_iter()
            .find(|p| p.slug == slug)
        else {
            return Ok(None);
        };

        let records = self
            .client
            .list_by_ids(&self.tables.resources, &program.resource_ids, &[])
            .await?;
        let mut resources = map_resources(&records);
        resources.sort_by_key(|r| {
            program
                .resource_ids
                .iter()
                .position(|id| *id == r.id)
                .unwrap_or(usize::MAX)
        });

        Ok(Some(ProgramDetail { program, resources }))
    }

    pub async fn catalog_page(&self) -> PageState<Vec<ProgramCard>> {
        PageState::from_result(self.programs().await, "program catalog")
    }

    pub async fn library_page(&self) -> PageState<Vec<ResourceItem>> {
        PageState::from_result(self.resources().await, "resource library")
    }

    pub async fn dashboard_page(&self) -> PageState<DashboardView> {
        PageState::from_result(self.dashboard().await, "dashboard")
    }

    pub async fn program_page(&self, slug: &str) -> PageState<Option<ProgramDetail>> {
        PageState::from_result(self.program_detail(slug).await, "program")
    }
}

//! Page view-models for the rxtraining member site.
//!
//! Mappers turn records from `rxtraining-records` into UI-ready shapes and
//! never fail; loaders fetch, map, and degrade store errors into a
//! [`PageState`].

pub mod coerce;
pub mod config;
pub mod dashboard;
pub mod loader;
pub mod programs;
pub mod resources;
pub mod slug;

pub use coerce::{attachments, coerce_text, select_label, select_labels};
pub use config::CatalogTables;
pub use dashboard::{Announcement, DashboardView};
pub use loader::{CatalogLoader, PageState, ProgramDetail};
pub use programs::ProgramCard;
pub use resources::ResourceItem;
pub use slug::slugify;

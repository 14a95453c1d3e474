//! Table names backing each page.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTables {
    pub programs: String,
    pub resources: String,
    pub announcements: String,
}

impl Default for CatalogTables {
    fn default() -> Self {
        Self {
            programs: "Programs".to_string(),
            resources: "Resources".to_string(),
            announcements: "Announcements".to_string(),
        }
    }
}

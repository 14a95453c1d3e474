//! Record-store access layer for the rxtraining member site.
//!
//! Provides read-only access to the hosted record store with:
//! - Ordered credential resolution (local override, process context, build-time fallback)
//! - Schema resolution of table/field names to ids, cached for five minutes
//! - Single-record, paged, full-collection and by-id reads
//! - One classifying decoder for loosely-typed field payloads

pub mod client;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod field;
pub mod formula;
pub mod http;
pub mod schema;
pub mod storage;
pub mod types;

pub use client::RecordClient;
pub use config::RecordsConfig;
pub use error::{RecordsError, RecordsResult};
pub use field::{Attachment, FieldValue};
pub use types::*;

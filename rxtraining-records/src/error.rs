//! Record-store error types.

use thiserror::Error;

/// Result type for record-store operations.
pub type RecordsResult<T> = Result<T, RecordsError>;

/// Errors that can occur while reading from the record store.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("no access token configured for the record store")]
    MissingCredential,

    #[error("record store request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("record {record_id} not found in table {table}: {body}")]
    RecordNotFound {
        table: String,
        record_id: String,
        body: String,
    },

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("field not found: {field} in table {table}")]
    FieldNotFound { table: String, field: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RecordsError {
    /// Returns true for lookups of names or identifiers the store does not know.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::TableNotFound(_) | Self::FieldNotFound { .. }
        )
    }

    /// HTTP status carried by the error, if it came from a store response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RecordNotFound { .. } => Some(404),
            _ => None,
        }
    }
}

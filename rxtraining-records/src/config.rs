//! Record-store configuration.

use crate::error::{RecordsError, RecordsResult};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`RecordsConfig::api_base_url`].
pub const API_URL_ENV: &str = "RXTRAINING_RECORDS_API_URL";

/// Environment variable overriding [`RecordsConfig::base_id`].
pub const BASE_ID_ENV: &str = "RXTRAINING_RECORDS_BASE_ID";

/// Largest cache window chrono can represent, in seconds.
pub const MAX_SCHEMA_CACHE_TTL_SECS: i64 = i64::MAX / 1000;

/// Configuration for the record-store client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Base URL of the record-store REST API (e.g., "https://api.airtable.com").
    pub api_base_url: String,

    /// Identifier of the base holding the site's tables.
    pub base_id: String,

    /// How long a fetched schema stays fresh, in seconds.
    pub schema_cache_ttl_secs: i64,

    /// Storage key of the schema cache entry.
    pub schema_cache_key: String,

    /// Storage key of the access-token override.
    pub token_override_key: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.airtable.com".to_string(),
            base_id: String::new(),
            schema_cache_ttl_secs: 300, // 5 minutes
            schema_cache_key: "rxtraining.records.schema".to_string(),
            token_override_key: "rxtraining.records.token".to_string(),
        }
    }
}

impl RecordsConfig {
    /// Creates a config for the given base with default settings.
    pub fn for_base(base_id: impl Into<String>) -> Self {
        Self {
            base_id: base_id.into(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with `RXTRAINING_RECORDS_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_var(API_URL_ENV) {
            config.api_base_url = url;
        }
        if let Some(base_id) = non_empty_var(BASE_ID_ENV) {
            config.base_id = base_id;
        }
        config
    }

    /// Checks that the config can address a base.
    pub fn validate(&self) -> RecordsResult<()> {
        if self.base_id.trim().is_empty() {
            return Err(RecordsError::Config("missing base_id".into()));
        }
        if self.schema_cache_ttl_secs < 0 {
            return Err(RecordsError::Config(format!(
                "negative schema_cache_ttl_secs: {}",
                self.schema_cache_ttl_secs
            )));
        }
        if self.schema_cache_ttl_secs > MAX_SCHEMA_CACHE_TTL_SECS {
            return Err(RecordsError::Config(format!(
                "schema_cache_ttl_secs too large: {}",
                self.schema_cache_ttl_secs
            )));
        }
        let url = reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| RecordsError::Config(format!("invalid api_base_url: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(RecordsError::Config(format!(
                "api_base_url cannot be a base: {}",
                self.api_base_url
            )));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

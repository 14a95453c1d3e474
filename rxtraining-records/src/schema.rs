//! Schema resolution: table and field names to stable identifiers.
//!
//! The base's metadata is fetched once and kept in a [`SchemaCache`] for a
//! fixed freshness window. The cache is best-effort: a storage failure or a
//! corrupt entry only costs a re-fetch.

use crate::clock::Clock;
use crate::config::RecordsConfig;
use crate::error::RecordsResult;
use crate::http::{QueryParams, StoreHttp};
use crate::storage::KeyValueStorage;
use crate::types::{BaseSchema, TableSchema};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    /// Unix milliseconds.
    #[serde(rename = "fetchedAt")]
    fetched_at: i64,
    data: BaseSchema,
}

/// Time-boxed schema cache over injected storage and clock ports.
pub struct SchemaCache {
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    key: String,
    ttl: Duration,
}

impl SchemaCache {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
        key: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            storage,
            clock,
            key: key.into(),
            ttl,
        }
    }

    /// Builds the cache from config. A window too large to represent is
    /// treated as unbounded; `RecordsConfig::validate` rejects it up front.
    pub fn from_config(
        config: &RecordsConfig,
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            storage,
            clock,
            config.schema_cache_key.clone(),
            Duration::try_seconds(config.schema_cache_ttl_secs).unwrap_or(Duration::MAX),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached schema if one exists and its age is within
    /// `[0, ttl)`.
    pub fn load(&self) -> Option<BaseSchema> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!("schema cache unreadable, treating as miss: {e}");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("schema cache entry corrupt, treating as miss: {e}");
                return None;
            }
        };

        // An entry stamped in the future came from a skewed clock; refetch.
        let age_ms = self.clock.now().timestamp_millis().saturating_sub(entry.fetched_at);
        if (0..self.ttl.num_milliseconds()).contains(&age_ms) {
            Some(entry.data)
        } else {
            debug!("schema cache entry stale ({age_ms}ms old)");
            None
        }
    }

    /// Persists `schema` stamped with the current time. Failures are logged
    /// and dropped.
    pub fn store(&self, schema: &BaseSchema) {
        let entry = CacheEntry {
            fetched_at: self.clock.now().timestamp_millis(),
            data: schema.clone(),
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to encode schema cache entry: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &json) {
            warn!("failed to persist schema cache: {e}");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            warn!("failed to clear schema cache: {e}");
        }
    }
}

/// Resolves human-readable table and field names against the base schema.
///
/// Concurrent resolutions are not coalesced: two callers missing the cache
/// at once both fetch, and the later write wins.
pub struct SchemaResolver {
    http: StoreHttp,
    cache: SchemaCache,
}

impl SchemaResolver {
    pub fn new(http: StoreHttp, cache: SchemaCache) -> Self {
        Self { http, cache }
    }

    /// The base schema, from cache when fresh.
    pub async fn base_schema(&self) -> RecordsResult<BaseSchema> {
        if let Some(schema) = self.cache.load() {
            debug!("schema cache hit for base {}", self.http.base_id());
            return Ok(schema);
        }

        let schema = self.fetch().await?;
        self.cache.store(&schema);
        Ok(schema)
    }

    async fn fetch(&self) -> RecordsResult<BaseSchema> {
        let base_id = self.http.base_id().to_string();
        let url = self
            .http
            .url(&["v0", "meta", "bases", base_id.as_str(), "tables"])?;
        let schema: BaseSchema = self.http.get_json(url, &QueryParams::new()).await?;
        debug!(
            "fetched schema for base {base_id}: {} tables",
            schema.tables.len()
        );
        Ok(schema)
    }

    pub async fn table(&self, table_name: &str) -> RecordsResult<TableSchema> {
        let schema = self.base_schema().await?;
        schema.table(table_name).cloned()
    }

    pub async fn resolve_table_id(&self, table_name: &str) -> RecordsResult<String> {
        Ok(self.table(table_name).await?.id)
    }

    pub async fn resolve_field_id(&self, table_name: &str, field_name: &str) -> RecordsResult<String> {
        let table = self.table(table_name).await?;
        Ok(table.field(field_name)?.id.clone())
    }

    /// Drops the cached schema so the next resolution re-fetches.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

//! Shared helpers for tests against a wiremock record store.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use rxtraining_records::clock::{Clock, SystemClock};
use rxtraining_records::credentials::StaticToken;
use rxtraining_records::schema::SchemaCache;
use rxtraining_records::storage::{KeyValueStorage, MemoryStorage, StorageError, StorageResult};
use rxtraining_records::{RecordClient, RecordsConfig};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BASE_ID: &str = "appTEST";
pub const TOKEN: &str = "pat-test-token";
pub const SCHEMA_PATH: &str = "/v0/meta/bases/appTEST/tables";
pub const PROGRAMS_PATH: &str = "/v0/appTEST/tblPrograms";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("rxtraining_records=debug"))
        .with_test_writer()
        .try_init();
}

pub fn config(server: &MockServer) -> RecordsConfig {
    RecordsConfig {
        api_base_url: server.uri(),
        ..RecordsConfig::for_base(BASE_ID)
    }
}

pub fn client(server: &MockServer) -> RecordClient {
    client_with(server, Arc::new(MemoryStorage::new()), Arc::new(SystemClock))
}

pub fn client_with(
    server: &MockServer,
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
) -> RecordClient {
    let config = config(server);
    let cache = SchemaCache::from_config(&config, storage, clock);
    RecordClient::new(&config, Arc::new(StaticToken::new(TOKEN)), cache).unwrap()
}

pub fn schema_json() -> Value {
    json!({
        "tables": [
            {
                "id": "tblPrograms",
                "name": "Programs",
                "primaryFieldId": "fldTitle",
                "fields": [
                    { "id": "fldTitle", "name": "Title", "type": "singleLineText" },
                    { "id": "fldSlug", "name": "Slug", "type": "singleLineText" },
                    { "id": "fldSummary", "name": "Summary", "type": "richText" },
                    { "id": "fldCategory", "name": "Category", "type": "singleSelect" },
                    { "id": "fldCover", "name": "Cover", "type": "multipleAttachments" },
                    { "id": "fldResources", "name": "Resources", "type": "multipleRecordLinks" }
                ]
            },
            {
                "id": "tblResources",
                "name": "Resources",
                "fields": [
                    { "id": "fldResTitle", "name": "Title", "type": "singleLineText" },
                    { "id": "fldResFiles", "name": "Files", "type": "multipleAttachments" }
                ]
            }
        ]
    })
}

pub async fn mount_schema(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SCHEMA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(schema_json()))
        .mount(server)
        .await;
}

pub fn record_json(id: &str, fields: Value) -> Value {
    json!({
        "id": id,
        "createdTime": "2025-01-01T00:00:00.000Z",
        "fields": fields,
    })
}

/// `count` program records numbered from `start`, fields keyed by id.
pub fn program_records(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| record_json(&format!("rec{i:04}"), json!({ "fldTitle": format!("Program {i}") })))
        .collect()
}

/// Storage whose every operation fails.
pub struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("disk on fire".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk on fire".into()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk on fire".into()))
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

//! Shared helpers: in-memory records and a wiremock-backed client.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rxtraining_records::clock::SystemClock;
use rxtraining_records::credentials::StaticToken;
use rxtraining_records::schema::SchemaCache;
use rxtraining_records::storage::MemoryStorage;
use rxtraining_records::{FieldValue, Record, RecordClient, RecordsConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SCHEMA_PATH: &str = "/v0/meta/bases/appSITE/tables";
pub const PROGRAMS_PATH: &str = "/v0/appSITE/tblPrograms";
pub const RESOURCES_PATH: &str = "/v0/appSITE/tblResources";
pub const ANNOUNCEMENTS_PATH: &str = "/v0/appSITE/tblNews";

/// A record built in memory, fields keyed by name.
pub fn record(id: &str, fields: Value) -> Record {
    let fields = match fields {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, value)| (name, FieldValue::classify(value)))
            .collect(),
        _ => Default::default(),
    };
    Record {
        id: id.to_string(),
        created_time: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        fields,
    }
}

pub fn client(server: &MockServer) -> Arc<RecordClient> {
    let config = RecordsConfig {
        api_base_url: server.uri(),
        ..RecordsConfig::for_base("appSITE")
    };
    let cache = SchemaCache::from_config(
        &config,
        Arc::new(MemoryStorage::new()),
        Arc::new(SystemClock),
    );
    Arc::new(RecordClient::new(&config, Arc::new(StaticToken::new("pat-site")), cache).unwrap())
}

pub async fn mount_schema(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SCHEMA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tables": [
                {
                    "id": "tblPrograms",
                    "name": "Programs",
                    "fields": [
                        { "id": "fldPTitle", "name": "Title", "type": "singleLineText" },
                        { "id": "fldPSlug", "name": "Slug", "type": "singleLineText" },
                        { "id": "fldPSummary", "name": "Summary", "type": "multilineText" },
                        { "id": "fldPCategory", "name": "Category", "type": "singleSelect" },
                        { "id": "fldPResources", "name": "Resources", "type": "multipleRecordLinks" },
                        { "id": "fldPFeatured", "name": "Featured", "type": "checkbox" }
                    ]
                },
                {
                    "id": "tblResources",
                    "name": "Resources",
                    "fields": [
                        { "id": "fldRTitle", "name": "Title", "type": "singleLineText" },
                        { "id": "fldRFiles", "name": "Files", "type": "multipleAttachments" }
                    ]
                },
                {
                    "id": "tblNews",
                    "name": "Announcements",
                    "fields": [
                        { "id": "fldNTitle", "name": "Title", "type": "singleLineText" },
                        { "id": "fldNDate", "name": "Published", "type": "date" }
                    ]
                }
            ]
        })))
        .mount(server)
        .await;
}

pub fn wire_record(id: &str, fields: Value) -> Value {
    json!({
        "id": id,
        "createdTime": "2025-01-01T00:00:00.000Z",
        "fields": fields,
    })
}

pub async fn mount_list(server: &MockServer, list_path: &str, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(list_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": records })))
        .mount(server)
        .await;
}

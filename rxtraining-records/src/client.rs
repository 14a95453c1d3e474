//! Record reads against the store's REST API.
//!
//! Callers address tables and fields by name. Names are resolved to ids
//! through the [`SchemaResolver`], requests are sent with
//! `returnFieldsByFieldId=true`, and returned fields are keyed by name
//! again before they reach the caller.

use crate::config::RecordsConfig;
use crate::credentials::TokenSource;
use crate::error::{RecordsError, RecordsResult};
use crate::formula;
use crate::http::{self, QueryParams, StoreHttp};
use crate::schema::{SchemaCache, SchemaResolver};
use crate::types::{ListQuery, MAX_PAGE_SIZE, RawPage, RawRecord, Record, RecordPage, TableSchema};
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::debug;

/// Read-only client for the tables of one base.
pub struct RecordClient {
    http: StoreHttp,
    schema: SchemaResolver,
}

impl RecordClient {
    pub fn new(
        config: &RecordsConfig,
        tokens: Arc<dyn TokenSource>,
        cache: SchemaCache,
    ) -> RecordsResult<Self> {
        let http = StoreHttp::new(config, tokens)?;
        Ok(Self {
            schema: SchemaResolver::new(http.clone(), cache),
            http,
        })
    }

    pub fn schema(&self) -> &SchemaResolver {
        &self.schema
    }

    /// Fetches a single page of `table`, starting at `offset` when given.
    pub async fn list_page(
        &self,
        table: &str,
        query: &ListQuery,
        offset: Option<&str>,
    ) -> RecordsResult<RecordPage> {
        let schema = self.schema.table(table).await?;
        self.fetch_page(&schema, query, offset).await
    }

    /// Fetches one record by id.
    ///
    /// A 404 from the store becomes `RecordNotFound` carrying the store's
    /// own error body.
    pub async fn get_one(&self, table: &str, record_id: &str, fields: &[&str]) -> RecordsResult<Record> {
        let schema = self.schema.table(table).await?;
        let mut params = QueryParams::new();
        push_field_params(&mut params, &schema, fields)?;
        params.push(("returnFieldsByFieldId".into(), "true".into()));

        let url = self
            .http
            .url(&["v0", self.http.base_id(), schema.id.as_str(), record_id])?;
        let resp = self.http.get(url, &params).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(RecordsError::RecordNotFound {
                table: table.to_string(),
                record_id: record_id.to_string(),
                body: http::error_body(resp).await,
            });
        }

        let raw: RawRecord = http::read_json(resp).await?;
        Ok(raw.into_record(&schema))
    }

    /// Follows continuation tokens until the store stops returning one.
    ///
    /// With `max_records`, the result is cut to exactly that many records
    /// and no further page is requested once the limit is reached.
    pub async fn list_all(
        &self,
        table: &str,
        query: &ListQuery,
        max_records: Option<usize>,
    ) -> RecordsResult<Vec<Record>> {
        if max_records == Some(0) {
            return Ok(Vec::new());
        }

        let schema = self.schema.table(table).await?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.fetch_page(&schema, query, offset.as_deref()).await?;
            records.extend(page.records);

            if let Some(max) = max_records {
                if records.len() >= max {
                    records.truncate(max);
                    break;
                }
            }

            match page.next_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!("listed {} records from {table}", records.len());
        Ok(records)
    }

    /// Fetches the records of `table` whose ids are in `ids`.
    ///
    /// An empty id list returns immediately without touching the network.
    pub async fn list_by_ids(
        &self,
        table: &str,
        ids: &[String],
        fields: &[&str],
    ) -> RecordsResult<Vec<Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = ListQuery::new()
            .fields(fields.iter().copied())
            .filter(formula::record_id_in(ids));
        self.list_all(table, &query, None).await
    }

    async fn fetch_page(
        &self,
        schema: &TableSchema,
        query: &ListQuery,
        offset: Option<&str>,
    ) -> RecordsResult<RecordPage> {
        let mut params = list_params(schema, query)?;
        if let Some(offset) = offset {
            params.push(("offset".into(), offset.to_string()));
        }

        let url = self.http.url(&["v0", self.http.base_id(), schema.id.as_str()])?;
        let page: RawPage = self.http.get_json(url, &params).await?;
        let next_offset = page.offset.filter(|o| !o.is_empty());
        debug!(
            "fetched page of {} records from {} (more: {})",
            page.records.len(),
            schema.name,
            next_offset.is_some()
        );

        Ok(RecordPage {
            records: page
                .records
                .into_iter()
                .map(|raw| raw.into_record(schema))
                .collect(),
            next_offset,
        })
    }
}

fn list_params(schema: &TableSchema, query: &ListQuery) -> RecordsResult<QueryParams> {
    let mut params = QueryParams::new();

    if let Some(size) = query.page_size {
        params.push(("pageSize".into(), size.clamp(1, MAX_PAGE_SIZE).to_string()));
    }
    if let Some(formula) = query.filter_formula.as_deref().filter(|f| !f.is_empty()) {
        params.push(("filterByFormula".into(), formula.to_string()));
    }
    if let Some(view) = &query.view {
        params.push(("view".into(), view.clone()));
    }
    for (i, sort) in query.sort.iter().enumerate() {
        let field = schema.field(&sort.field)?;
        params.push((format!("sort[{i}][field]"), field.id.clone()));
        params.push((format!("sort[{i}][direction]"), sort.direction.as_str().into()));
    }
    let fields: Vec<&str> = query.fields.iter().map(String::as_str).collect();
    push_field_params(&mut params, schema, &fields)?;
    params.push(("returnFieldsByFieldId".into(), "true".into()));

    Ok(params)
}

fn push_field_params(params: &mut QueryParams, schema: &TableSchema, fields: &[&str]) -> RecordsResult<()> {
    for name in fields {
        let field = schema.field(name)?;
        params.push(("fields[]".into(), field.id.clone()));
    }
    Ok(())
}

//! Authenticated HTTP access to the record-store REST API.

use crate::config::RecordsConfig;
use crate::credentials::TokenSource;
use crate::error::{RecordsError, RecordsResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Query string as ordered key/value pairs; keys may repeat (`fields[]`).
pub(crate) type QueryParams = Vec<(String, String)>;

/// Shared transport for metadata and record endpoints.
#[derive(Clone)]
pub struct StoreHttp {
    client: Client,
    api_base: Url,
    base_id: String,
    tokens: Arc<dyn TokenSource>,
}

impl StoreHttp {
    pub fn new(config: &RecordsConfig, tokens: Arc<dyn TokenSource>) -> RecordsResult<Self> {
        config.validate()?;
        let api_base = Url::parse(&config.api_base_url)
            .map_err(|e| RecordsError::Config(format!("invalid api_base_url: {e}")))?;
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_base,
            base_id: config.base_id.clone(),
            tokens,
        })
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    /// Builds `{api_base}/seg/seg/...`, percent-encoding each segment.
    pub(crate) fn url(&self, segments: &[&str]) -> RecordsResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| RecordsError::Config(format!("api_base_url cannot be a base: {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authenticated GET. Fails with `MissingCredential` before any I/O
    /// when no token resolves.
    pub(crate) async fn get(&self, url: Url, query: &QueryParams) -> RecordsResult<Response> {
        let token = self.tokens.token().ok_or(RecordsError::MissingCredential)?;
        debug!("GET {}", url.path());

        Ok(self
            .client
            .get(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &QueryParams,
    ) -> RecordsResult<T> {
        let resp = self.get(url, query).await?;
        read_json(resp).await
    }
}

/// Parses a successful response body, or turns a non-2xx response into
/// `RecordsError::Http` carrying the status and body text.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> RecordsResult<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(RecordsError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Body text of a failed response; an unreadable body reads as empty.
pub(crate) async fn error_body(resp: Response) -> String {
    resp.text().await.unwrap_or_default()
}
